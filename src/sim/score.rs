//! Run score: time accrual, pass bonuses, high-score settlement

/// Score for the current run. Only ever grows within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreKeeper {
    score: f32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continuous survival points
    pub fn accrue(&mut self, dt: f32, rate: f32) {
        self.score += rate * dt.max(0.0);
    }

    /// One-off bonus for clearing an obstacle
    pub fn award_pass(&mut self, bonus: f32) {
        self.score += bonus.max(0.0);
    }

    /// Raw fractional score
    pub fn value(&self) -> f32 {
        self.score
    }

    /// Whole points, as shown on the HUD and persisted
    pub fn display(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Fold the final score into `high_score`. Returns true on a new record.
    pub fn settle(&self, high_score: &mut u64) -> bool {
        let final_score = self.display();
        if final_score > *high_score {
            *high_score = final_score;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, score: f32) {
        self.score = score;
    }
}
