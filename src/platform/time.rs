//! Frame timing
//!
//! Turns the millisecond timestamps handed to an animation-frame callback
//! into simulation deltas in seconds.

/// Converts frame timestamps into clamped deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_step: f32,
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            last_ms: None,
            max_step,
        }
    }

    /// Restart timing from `now_ms`, so the next frame measures from here
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous frame, in `[0, max_step]`.
    ///
    /// The first frame after construction yields 0. A timestamp that goes
    /// backwards also yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, self.max_step)
        } else {
            0.0
        }
    }
}
