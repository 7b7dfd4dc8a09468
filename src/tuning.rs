//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Half-open sampling range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,
    /// Player width
    pub player_w: f32,
    /// Player height
    pub player_h: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_impulse: f32,

    // === World ===
    /// Y coordinate of the ground line
    pub ground_y: f32,
    /// X coordinate new obstacles appear at
    pub spawn_x: f32,
    /// Obstacles are recycled once their right edge is this far left of x = 0
    pub recycle_margin: f32,

    // === Difficulty ===
    /// Scroll speed at run start (px/s)
    pub base_speed: f32,
    /// Linear speed increase (px/s per second)
    pub speed_ramp: f32,

    // === Spawning ===
    /// Probability of rolling a narrow obstacle
    pub narrow_chance: f64,
    pub narrow_width: Span,
    pub wide_width: Span,
    pub obstacle_height: Span,
    /// Base countdown between spawns (seconds)
    pub spawn_interval: Span,
    /// Speed is divided by this to get the interval reduction
    pub spawn_speed_divisor: f32,
    /// Cap on the speed-based interval reduction (seconds)
    pub spawn_max_reduction: f32,
    /// Interval never drops below this (seconds)
    pub spawn_interval_floor: f32,

    // === Scoring ===
    /// Points per second survived
    pub score_rate: f32,
    /// Points for clearing an obstacle
    pub pass_bonus: f32,

    // === Timing ===
    /// Max simulated seconds per frame
    pub max_step: f32,

    // === Autopilot ===
    /// Seconds of look-ahead before the autopilot jumps
    pub autopilot_lead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: 80.0,
            player_w: 40.0,
            player_h: 40.0,
            gravity: 1600.0,
            jump_impulse: 720.0,

            ground_y: GROUND_Y,
            spawn_x: WORLD_WIDTH + 20.0,
            recycle_margin: 40.0,

            base_speed: 240.0,
            speed_ramp: 6.0,

            narrow_chance: 0.4,
            narrow_width: Span::new(20.0, 40.0),
            wide_width: Span::new(30.0, 70.0),
            obstacle_height: Span::new(20.0, 60.0),
            spawn_interval: Span::new(0.9, 1.6),
            spawn_speed_divisor: 1000.0,
            spawn_max_reduction: 0.5,
            spawn_interval_floor: 0.25,

            score_rate: 10.0,
            pass_bonus: 5.0,

            max_step: MAX_FRAME_STEP,

            autopilot_lead: 0.2,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the constraints the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_w", self.player_w),
            ("player_h", self.player_h),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("base_speed", self.base_speed),
            ("spawn_speed_divisor", self.spawn_speed_divisor),
            ("spawn_interval_floor", self.spawn_interval_floor),
            ("max_step", self.max_step),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        if !(self.speed_ramp.is_finite() && self.speed_ramp >= 0.0) {
            return Err(TuningError::Invalid {
                field: "speed_ramp",
                reason: "speed may not decrease during a run",
            });
        }
        if !(self.spawn_max_reduction.is_finite() && self.spawn_max_reduction >= 0.0) {
            return Err(TuningError::Invalid {
                field: "spawn_max_reduction",
                reason: "must be zero or positive",
            });
        }
        if !(0.0..=1.0).contains(&self.narrow_chance) {
            return Err(TuningError::Invalid {
                field: "narrow_chance",
                reason: "must be a probability in [0, 1]",
            });
        }

        let spans = [
            ("narrow_width", self.narrow_width),
            ("wide_width", self.wide_width),
            ("obstacle_height", self.obstacle_height),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, span) in spans {
            if !span.is_valid() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "range must satisfy min < max",
                });
            }
        }

        Ok(())
    }

    /// Resting y of the player's top edge
    pub fn player_ground_level(&self) -> f32 {
        self.ground_y - self.player_h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "gravity": 2000.0, "base_speed": 300.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 2000.0);
        assert_eq!(tuning.base_speed, 300.0);
        assert_eq!(tuning.jump_impulse, Tuning::default().jump_impulse);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_span() {
        let err = Tuning::from_json(r#"{ "obstacle_height": { "min": 40.0, "max": 40.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacle_height",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_ramp() {
        let err = Tuning::from_json(r#"{ "speed_ramp": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "speed_ramp", .. }));
    }

    #[test]
    fn test_ground_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_ground_level(), GROUND_Y - 40.0);
    }
}
