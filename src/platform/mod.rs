//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//!
//! Storage lives with the high score in `crate::highscore`.

pub mod input;
pub mod time;

pub use input::{Intent, RawInput, intent_for};
pub use time::FrameClock;
