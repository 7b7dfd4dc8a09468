//! Hop Runner - A single-screen endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Frame driver tying clock, input intent, simulation and storage
//! - `platform`: Browser/native platform abstraction (input mapping, frame clock)
//! - `highscore`: Best-score persistence
//! - `tuning`: Data-driven game balance
//! - `renderer`: Canvas 2D drawing

pub mod game;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscore::{HighScoreStore, MemoryStore};
pub use tuning::{Tuning, TuningError};

/// Logical coordinate space. Physical scaling is a renderer concern.
pub mod consts {
    /// Width of the playfield
    pub const WORLD_WIDTH: f32 = 800.0;
    /// Height of the playfield
    pub const WORLD_HEIGHT: f32 = 300.0;
    /// Y coordinate of the ground line (y grows downward)
    pub const GROUND_Y: f32 = 260.0;

    /// Largest simulated step per frame (33 ms), prevents tunneling after a stall
    pub const MAX_FRAME_STEP: f32 = 0.033;
}
