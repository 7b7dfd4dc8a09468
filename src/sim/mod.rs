//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Elapsed time comes in as an argument, never read from a clock
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod pool;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap};
pub use physics::{step_player, try_jump};
pub use pool::{ObstacleId, ObstaclePool};
pub use score::ScoreKeeper;
pub use spawn::{ObstacleSpec, SpawnController, next_interval, roll_obstacle};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Snapshot};
pub use tick::{TickInput, tick};
