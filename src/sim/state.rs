//! Game state and core simulation types
//!
//! Everything a run mutates is owned by `GameState`; the physics, spawn and
//! collision helpers only ever see it through borrowed pieces.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::pool::ObstaclePool;
use super::score::ScoreKeeper;
use super::spawn::SpawnController;
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frozen: before the first run or after a crash
    Idle,
    /// Simulation advancing every tick
    Running,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted { run: u32 },
    ObstacleSpawned { width: f32, height: f32 },
    ObstaclePassed,
    GameOver {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// The player's block. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub on_ground: bool,
}

impl Player {
    /// A player standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.player_ground_level()),
            size: Vec2::new(tuning.player_w, tuning.player_h),
            vy: 0.0,
            on_ground: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// An obstacle resting on the ground and scrolling left
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the pass bonus has been paid
    pub passed: bool,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Box covering every position since the obstacle was shifted left by `shift`
    pub fn swept_rect(&self, shift: f32) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x + shift.max(0.0), self.size.y)
    }

    /// Trailing edge is behind the player's leading edge
    pub fn is_behind(&self, player_x: f32) -> bool {
        self.pos.x + self.size.x < player_x
    }

    /// Fully off the left side of the screen, past the margin
    pub fn is_off_screen(&self, margin: f32) -> bool {
        self.pos.x + self.size.x < -margin
    }
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Rect,
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub high_score: u64,
    pub running: bool,
    /// At least one run has ended (overlay shows "game over" rather than "ready")
    pub game_over: bool,
    pub speed: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: ObstaclePool,
    pub spawn: SpawnController,
    pub score: ScoreKeeper,
    /// Current scroll speed (px/s)
    pub speed: f32,
    /// Seconds simulated in the current run
    pub elapsed: f32,
    /// Best score across sessions
    pub high_score: u64,
    /// Runs started since launch
    pub runs: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh idle state: zero score, no obstacles, player grounded
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            speed: tuning.base_speed,
            tuning,
            phase: GamePhase::Idle,
            obstacles: ObstaclePool::new(),
            spawn: SpawnController::new(),
            score: ScoreKeeper::new(),
            elapsed: 0.0,
            high_score,
            runs: 0,
            events: Vec::new(),
        }
    }

    /// Reset the run and begin ticking. The RNG keeps its stream.
    pub fn start_run(&mut self) {
        self.obstacles.clear();
        self.player = Player::new(&self.tuning);
        self.spawn.reset();
        self.score = ScoreKeeper::new();
        self.speed = self.tuning.base_speed;
        self.elapsed = 0.0;
        self.runs += 1;
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::RunStarted { run: self.runs });
    }

    /// Crash: settle the high score and freeze
    pub fn end_run(&mut self) {
        let new_record = self.score.settle(&mut self.high_score);
        self.phase = GamePhase::Idle;
        self.push_event(GameEvent::GameOver {
            score: self.score.display(),
            high_score: self.high_score,
            new_record,
        });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn obstacle_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter_active().map(Obstacle::rect)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.rect(),
            obstacles: self.obstacle_rects().collect(),
            score: self.score.display(),
            high_score: self.high_score,
            running: self.is_running(),
            game_over: !self.is_running() && self.runs > 0,
            speed: self.speed,
        }
    }
}
