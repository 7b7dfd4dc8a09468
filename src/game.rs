//! Frame driver
//!
//! Owns the simulation state, the frame clock, the pending input intent and
//! the high-score store. Platforms feed it timestamps and intents and read
//! back snapshots.

use crate::highscore::HighScoreStore;
use crate::platform::{FrameClock, Intent};
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// A running game session
pub struct Game<S: HighScoreStore> {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    store: S,
}

impl<S: HighScoreStore> Game<S> {
    /// Load the best score once and start idle
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let high_score = store.load();
        log::info!("Session seed {}, high score {}", seed, high_score);
        Self {
            clock: FrameClock::new(tuning.max_step),
            state: GameState::new(tuning, seed, high_score),
            input: TickInput::default(),
            store,
        }
    }

    /// Apply an input intent at time `now_ms`.
    ///
    /// Starting a run happens immediately; a jump during a run is held until
    /// the next tick. Multiple jumps before a tick collapse into one.
    pub fn handle(&mut self, intent: Intent, now_ms: f64) {
        match intent {
            Intent::Jump if !self.state.is_running() => self.start_run(now_ms),
            Intent::Jump => self.input.jump = true,
            Intent::Restart => self.start_run(now_ms),
        }
    }

    /// Reset and begin a run, timing from `now_ms`.
    ///
    /// Goes through a zero-length restart tick so the state machine owns
    /// every phase change.
    pub fn start_run(&mut self, now_ms: f64) {
        self.input.jump = false;
        self.input.restart = true;
        tick(&mut self.state, &self.input, 0.0);
        self.input.restart = false;
        self.clock.reset(now_ms);
        self.flush_events();
    }

    /// Advance to `now_ms`. Returns whether another frame should be scheduled.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let dt = self.clock.delta(now_ms);
        self.step(dt)
    }

    /// Advance by `dt` seconds (clamped to the max step).
    /// Returns whether the run is still going.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.state.is_running() {
            tick(&mut self.state, &self.input, dt);
            self.input.jump = false;
            self.input.restart = false;
            self.flush_events();
        }
        self.state.is_running()
    }

    /// Let the autopilot play
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::RunStarted { run } => log::info!("Run {} started", run),
                GameEvent::ObstacleSpawned { .. } | GameEvent::ObstaclePassed => {}
                GameEvent::GameOver {
                    score,
                    high_score,
                    new_record,
                } => {
                    if new_record {
                        log::info!("New high score: {}", high_score);
                        self.store.save(high_score);
                    } else {
                        log::info!("Game over: {} (best {})", score, high_score);
                    }
                }
            }
        }
    }
}
