//! Simulation tick
//!
//! Advances a run by one variable-length step in a fixed order: input,
//! score and speed, spawning, player physics, then obstacles.

use super::collision::{Rect, aabb_overlap};
use super::physics::{step_player, try_jump};
use super::state::{GameEvent, GamePhase, GameState};

/// Input intent sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (or start, while idle)
    pub jump: bool,
    /// Reset and start a new run regardless of phase
    pub restart: bool,
    /// Demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart || (state.phase == GamePhase::Idle && input.jump) {
        state.start_run();
        return;
    }

    if state.phase == GamePhase::Idle {
        return;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.tuning.max_step)
    } else {
        0.0
    };

    let wants_jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if wants_jump {
        try_jump(&mut state.player, &state.tuning);
    }

    state.score.accrue(dt, state.tuning.score_rate);
    state.speed += state.tuning.speed_ramp * dt;
    state.elapsed += dt;

    if let Some(spec) = state
        .spawn
        .update(dt, state.speed, &mut state.rng, &state.tuning)
    {
        let pos = glam::Vec2::new(state.tuning.spawn_x, state.tuning.ground_y - spec.size.y);
        state.obstacles.acquire(pos, spec.size);
        log::debug!(
            "Spawned {} obstacle {}x{} (pool: {} free / {} slots)",
            if spec.narrow { "narrow" } else { "wide" },
            spec.size.x,
            spec.size.y,
            state.obstacles.free_len(),
            state.obstacles.capacity()
        );
        state.push_event(GameEvent::ObstacleSpawned {
            width: spec.size.x,
            height: spec.size.y,
        });
    }

    let player_before = state.player.rect();
    step_player(&mut state.player, dt, &state.tuning);

    update_obstacles(state, dt, &player_before);
}

/// Scroll, collide, score and recycle every active obstacle.
///
/// Walks the active list back to front so swap-removal never skips an entry.
/// `player_before` is the player's box at the start of the tick.
fn update_obstacles(state: &mut GameState, dt: f32, player_before: &Rect) {
    let shift = state.speed * dt;
    let player_rect = state.player.rect();
    let player_x = state.player.pos.x;
    let margin = state.tuning.recycle_margin;

    for index in (0..state.obstacles.active_len()).rev() {
        let id = state.obstacles.active_id(index);
        let Some(obstacle) = state.obstacles.get_mut(id) else {
            continue;
        };

        obstacle.pos.x -= shift;

        // A fast obstacle can jump clean over the player's x-range in one
        // step, so also test the span it swept. That only counts when the
        // player overlaps the sweep both before and after its own move.
        let swept = obstacle.swept_rect(shift);
        let hit = aabb_overlap(&player_rect, &obstacle.rect())
            || (aabb_overlap(player_before, &swept) && aabb_overlap(&player_rect, &swept));
        if hit {
            log::info!(
                "Crashed after {:.1}s at speed {:.0} with score {}",
                state.elapsed,
                state.speed,
                state.score.display()
            );
            state.end_run();
            return;
        }

        let newly_passed = !obstacle.passed && obstacle.is_behind(player_x);
        if newly_passed {
            obstacle.passed = true;
        }
        let off_screen = obstacle.is_off_screen(margin);

        if newly_passed {
            state.score.award_pass(state.tuning.pass_bonus);
            state.push_event(GameEvent::ObstaclePassed);
        }

        if off_screen {
            state.obstacles.release_at(index);
            log::debug!("Recycled obstacle {:?}", id);
        }
    }
}

/// Jump when the nearest obstacle still ahead is about to reach the player
fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.on_ground {
        return false;
    }
    let front = state.player.pos.x + state.player.size.x;
    let lead = state.speed * state.tuning.autopilot_lead;

    state
        .obstacles
        .iter_active()
        .filter(|o| o.pos.x + o.size.x >= state.player.pos.x)
        .map(|o| o.pos.x - front)
        .any(|gap| gap <= lead)
}
