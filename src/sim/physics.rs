//! Player physics: gravity integration, ground clamp, jumping

use super::state::Player;
use crate::tuning::Tuning;

/// Integrate gravity for one step and resolve ground contact.
///
/// Semi-implicit Euler: velocity first, then position with the new velocity.
pub fn step_player(player: &mut Player, dt: f32, tuning: &Tuning) {
    let ground = tuning.player_ground_level();

    player.vy += tuning.gravity * dt;
    player.pos.y += player.vy * dt;

    if player.pos.y >= ground {
        player.pos.y = ground;
        player.vy = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }
}

/// Launch the player if grounded. Airborne requests are dropped, not buffered.
///
/// Returns whether the jump took effect.
pub fn try_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.on_ground {
        return false;
    }
    player.vy = -tuning.jump_impulse;
    player.on_ground = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded(tuning: &Tuning) -> Player {
        Player::new(tuning)
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        for _ in 0..60 {
            step_player(&mut player, 1.0 / 60.0, &tuning);
        }
        assert_eq!(player.pos.y, tuning.player_ground_level());
        assert_eq!(player.vy, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_jump_reaches_apex_and_lands() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        assert!(try_jump(&mut player, &tuning));
        assert_eq!(player.vy, -720.0);

        let dt = 0.01;
        for _ in 0..45 {
            step_player(&mut player, dt, &tuning);
        }
        // -720 + 1600 * 0.45 = 0
        assert!(player.vy.abs() < 0.01, "vy at apex = {}", player.vy);
        assert!(!player.on_ground);
        assert!(player.pos.y < tuning.player_ground_level() - 100.0);

        let mut landed_after = None;
        for i in 0..200 {
            step_player(&mut player, dt, &tuning);
            if player.on_ground {
                landed_after = Some(i);
                break;
            }
        }
        assert!(landed_after.is_some());
        assert_eq!(player.pos.y, tuning.player_ground_level());
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        assert!(try_jump(&mut player, &tuning));
        step_player(&mut player, 0.1, &tuning);
        let vy = player.vy;
        assert!(!try_jump(&mut player, &tuning));
        assert_eq!(player.vy, vy);
    }

    proptest! {
        #[test]
        fn prop_ground_clamp(
            y in -400.0f32..220.0,
            vy in -1000.0f32..1000.0,
            dt in 0.0f32..=0.033,
        ) {
            let tuning = Tuning::default();
            let mut player = grounded(&tuning);
            player.pos.y = y;
            player.vy = vy;
            player.on_ground = false;

            step_player(&mut player, dt, &tuning);

            let ground = tuning.player_ground_level();
            prop_assert!(player.pos.y <= ground);
            if player.on_ground {
                prop_assert_eq!(player.pos.y, ground);
                prop_assert_eq!(player.vy, 0.0);
            } else {
                prop_assert_eq!(player.vy, vy + tuning.gravity * dt);
            }
        }

        #[test]
        fn prop_airborne_jump_is_noop(vy in -1000.0f32..1000.0, y in -400.0f32..200.0) {
            let tuning = Tuning::default();
            let mut player = grounded(&tuning);
            player.pos.y = y;
            player.vy = vy;
            player.on_ground = false;

            prop_assert!(!try_jump(&mut player, &tuning));
            prop_assert_eq!(player.vy, vy);
            prop_assert!(!player.on_ground);
        }
    }
}
