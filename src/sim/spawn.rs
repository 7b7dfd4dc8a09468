//! Obstacle spawning
//!
//! A countdown timer decides when; a weighted coin flip decides what.

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

/// Dimensions rolled for a new obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub size: Vec2,
    pub narrow: bool,
}

/// Countdown-driven spawner
#[derive(Debug, Clone, Default)]
pub struct SpawnController {
    /// Seconds until the next spawn
    pub countdown: f32,
}

impl SpawnController {
    /// A controller that spawns on the first tick
    pub fn new() -> Self {
        Self { countdown: 0.0 }
    }

    pub fn reset(&mut self) {
        self.countdown = 0.0;
    }

    /// Advance the countdown. When it runs out, roll an obstacle and rearm
    /// with an interval that shrinks as `speed` grows.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        speed: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<ObstacleSpec> {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }
        let spec = roll_obstacle(rng, tuning);
        self.countdown = next_interval(rng, speed, tuning);
        Some(spec)
    }
}

/// 40% narrow, otherwise wide. Height is independent of the width class.
pub fn roll_obstacle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> ObstacleSpec {
    let narrow = rng.random_bool(tuning.narrow_chance);
    let w = if narrow {
        tuning.narrow_width.sample(rng)
    } else {
        tuning.wide_width.sample(rng)
    };
    let h = tuning.obstacle_height.sample(rng);
    ObstacleSpec {
        size: Vec2::new(w, h),
        narrow,
    }
}

/// Base interval minus a capped speed reduction, never below the floor.
pub fn next_interval<R: Rng + ?Sized>(rng: &mut R, speed: f32, tuning: &Tuning) -> f32 {
    let base = tuning.spawn_interval.sample(rng);
    let reduction = (speed / tuning.spawn_speed_divisor).min(tuning.spawn_max_reduction);
    (base - reduction).max(tuning.spawn_interval_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_update_spawns() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = SpawnController::new();
        assert!(spawner.update(1.0 / 60.0, 240.0, &mut rng, &tuning).is_some());
        assert!(spawner.countdown > 0.0);
    }

    #[test]
    fn test_countdown_gates_spawns() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut spawner = SpawnController { countdown: 0.5 };
        assert!(spawner.update(0.2, 240.0, &mut rng, &tuning).is_none());
        assert!(spawner.update(0.2, 240.0, &mut rng, &tuning).is_none());
        assert!(spawner.update(0.2, 240.0, &mut rng, &tuning).is_some());
    }

    #[test]
    fn test_dimensions_within_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let (mut narrow, mut wide) = (0, 0);
        for _ in 0..2000 {
            let spec = roll_obstacle(&mut rng, &tuning);
            if spec.narrow {
                narrow += 1;
                assert!(tuning.narrow_width.contains(spec.size.x));
            } else {
                wide += 1;
                assert!(tuning.wide_width.contains(spec.size.x));
            }
            assert!(tuning.obstacle_height.contains(spec.size.y));
        }
        // Roughly 40 / 60
        assert!((600..1000).contains(&narrow), "narrow = {narrow}");
        assert!(wide > narrow);
    }

    #[test]
    fn test_interval_shrinks_with_speed() {
        let tuning = Tuning::default();
        let slow = next_interval(&mut Pcg32::seed_from_u64(4), 0.0, &tuning);
        let fast = next_interval(&mut Pcg32::seed_from_u64(4), 300.0, &tuning);
        assert!((slow - fast - 0.3).abs() < 1e-5);

        // Reduction is capped at 0.5
        let capped = next_interval(&mut Pcg32::seed_from_u64(4), 5000.0, &tuning);
        assert!((slow - capped - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_interval_floor_holds_with_aggressive_tuning() {
        let tuning = Tuning {
            spawn_max_reduction: 10.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let interval = next_interval(&mut rng, 100_000.0, &tuning);
            assert_eq!(interval, tuning.spawn_interval_floor);
        }
    }

    proptest! {
        #[test]
        fn prop_interval_positive(seed in any::<u64>(), speed in 0.0f32..100_000.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let interval = next_interval(&mut rng, speed, &tuning);
            prop_assert!(interval >= tuning.spawn_interval_floor);
            prop_assert!(interval > 0.0);
            prop_assert!(interval < tuning.spawn_interval.max);
        }
    }
}
