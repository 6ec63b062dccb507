//! Procedural rival spawning
//!
//! The spawner picks a random lane and sizes the rival relative to the lane
//! width, so rivals stay proportionate across viewports. Randomness comes
//! from an injected source; the step function controls the cadence.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, WorldState};

/// Rival width as a fraction of lane width
const WIDTH_RATIO_MIN: f32 = 0.5;
const WIDTH_RATIO_MAX: f32 = 0.58;
/// Rival height as a multiple of its width
const ASPECT_MIN: f32 = 1.4;
const ASPECT_MAX: f32 = 1.6;
/// Fall speed as a multiple of the current world speed - always faster than
/// the scroll baseline, so rivals visibly close on the player
const SPEED_RATIO_MIN: f32 = 1.05;
const SPEED_RATIO_MAX: f32 = 1.20;
/// Rendering hue range (blue through violet)
const HUE_MIN: f32 = 200.0;
const HUE_MAX: f32 = 320.0;
/// Extra clearance above the viewport so rivals scroll in fully formed
const SPAWN_Y_CLEARANCE: f32 = 20.0;

/// Create a rival in a random lane, fully above the visible area, and
/// append it to the world's obstacle collection.
pub fn spawn_obstacle(world: &mut WorldState, rng: &mut impl Rng) {
    let track = &world.track;
    let lane = rng.random_range(0..track.lane_count);
    let width = track.lane_width * rng.random_range(WIDTH_RATIO_MIN..WIDTH_RATIO_MAX);
    let height = width * rng.random_range(ASPECT_MIN..ASPECT_MAX);
    let fall_speed = world.speed * rng.random_range(SPEED_RATIO_MIN..SPEED_RATIO_MAX);
    let hue = rng.random_range(HUE_MIN..HUE_MAX).floor();

    world.obstacles.push(Obstacle {
        pos: Vec2::new(
            track.lane_center_x(lane) - width / 2.0,
            -height - SPAWN_Y_CLEARANCE,
        ),
        size: Vec2::new(width, height),
        fall_speed,
        hue,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Viewport;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> WorldState {
        WorldState::new(Viewport::new(640.0, 880.0, 1.0), 3)
    }

    #[test]
    fn spawned_rivals_are_lane_centered_and_off_screen() {
        let mut world = world();
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..64 {
            spawn_obstacle(&mut world, &mut rng);
        }

        for obstacle in &world.obstacles {
            let center = obstacle.pos.x + obstacle.size.x / 2.0;
            let lane = world.track.lane_for_center(center);
            let expected = world.track.lane_center_x(lane);
            assert!(
                (center - expected).abs() < 1e-3,
                "rival center {center} not aligned with lane center {expected}"
            );
            // Fully above the visible area
            assert!(obstacle.pos.y + obstacle.size.y <= -SPAWN_Y_CLEARANCE + 1e-3);
        }
    }

    #[test]
    fn spawn_policy_bounds_hold() {
        let mut world = world();
        let mut rng = Pcg32::seed_from_u64(11);
        let lane_width = world.track.lane_width;

        for _ in 0..64 {
            spawn_obstacle(&mut world, &mut rng);
        }

        // A hair of slack absorbs the multiply/divide rounding
        let eps = 1e-4;
        for obstacle in &world.obstacles {
            let width_ratio = obstacle.size.x / lane_width;
            assert!(width_ratio > WIDTH_RATIO_MIN - eps && width_ratio < WIDTH_RATIO_MAX + eps);

            let aspect = obstacle.size.y / obstacle.size.x;
            assert!(aspect > ASPECT_MIN - eps && aspect < ASPECT_MAX + eps);

            let speed_ratio = obstacle.fall_speed / world.speed;
            assert!(speed_ratio > SPEED_RATIO_MIN - eps && speed_ratio < SPEED_RATIO_MAX + eps);
            assert!(obstacle.fall_speed > world.speed);

            assert!(obstacle.hue >= HUE_MIN && obstacle.hue < HUE_MAX);
            assert_eq!(obstacle.hue, obstacle.hue.floor());
        }
    }

    #[test]
    fn same_seed_reproduces_the_spawn_sequence() {
        let mut a = world();
        let mut b = world();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);

        for _ in 0..16 {
            spawn_obstacle(&mut a, &mut rng_a);
            spawn_obstacle(&mut b, &mut rng_b);
        }

        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.size, ob.size);
            assert_eq!(oa.fall_speed, ob.fall_speed);
            assert_eq!(oa.hue, ob.hue);
        }
    }
}
