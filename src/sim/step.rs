//! The per-frame simulation step
//!
//! Advances the world by one scheduled frame. Physics integrates against a
//! normalized, clamped dt so a stalled tab cannot teleport the world, while
//! the spawn accumulator and the crash flash consume raw wall-clock
//! milliseconds - pacing and visual timers track real time, physics does
//! not. That asymmetry is deliberate.

use rand::Rng;

use super::collision::collides;
use super::spawn::spawn_obstacle;
use super::state::WorldState;
use crate::clamp;
use crate::consts::*;
use crate::input::InputState;

/// Obstacles advance at a blend of the global scroll and their own fall
/// speed differential
const OBSTACLE_DRIFT_BASE: f32 = 0.82;
const OBSTACLE_DRIFT_SCALE: f32 = 4.0;

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    /// Terminal: the vehicle hit a rival this frame
    Crashed,
}

/// Advance the world by one frame.
///
/// `elapsed_ms` is the raw wall-clock time since the previous step. On a
/// crash the function returns immediately after arming the flash timer;
/// nothing else mutates past that point in the same invocation.
pub fn step(
    world: &mut WorldState,
    elapsed_ms: f32,
    input: &InputState,
    rng: &mut impl Rng,
) -> StepResult {
    let dt = clamp(elapsed_ms / FRAME_MS, DT_MIN, DT_MAX);

    // Steering: accelerate toward the held direction, otherwise bleed
    // velocity off exponentially rather than stopping dead
    let acceleration = world.track.lane_width * STEER_ACCEL_RATIO;
    let max_velocity = world.track.lane_width * MAX_VELOCITY_RATIO;

    let vehicle = &mut world.vehicle;
    if input.steer_left {
        vehicle.velocity_x -= acceleration * dt;
    } else if input.steer_right {
        vehicle.velocity_x += acceleration * dt;
    } else {
        vehicle.velocity_x *= FRICTION;
    }
    vehicle.velocity_x = clamp(vehicle.velocity_x, -max_velocity, max_velocity);
    vehicle.pos.x += vehicle.velocity_x * dt;

    // Boundary clamp with a damped bounce-back
    let left_limit = world.track.left + vehicle.size.x * 0.1;
    let right_limit = world.track.right - vehicle.size.x * 1.1;
    if vehicle.pos.x < left_limit {
        vehicle.pos.x = left_limit;
        vehicle.velocity_x *= BOUNCE_DAMPING;
    } else if vehicle.pos.x > right_limit {
        vehicle.pos.x = right_limit;
        vehicle.velocity_x *= BOUNCE_DAMPING;
    }

    // Boost drains while engaged and regenerates (slower) otherwise, so the
    // resource stays scarce. At zero charge the regen branch runs even with
    // the key held.
    let boost = &mut world.boost;
    if input.boost && boost.value > 0.0 {
        boost.active = true;
        boost.value = clamp(boost.value - dt * BOOST_DRAIN, 0.0, 100.0);
    } else {
        boost.active = false;
        boost.value = clamp(boost.value + dt * BOOST_REGEN, 0.0, 100.0);
    }

    // Speed eases toward its target instead of jumping on boost toggles
    let distance_factor = clamp(
        world.distance / DISTANCE_CURVE_DIVISOR,
        0.0,
        DISTANCE_FACTOR_MAX,
    );
    let boost_bonus = if world.boost.active { BOOST_BONUS } else { 0.0 };
    world.target_speed = world.base_speed + distance_factor + boost_bonus;
    world.speed += (world.target_speed - world.speed) * SPEED_EASE * dt;

    let track_movement = world.speed * dt * SCROLL_FACTOR;
    world.distance += world.speed * dt * DISTANCE_RATE;

    // Stripes scroll as a rigid ring: a stripe past the bottom wraps back by
    // the pool's full span, preserving even spacing
    let stripe_spacing = world.track.lane_width * STRIPE_SPACING_RATIO;
    let stripe_length = stripe_spacing * STRIPE_LENGTH_RATIO;
    let pool_span = stripe_spacing * world.stripes.len() as f32;
    for stripe in &mut world.stripes {
        stripe.y += track_movement;
        if stripe.y - stripe_length > world.viewport.height {
            stripe.y -= pool_span;
        }
    }

    // Spawn pacing runs on raw milliseconds; the interval tightens with
    // distance down to a floor
    if world.spawn_enabled {
        world.spawn_elapsed += elapsed_ms;
        let spawn_interval = clamp(
            SPAWN_INTERVAL_MAX_MS - world.distance * SPAWN_INTERVAL_SLOPE,
            SPAWN_INTERVAL_MIN_MS,
            SPAWN_INTERVAL_MAX_MS,
        );
        if world.spawn_elapsed >= spawn_interval {
            world.spawn_elapsed = 0.0;
            spawn_obstacle(world, rng);
        }
    }

    // Advance rivals; retire any whose top edge has fallen a full body
    // height past the bottom
    let safe_speed = world.speed.max(0.1);
    let height = world.viewport.height;
    world.obstacles.retain_mut(|obstacle| {
        obstacle.pos.y += track_movement
            * (OBSTACLE_DRIFT_BASE + obstacle.fall_speed / (safe_speed * OBSTACLE_DRIFT_SCALE));
        obstacle.pos.y < height + obstacle.size.y
    });

    // First hit is terminal; ordering among simultaneous overlaps is
    // irrelevant
    for obstacle in &world.obstacles {
        if collides(&world.vehicle, obstacle) {
            world.flash_timer = FLASH_MS;
            return StepResult::Crashed;
        }
    }

    if world.flash_timer > 0.0 {
        world.flash_timer = (world.flash_timer - elapsed_ms).max(0.0);
    }

    StepResult::Continue
}
