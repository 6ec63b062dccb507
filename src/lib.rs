//! Neon Sprint - a lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, spawning, collisions, the
//!   per-frame step)
//! - `session`: Game session lifecycle (Idle -> Running -> Crashed)
//! - `input`: Logical button state fed into the simulation
//! - `highscore`: Best-distance persistence (LocalStorage on web)
//! - `render`: Canvas 2D render sink (wasm only, read-only observer)

pub mod highscore;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod sim;

pub use input::{Button, InputState};
pub use session::{GameSession, SessionPhase};

/// Game configuration constants
pub mod consts {
    /// Default number of lanes per session
    pub const LANE_COUNT: usize = 3;
    /// Session-constant speed floor
    pub const BASE_SPEED: f32 = 6.2;

    /// Reference frame duration (60 Hz) used to normalize elapsed time
    pub const FRAME_MS: f32 = 16.666;
    /// Normalized dt bounds - slow frames advance faster, but a stalled tab
    /// never produces a catastrophic jump
    pub const DT_MIN: f32 = 0.4;
    pub const DT_MAX: f32 = 1.8;

    /// Track occupies this fraction of the viewport width, centered
    pub const TRACK_WIDTH_RATIO: f32 = 0.62;
    /// Vehicle width as a fraction of lane width
    pub const VEHICLE_WIDTH_RATIO: f32 = 0.58;
    /// Vehicle height = width * this
    pub const VEHICLE_ASPECT: f32 = 1.6;

    /// Steering acceleration per normalized frame, as a fraction of lane width
    pub const STEER_ACCEL_RATIO: f32 = 0.012;
    /// Lateral velocity cap, as a fraction of lane width
    pub const MAX_VELOCITY_RATIO: f32 = 0.22;
    /// Exponential decay applied to lateral velocity with no steer input
    pub const FRICTION: f32 = 0.86;
    /// Velocity multiplier on hitting a track boundary (inverted + damped)
    pub const BOUNCE_DAMPING: f32 = -0.25;

    /// Boost drain rate per normalized frame while engaged
    pub const BOOST_DRAIN: f32 = 2.2;
    /// Boost regeneration rate per normalized frame (slower than drain)
    pub const BOOST_REGEN: f32 = 0.9;
    /// Flat speed bonus while boost is engaged
    pub const BOOST_BONUS: f32 = 5.2;

    /// Distance divisor for the difficulty curve
    pub const DISTANCE_CURVE_DIVISOR: f32 = 2200.0;
    /// Cap on the distance-derived speed bonus
    pub const DISTANCE_FACTOR_MAX: f32 = 8.0;
    /// First-order lag factor easing speed toward its target
    pub const SPEED_EASE: f32 = 0.06;
    /// World units scrolled per speed unit per normalized frame
    pub const SCROLL_FACTOR: f32 = 12.0;
    /// Distance (score) accumulated per speed unit per normalized frame
    pub const DISTANCE_RATE: f32 = 0.95;

    /// Stripe spacing as a multiple of lane width
    pub const STRIPE_SPACING_RATIO: f32 = 2.2;
    /// Stripe length as a fraction of stripe spacing
    pub const STRIPE_LENGTH_RATIO: f32 = 0.52;

    /// Spawn interval ceiling at distance 0 (milliseconds)
    pub const SPAWN_INTERVAL_MAX_MS: f32 = 900.0;
    /// Spawn interval floor (milliseconds)
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 380.0;
    /// Interval shrinks by this many ms per distance unit
    pub const SPAWN_INTERVAL_SLOPE: f32 = 0.45;

    /// Inward margin applied to obstacle bounds during collision tests
    pub const COLLISION_MARGIN: f32 = 6.0;
    /// Post-collision flash duration (raw milliseconds, not normalized)
    pub const FLASH_MS: f32 = 220.0;

    /// Host-side viewport caps
    pub const VIEWPORT_MAX_WIDTH: f32 = 760.0;
    pub const VIEWPORT_MIN_HEIGHT: f32 = 520.0;
    pub const VIEWPORT_MAX_HEIGHT: f32 = 900.0;
    /// Device pixel ratio cap
    pub const MAX_DPR: f32 = 2.0;
}

/// Clamp a value to [min, max]
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max)
}
