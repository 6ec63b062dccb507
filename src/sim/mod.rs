//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per scheduled frame, driven by the session controller
//! - Seeded RNG only (the spawner takes an injected source)
//! - No rendering or platform dependencies
//! - `WorldState` has exactly one writer: `step`

pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod step;

pub use collision::collides;
pub use geometry::{Viewport, apply_resize, compute_track};
pub use spawn::spawn_obstacle;
pub use state::{BoostState, Obstacle, Stripe, Track, Vehicle, WorldState};
pub use step::{StepResult, step};
