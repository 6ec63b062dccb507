//! Track and lane layout
//!
//! Geometry is a pure function of (viewport, lane count). On a resize the
//! previous geometry is consulted so the vehicle and every live obstacle
//! keep their lane, and stripes rescale proportionally - the canvas can
//! resize under a running simulation and the world must stay visually
//! continuous instead of being discarded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Stripe, Track, WorldState};
use crate::consts::*;

/// Smallest viewport the geometry accepts. A container measured before
/// layout can report zero or negative dimensions; clamping here keeps lane
/// widths finite and positive.
pub const MIN_VIEWPORT_WIDTH: f32 = 200.0;
pub const MIN_VIEWPORT_HEIGHT: f32 = 320.0;

/// Obstacle dimensions after a resize re-projection. The randomized spawn
/// sizing is not preserved across a resize; re-projected rivals snap to
/// these fixed ratios of the new lane width.
const RESIZED_OBSTACLE_WIDTH_RATIO: f32 = 0.54;
const RESIZED_OBSTACLE_ASPECT: f32 = 1.55;

/// Layout-space viewport, already capped by the host (width <= 760,
/// height in [520, 900], dpr <= 2)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio; only the host's canvas sizing consumes this, but
    /// it survives session resets alongside width/height
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self { width, height, dpr }
    }

    /// Clamp degenerate dimensions to a minimum sane size
    pub fn sane(self) -> Self {
        Self {
            width: self.width.max(MIN_VIEWPORT_WIDTH),
            height: self.height.max(MIN_VIEWPORT_HEIGHT),
            dpr: if self.dpr > 0.0 { self.dpr } else { 1.0 },
        }
    }
}

/// Compute the track layout for a viewport width. The track spans 62% of
/// the viewport, centered.
pub fn compute_track(viewport_width: f32, lane_count: usize) -> Track {
    debug_assert!(lane_count >= 1, "lane count must be at least 1");

    let lane_width = viewport_width * TRACK_WIDTH_RATIO / lane_count as f32;
    let width = lane_width * lane_count as f32;
    let left = (viewport_width - width) / 2.0;

    Track {
        lane_count,
        left,
        right: viewport_width - left,
        width,
        lane_width,
    }
}

/// Player vehicle dimensions for a lane width
pub fn vehicle_dims(lane_width: f32) -> Vec2 {
    let width = lane_width * VEHICLE_WIDTH_RATIO;
    Vec2::new(width, width * VEHICLE_ASPECT)
}

/// Resting y for the vehicle near the bottom edge
pub fn vehicle_rest_y(viewport_height: f32, vehicle_height: f32) -> f32 {
    viewport_height - vehicle_height - (viewport_height * 0.05).max(40.0)
}

/// Build the stripe pool: enough markers to cover the track height plus a
/// two-stripe buffer. The pool size never changes afterwards.
pub fn create_stripes(track_height: f32, spacing: f32) -> Vec<Stripe> {
    let count = (track_height / spacing).ceil() as usize + 2;
    (0..count)
        .map(|i| Stripe {
            y: i as f32 * spacing,
        })
        .collect()
}

/// Re-project a running world onto a new viewport.
///
/// The vehicle's lane index is recovered from its center in the old lane
/// grid, clamped, and mapped into the new grid; obstacles get the same
/// treatment. Stripe y coordinates rescale by `new_height / old_height`.
pub fn apply_resize(world: &mut WorldState, viewport: Viewport) {
    let viewport = viewport.sane();
    let prev_track = world.track.clone();
    let prev_height = world.viewport.height;

    let track = compute_track(viewport.width, prev_track.lane_count);

    let lane = prev_track.lane_for_center(world.vehicle.center_x());
    let size = vehicle_dims(track.lane_width);
    world.vehicle.size = size;
    world.vehicle.pos.x = track.lane_center_x(lane) - size.x / 2.0;
    world.vehicle.pos.y = vehicle_rest_y(viewport.height, size.y);
    world.vehicle.velocity_x = 0.0;

    for stripe in &mut world.stripes {
        stripe.y = stripe.y / prev_height * viewport.height;
    }

    for obstacle in &mut world.obstacles {
        let lane = prev_track.lane_for_center(obstacle.pos.x + obstacle.size.x / 2.0);
        let width = track.lane_width * RESIZED_OBSTACLE_WIDTH_RATIO;
        let height = width * RESIZED_OBSTACLE_ASPECT;
        obstacle.size = Vec2::new(width, height);
        obstacle.pos.x = track.lane_center_x(lane) - width / 2.0;
        obstacle.pos.y = obstacle.pos.y / prev_height * viewport.height;
    }

    world.track = track;
    world.viewport = viewport;
}
