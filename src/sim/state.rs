//! World state and core simulation types
//!
//! Everything the step function mutates lives here. The aggregate has a
//! single writer (`sim::step::step`) and is observed read-only by the
//! render sink after each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{self, Viewport};
use crate::consts::*;

/// The player car. Position is the top-left corner in layout units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Lateral velocity (layout units per normalized frame)
    pub velocity_x: f32,
}

impl Vehicle {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A rival car scrolling down the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed, independent of the global scroll speed
    pub fall_speed: f32,
    /// Hue in degrees, used only by the render sink
    pub hue: f32,
}

/// A scrolling lane-divider marker. Only the y coordinate moves; the pool
/// size is fixed for the lifetime of the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stripe {
    pub y: f32,
}

/// Track layout derived from the viewport. Invariants:
/// `right - left == width` and `width == lane_count * lane_width`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub lane_count: usize,
    pub left: f32,
    pub right: f32,
    pub width: f32,
    pub lane_width: f32,
}

impl Track {
    /// Center x of a lane
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        self.left + self.lane_width * lane as f32 + self.lane_width / 2.0
    }

    /// Lane index whose span contains the given center x, clamped to the
    /// valid range
    pub fn lane_for_center(&self, center_x: f32) -> usize {
        let raw = ((center_x - self.left) / self.lane_width).floor();
        (raw.max(0.0) as usize).min(self.lane_count - 1)
    }
}

/// Consumable boost resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostState {
    /// Charge in [0, 100]
    pub value: f32,
    pub active: bool,
}

impl Default for BoostState {
    fn default() -> Self {
        Self {
            value: 100.0,
            active: false,
        }
    }
}

/// The authoritative simulation snapshot for one session. Created fresh on
/// every start; never reused across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub viewport: Viewport,
    pub vehicle: Vehicle,
    pub track: Track,
    pub stripes: Vec<Stripe>,
    pub obstacles: Vec<Obstacle>,
    /// Last frame timestamp in ms (0 = no frame seen yet)
    pub last_timestamp: f64,
    /// Raw milliseconds accumulated since the last spawn
    pub spawn_elapsed: f32,
    /// Current speed, eased toward `target_speed`
    pub speed: f32,
    /// Session-constant floor
    pub base_speed: f32,
    pub target_speed: f32,
    /// Monotonically non-decreasing; doubles as the score
    pub distance: f32,
    pub boost: BoostState,
    /// Post-collision visual countdown (raw ms), render-only
    pub flash_timer: f32,
    /// Spawner gate, true in normal play
    pub spawn_enabled: bool,
}

impl WorldState {
    /// Build a fresh world from the current viewport. The vehicle starts
    /// centered in the middle lane with a full boost charge.
    pub fn new(viewport: Viewport, lane_count: usize) -> Self {
        let viewport = viewport.sane();
        let track = geometry::compute_track(viewport.width, lane_count);
        let size = geometry::vehicle_dims(track.lane_width);

        let lane = lane_count / 2;
        let vehicle = Vehicle {
            pos: Vec2::new(
                track.lane_center_x(lane) - size.x / 2.0,
                geometry::vehicle_rest_y(viewport.height, size.y),
            ),
            size,
            velocity_x: 0.0,
        };

        let spacing = track.lane_width * STRIPE_SPACING_RATIO;
        Self {
            stripes: geometry::create_stripes(viewport.height, spacing),
            viewport,
            vehicle,
            track,
            obstacles: Vec::new(),
            last_timestamp: 0.0,
            spawn_elapsed: 0.0,
            speed: BASE_SPEED,
            base_speed: BASE_SPEED,
            target_speed: BASE_SPEED,
            distance: 0.0,
            boost: BoostState::default(),
            flash_timer: 0.0,
            spawn_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_world_starts_in_middle_lane() {
        let world = WorldState::new(Viewport::new(640.0, 880.0, 1.0), 3);
        assert_eq!(world.track.lane_for_center(world.vehicle.center_x()), 1);
        assert_eq!(world.distance, 0.0);
        assert_eq!(world.boost.value, 100.0);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn lane_for_center_clamps_out_of_track_positions() {
        let world = WorldState::new(Viewport::new(640.0, 880.0, 1.0), 3);
        assert_eq!(world.track.lane_for_center(-500.0), 0);
        assert_eq!(world.track.lane_for_center(5000.0), 2);
    }
}
