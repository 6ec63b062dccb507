//! Player/rival collision detection
//!
//! Axis-aligned overlap with an inward margin on the rival's bounds, so a
//! pixel-perfect graze reads as a near miss instead of a crash. The margin
//! applies to the obstacle only, never the vehicle, and an overlap that the
//! margin fully consumes counts as a miss.

use super::state::{Obstacle, Vehicle};
use crate::consts::COLLISION_MARGIN;

/// True if the vehicle overlaps the obstacle's margin-shrunk hitbox
pub fn collides(vehicle: &Vehicle, obstacle: &Obstacle) -> bool {
    !(vehicle.pos.x + vehicle.size.x <= obstacle.pos.x + COLLISION_MARGIN
        || vehicle.pos.x >= obstacle.pos.x + obstacle.size.x - COLLISION_MARGIN
        || vehicle.pos.y + vehicle.size.y <= obstacle.pos.y + COLLISION_MARGIN
        || vehicle.pos.y >= obstacle.pos.y + obstacle.size.y - COLLISION_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn vehicle() -> Vehicle {
        Vehicle {
            pos: Vec2::ZERO,
            size: Vec2::new(40.0, 60.0),
            velocity_x: 0.0,
        }
    }

    fn obstacle(x: f32, y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(40.0, 60.0),
            fall_speed: 7.0,
            hue: 250.0,
        }
    }

    #[test]
    fn six_unit_overlap_is_forgiven() {
        // 6 units of x overlap, fully consumed by the margin
        assert!(!collides(&vehicle(), &obstacle(34.0, 50.0)));
    }

    #[test]
    fn twelve_unit_overlap_crashes() {
        assert!(collides(&vehicle(), &obstacle(28.0, 50.0)));
    }

    #[test]
    fn fully_separated_rects_miss() {
        assert!(!collides(&vehicle(), &obstacle(100.0, 0.0)));
        assert!(!collides(&vehicle(), &obstacle(0.0, 200.0)));
    }

    #[test]
    fn contained_rival_hits() {
        let mut car = vehicle();
        car.size = Vec2::new(200.0, 200.0);
        assert!(collides(&car, &obstacle(80.0, 70.0)));
    }

    #[test]
    fn overlap_just_past_the_margin_crashes() {
        // Vehicle right edge at 40; the shrunk rival box starts at x + 6
        assert!(collides(&vehicle(), &obstacle(33.9, 0.0)));
        assert!(!collides(&vehicle(), &obstacle(34.0, 0.0)));
    }

    #[test]
    fn vertical_margin_behaves_like_horizontal() {
        // 6 units of y overlap only
        assert!(!collides(&vehicle(), &obstacle(0.0, 54.0)));
        assert!(collides(&vehicle(), &obstacle(0.0, 48.0)));
    }
}
