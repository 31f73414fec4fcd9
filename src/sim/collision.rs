//! Collision tests and boundary response for circular entities

use std::f32::consts::PI;

use glam::Vec2;

use super::state::{Entity, Vector2};
use crate::normalize_angle;

/// Two circles collide when their centers are strictly closer than the sum
/// of their radii; touching is not a hit.
#[inline]
pub fn circles_overlap(a_pos: Vector2, a_radius: f32, b_pos: Vector2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Circle-circle test between any two entities
#[inline]
pub fn entities_collide(a: &impl Entity, b: &impl Entity) -> bool {
    circles_overlap(a.position(), a.radius(), b.position(), b.radius())
}

/// Clamp a circle's center so the whole circle stays on the canvas
#[inline]
pub fn clamp_to_bounds(pos: Vector2, radius: f32, bounds: Vector2) -> Vector2 {
    let min = Vec2::splat(radius);
    // A canvas smaller than the circle pins it to the near edge
    let max = (bounds - Vec2::splat(radius)).max(min);
    pos.clamp(min, max)
}

/// Bounce a heading off the canvas edges
///
/// Touching a left/right bound while heading outward gives `π - heading`;
/// touching top/bottom gives `-heading`. At a corner both apply, so the
/// heading turns around completely. The returned position is clamped
/// back inside the bounds.
pub fn reflect_in_bounds(pos: Vector2, radius: f32, heading: f32, bounds: Vector2) -> (Vector2, f32) {
    let dir = crate::direction_from_angle(heading);
    let mut new_heading = heading;

    let hit_left = pos.x <= radius && dir.x < 0.0;
    let hit_right = pos.x >= bounds.x - radius && dir.x > 0.0;
    if hit_left || hit_right {
        new_heading = PI - new_heading;
    }

    let hit_top = pos.y <= radius && dir.y < 0.0;
    let hit_bottom = pos.y >= bounds.y - radius && dir.y > 0.0;
    if hit_top || hit_bottom {
        new_heading = -new_heading;
    }

    if new_heading != heading {
        new_heading = normalize_angle(new_heading);
    }

    (clamp_to_bounds(pos, radius, bounds), new_heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_circles_touching_do_not_collide() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(33.0, 0.0);
        assert!(!circles_overlap(a, 8.0, b, 25.0));
        assert!(circles_overlap(a, 8.0, Vec2::new(32.9, 0.0), 25.0));
    }

    #[test]
    fn test_clamp_to_bounds_keeps_circle_inside() {
        let bounds = Vec2::new(100.0, 50.0);
        assert_eq!(clamp_to_bounds(Vec2::new(-5.0, 70.0), 10.0, bounds), Vec2::new(10.0, 40.0));
        assert_eq!(clamp_to_bounds(Vec2::new(50.0, 25.0), 10.0, bounds), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_reflect_left_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        let heading = PI - 0.4; // left and down
        let (pos, new_heading) = reflect_in_bounds(Vec2::new(20.0, 300.0), 25.0, heading, bounds);
        assert!((new_heading - 0.4).abs() < 1e-5);
        assert_eq!(pos.x, 25.0);
    }

    #[test]
    fn test_reflect_top_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        let (_, new_heading) = reflect_in_bounds(Vec2::new(400.0, 25.0), 25.0, -FRAC_PI_2, bounds);
        assert!((new_heading - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_reflect_corner_reverses_heading() {
        let bounds = Vec2::new(800.0, 600.0);
        let heading = FRAC_PI_4; // toward bottom-right
        let (_, new_heading) = reflect_in_bounds(Vec2::new(780.0, 580.0), 25.0, heading, bounds);
        let dir = crate::direction_from_angle(new_heading);
        assert!((dir - Vec2::new(-1.0, -1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_no_reflect_when_leaving_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        // On the right edge but already heading back in
        let (_, new_heading) = reflect_in_bounds(Vec2::new(775.0, 300.0), 25.0, PI, bounds);
        assert_eq!(new_heading, PI);
    }

    proptest! {
        #[test]
        fn prop_collision_boundary(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            angle in -PI..PI,
            ar in 1.0f32..50.0, br in 1.0f32..50.0,
            gap in 0.01f32..20.0,
        ) {
            let a = Vec2::new(ax, ay);
            let dir = Vec2::new(angle.cos(), angle.sin());
            let inside = a + dir * (ar + br - gap.min(ar + br - 0.01));
            let outside = a + dir * (ar + br + gap);
            prop_assert!(circles_overlap(a, ar, inside, br));
            prop_assert!(!circles_overlap(a, ar, outside, br));
        }

        #[test]
        fn prop_reflected_position_in_bounds(
            x in -100.0f32..900.0, y in -100.0f32..700.0, heading in -PI..PI,
        ) {
            let bounds = Vec2::new(800.0, 600.0);
            let (pos, _) = reflect_in_bounds(Vec2::new(x, y), 25.0, heading, bounds);
            prop_assert!(pos.x >= 25.0 && pos.x <= 775.0);
            prop_assert!(pos.y >= 25.0 && pos.y <= 575.0);
        }
    }
}
