//! Collision detection
//!
//! The player marker and obstacles are treated as points; they collide when
//! their centres are closer than a single combined radius.

use glam::Vec2;

/// Strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_collides() {
        let p = Vec2::new(400.0, 500.0);
        assert!(within_radius(p, p, 50.0));
    }

    #[test]
    fn test_boundary_is_a_miss() {
        let a = Vec2::new(0.0, 0.0);
        assert!(!within_radius(a, Vec2::new(30.0, 40.0), 50.0));
        assert!(within_radius(a, Vec2::new(30.0, 39.9), 50.0));
    }

    #[test]
    fn test_neighbouring_lanes_never_collide() {
        // Lanes are 200 apart, far outside the 50 radius
        let player = Vec2::new(400.0, 500.0);
        assert!(!within_radius(player, Vec2::new(600.0, 500.0), 50.0));
        assert!(!within_radius(player, Vec2::new(200.0, 500.0), 50.0));
    }
}
