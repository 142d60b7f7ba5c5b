//! Ray probe against world geometry
//!
//! The engine consumes intersection results; it does not own a physics
//! engine. [`Probe`] is the seam, and [`ray_sphere`] is the primitive the
//! bundled [`Scene`](super::Scene) uses to answer it.

use crate::core::types::InteractableId;
use glam::Vec3;

/// What a probe ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Interactable(InteractableId),
    /// Non-interactable geometry (index into the scene's obstacles)
    Obstacle(usize),
}

/// Nearest surface along a probe ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub target: HitTarget,
    pub point: Vec3,
    pub distance: f32,
}

/// Bounded-distance ray intersection service
pub trait Probe {
    /// Nearest hit within `max_distance` of `origin` along `direction`
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ProbeHit>;
}

/// Distance along a normalized ray to a sphere, or None if it misses.
/// Origins inside the sphere hit at distance 0.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(direction);
    let c = m.length_squared() - radius * radius;

    // Outside and pointing away
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_sphere_front_face() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_sideways_sphere() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(3.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_at_zero() {
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -0.2), 1.0).unwrap();
        assert_eq!(t, 0.0);
    }
}
