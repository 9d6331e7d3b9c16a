//! Ray queries for weapon hit detection.

use crate::Aabb;
use sim_core::Vec3;

/// A ray with unit-length direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. Returns `None` when the
    /// direction is too short to normalize; callers treat that as a
    /// no-op shot rather than a fault.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// World position `distance` units along the ray.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Slab-method ray/box test.
    ///
    /// Returns the entry distance along the ray, `0.0` when the origin is
    /// already inside the box, `None` when the box is missed or lies fully
    /// behind the origin. Zero direction components divide to infinities,
    /// which the min/max folding absorbs.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t1 = (aabb.min - self.origin) * inv;
        let t2 = (aabb.max - self.origin) * inv;
        let near = t1.min(t2).max_element();
        let far = t1.max(t2).min_element();
        if near > far || far < 0.0 {
            return None;
        }
        Some(near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_box_ahead_at_entry_distance() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let target = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
        let toi = ray.intersect_aabb(&target).unwrap();
        assert!((toi - 9.0).abs() < 1e-5);
        assert!((ray.point_at(toi).z - -9.0).abs() < 1e-5);
    }

    #[test]
    fn misses_box_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let target = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
        assert!(ray.intersect_aabb(&target).is_none());
    }

    #[test]
    fn misses_box_off_axis() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let target = Aabb::from_center_half_extents(Vec3::new(5.0, 0.0, -10.0), Vec3::ONE);
        assert!(ray.intersect_aabb(&target).is_none());
    }

    #[test]
    fn origin_inside_box_reports_zero() {
        let ray = Ray::new(Vec3::new(0.2, 0.1, -0.3), Vec3::X).unwrap();
        let target = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert_eq!(ray.intersect_aabb(&target), Some(0.0));
    }

    #[test]
    fn degenerate_direction_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::ZERO, Vec3::splat(1e-30)).is_none());
    }

    #[test]
    fn axis_parallel_ray_respects_side_slabs() {
        // Travelling along -Z but offset 3 units on x: parallel slab must
        // still reject the box.
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), -Vec3::Z).unwrap();
        let target = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
        assert!(ray.intersect_aabb(&target).is_none());
    }
}
