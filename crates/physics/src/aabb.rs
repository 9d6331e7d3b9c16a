//! Axis-aligned bounding boxes.

use sim_core::{Quat, Vec3};

/// Axis-aligned box, stored as component-wise min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half_extents` along each axis.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Tightest axis-aligned box around an oriented box.
    ///
    /// Uses the absolute-rotation-matrix trick: each world half-extent is the
    /// rotated local extents with all matrix entries made positive.
    pub fn of_rotated_box(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        let x = rotation * Vec3::new(half_extents.x, 0.0, 0.0);
        let y = rotation * Vec3::new(0.0, half_extents.y, 0.0);
        let z = rotation * Vec3::new(0.0, 0.0, half_extents.z);
        let world_half = x.abs() + y.abs() + z.abs();
        Self::from_center_half_extents(center, world_half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}
