use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// Axis-aligned box in world space, described the way a box collider is:
/// a center and a full size per axis.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct BoxVolume {
    pub center: Point3<f32>,
    pub size: Vector3<f32>,
}

impl BoxVolume {
    pub fn new(center: Point3<f32>, size: Vector3<f32>) -> Self {
        Self { center, size }
    }

    /// Create from two opposite corners, in any order
    pub fn from_min_max(a: Point3<f32>, b: Point3<f32>) -> Self {
        let min = a.inf(&b);
        let max = a.sup(&b);
        Self {
            center: nalgebra::center(&min, &max),
            size: max - min,
        }
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        self.size * 0.5
    }

    pub fn min(&self) -> Point3<f32> {
        self.center - self.half_extents()
    }

    pub fn max(&self) -> Point3<f32> {
        self.center + self.half_extents()
    }

    pub fn contains(&self, point: &Point3<f32>) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|axis| point[axis] >= min[axis] && point[axis] <= max[axis])
    }

    /// Push the point up to the lower bound, then down to the upper bound,
    /// one axis at a time. For an inverted box the upper bound wins.
    pub fn clamp_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let (min, max) = (self.min(), self.max());
        let mut clamped = *point;
        for axis in 0..3 {
            clamped[axis] = clamped[axis].max(min[axis]);
            clamped[axis] = clamped[axis].min(max[axis]);
        }
        clamped
    }
}
