mod collider;
mod scene;

pub use collider::*;
pub use scene::*;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// Bit set of collision layers, one bit per layer (0..32)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask selecting a single layer
    pub const fn layer(layer: u8) -> Self {
        LayerMask(1 << (layer as u32 & 31))
    }

    pub fn with_layer(self, layer: u8) -> Self {
        LayerMask(self.0 | Self::layer(layer).0)
    }

    pub fn contains_layer(&self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Represents a ray in 3D space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>, // Should be normalized
}

impl Ray {
    /// Create a new ray with a normalized direction
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Straight down from `origin`
    pub fn down(origin: Point3<f32>) -> Self {
        Self {
            origin,
            direction: -Vector3::y(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    /// The hit point in world space
    pub point: Point3<f32>,
    /// Surface normal at the hit point
    pub normal: Vector3<f32>,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Layer of the collider that was hit
    pub layer: u8,
}

/// Ray-vs-scene intersection service
pub trait SpatialQuery {
    /// Nearest hit within `max_distance` among surfaces whose layer is in `mask`
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RaycastHit>;
}
