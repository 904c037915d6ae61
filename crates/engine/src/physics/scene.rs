use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct SceneCollider {
    pub collider: Collider,
    pub layer: u8,
}

/// Immovable colliders the camera rig can query against
#[derive(Resource, Clone, Debug, Default)]
pub struct StaticScene {
    colliders: Vec<SceneCollider>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collider(mut self, layer: u8, collider: Collider) -> Self {
        self.add(layer, collider);
        self
    }

    pub fn add(&mut self, layer: u8, collider: Collider) {
        self.colliders.push(SceneCollider { collider, layer });
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SpatialQuery for StaticScene {
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RaycastHit> {
        self.colliders
            .iter()
            .filter(|entry| mask.contains_layer(entry.layer))
            .filter_map(|entry| {
                entry
                    .collider
                    .raycast(ray, max_distance)
                    .map(|hit| RaycastHit {
                        point: hit.point,
                        normal: hit.normal,
                        distance: hit.distance,
                        layer: entry.layer,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
