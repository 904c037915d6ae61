use crate::prelude::*;

/// The camera-side half of a rig: something with a follow offset and a
/// confining volume. The rig writes both and never reads what the camera
/// derives from them.
pub trait VirtualCamera {
    fn follow_offset(&self) -> Vector3<f32>;
    fn set_follow_offset(&mut self, offset: Vector3<f32>);
    fn bounding_volume(&self) -> Option<BoxVolume>;
    fn set_bounding_volume(&mut self, volume: Option<BoxVolume>);
}

/// Virtual camera that sits at `follow_offset` from its follow target,
/// rotated by the target's heading, and looks back at the target.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct FollowCamera {
    /// Entity whose `Transform` is followed
    pub follow: Option<Entity>,
    /// Offset in the target's heading frame (x right, y up, z forward)
    pub follow_offset: Vector3<f32>,
    /// Eye positions are confined to this volume when set
    pub bounding_volume: Option<BoxVolume>,
}

impl FollowCamera {
    pub fn new(follow_offset: Vector3<f32>) -> Self {
        Self {
            follow: None,
            follow_offset,
            bounding_volume: None,
        }
    }

    pub fn following(mut self, entity: Entity) -> Self {
        self.follow = Some(entity);
        self
    }

    /// Eye position and orientation for a target pose
    pub fn resolve(&self, target: &Pose) -> Pose {
        let eye = target.position + heading(&target.rotation) * self.follow_offset;
        let eye = match &self.bounding_volume {
            Some(volume) => volume.clamp_point(&eye),
            None => eye,
        };

        let rotation = UnitQuaternion::face_towards(&(target.position - eye), &Vector3::y());
        // Degenerate when the eye sits on the target or straight above it
        let rotation = if rotation.coords.iter().all(|c| c.is_finite()) {
            rotation
        } else {
            target.rotation
        };

        Pose {
            position: eye,
            rotation,
        }
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 1.5, -3.0))
    }
}

impl VirtualCamera for FollowCamera {
    fn follow_offset(&self) -> Vector3<f32> {
        self.follow_offset
    }

    fn set_follow_offset(&mut self, offset: Vector3<f32>) {
        self.follow_offset = offset;
    }

    fn bounding_volume(&self) -> Option<BoxVolume> {
        self.bounding_volume
    }

    fn set_bounding_volume(&mut self, volume: Option<BoxVolume>) {
        self.bounding_volume = volume;
    }
}

/// Rotation about world up that matches the heading of `rotation`
fn heading(rotation: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    let forward = rotation * Vector3::z();
    if forward.x.abs() <= 1e-6 && forward.z.abs() <= 1e-6 {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), forward.x.atan2(forward.z))
}
