use crate::prelude::*;

/// Position and orientation without scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    pub fn new(position: Point3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::z()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation * Vector3::x()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }
}

/// Lifecycle of a rig.
///
/// `Uninitialized -> Activating -> Active -> Inactive`, and back to
/// `Activating` on the next activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RigPhase {
    Uninitialized,
    /// Activated, but still inside the controls enable delay
    Activating,
    Active,
    Inactive,
}

/// Everything a rig mutates while it is active
#[derive(Clone, Debug, PartialEq)]
pub struct RigState {
    pub desired_position: Point3<f32>,
    /// Degrees; only yaw (y) is driven by input
    pub desired_rotation_euler: Vector3<f32>,
    /// x unused, y height, z minus the zoom distance
    pub desired_offset: Vector3<f32>,
    pub live: Pose,
    /// Entity whose position overrides the desired position every tick
    pub sticky: Option<Entity>,
    pub input_locked: bool,
    /// Seconds since activation
    pub active_for: f32,
}

impl RigState {
    pub fn new(anchor: Pose, follow_offset: Vector3<f32>) -> Self {
        Self {
            desired_position: anchor.position,
            desired_rotation_euler: euler_degrees_from_rotation(&anchor.rotation),
            desired_offset: Vector3::new(follow_offset.x, follow_offset.y, -follow_offset.z.abs()),
            live: anchor,
            sticky: None,
            input_locked: false,
            active_for: 0.0,
        }
    }

    pub fn desired_rotation(&self) -> UnitQuaternion<f32> {
        rotation_from_euler_degrees(&self.desired_rotation_euler)
    }

    /// Current zoom distance
    pub fn zoom_distance(&self) -> f32 {
        self.desired_offset.z.abs()
    }
}

/// Copy of the desired state, as handed out by `CameraRig::snapshot`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigSnapshot {
    pub target_position: Point3<f32>,
    pub target_rotation: Vector3<f32>,
    pub target_offset: Vector3<f32>,
    pub sticky: Option<Entity>,
}

/// Where an update takes its target position from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetSource {
    Position(Point3<f32>),
    /// Position of an entity, resolved by the caller's lookup
    Entity(Entity),
}

/// Bulk change applied with `CameraRig::apply_update`. Every `None` leaves
/// the matching part of the state alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraUpdate {
    /// `Some(None)` clears the sticky target
    pub sticky: Option<Option<Entity>>,
    pub target: Option<TargetSource>,
    /// Replaces the desired rotation when a target is applied
    pub rotation: Option<UnitQuaternion<f32>>,
    /// Height and zoom distance
    pub offsets: Option<(f32, f32)>,
}

impl CameraUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stick_to(mut self, sticky: Option<Entity>) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn target(mut self, target: TargetSource) -> Self {
        self.target = Some(target);
        self
    }

    pub fn rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn offsets(mut self, height: f32, distance: f32) -> Self {
        self.offsets = Some((height, distance));
        self
    }
}
