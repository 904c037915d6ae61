//! Third-person follow rig.
//!
//! Each tick runs four stages in a fixed order: input accumulation, camera
//! area constraint, ground snapping and damped following. The rig owns its
//! desired and live state; the virtual camera, the ground and the input are
//! borrowed for the duration of a tick.

mod accumulator;
mod config;
mod constrainer;
mod follower;
mod ground;
mod state;

pub use config::*;
pub use follower::blend_factor;
pub use state::*;

use crate::prelude::*;

/// What a rig needs from the outside world for one tick
pub struct RigFrame<'a> {
    /// Seconds since the previous tick
    pub delta: f32,
    pub input: &'a InputState,
    pub ground: &'a dyn SpatialQuery,
    /// Current position of the sticky entity, if the host could resolve it
    pub sticky_position: Option<Point3<f32>>,
}

#[derive(Component, Clone, Debug)]
pub struct CameraRig {
    config: RigConfig,
    area: Option<BoxVolume>,
    phase: RigPhase,
    state: Option<RigState>,
    activations: u32,
    /// Entity carrying the live pose, created on first activation if unset
    pub anchor: Option<Entity>,
    /// Entity carrying the virtual camera this rig drives
    pub camera: Option<Entity>,
}

impl CameraRig {
    pub fn new(config: RigConfig) -> Self {
        config.check();
        Self {
            area: config.bounds,
            config,
            phase: RigPhase::Uninitialized,
            state: None,
            activations: 0,
            anchor: None,
            camera: None,
        }
    }

    pub fn with_camera(mut self, camera: Entity) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_anchor(mut self, anchor: Entity) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, RigPhase::Activating | RigPhase::Active)
    }

    /// Whether the rig has been activated at least once
    pub fn was_started(&self) -> bool {
        self.activations > 0
    }

    pub fn state(&self) -> Option<&RigState> {
        self.state.as_ref()
    }

    /// Start a fresh active lifetime.
    ///
    /// The live pose starts at `anchor`, or at `sticky_position` when given,
    /// and the desired offset is seeded from the camera's current offset.
    pub fn activate(
        &mut self,
        anchor: Pose,
        sticky: Option<(Entity, Point3<f32>)>,
        camera: &dyn VirtualCamera,
    ) {
        let mut anchor = anchor;
        if let Some((_, position)) = sticky {
            anchor.position = position;
        }

        let mut state = RigState::new(anchor, camera.follow_offset());
        state.sticky = sticky.map(|(entity, _)| entity);

        self.state = Some(state);
        self.phase = RigPhase::Activating;
        self.activations += 1;

        log::info!(
            "Camera rig activated at {:?}, controls in {:.2}s",
            anchor.position,
            self.config.controls_enable_delay
        );
    }

    /// Drop all state; the rig can be activated again later
    pub fn deactivate(&mut self) {
        if self.state.take().is_some() {
            log::info!("Camera rig deactivated");
        }
        self.phase = RigPhase::Inactive;
    }

    /// Advance the rig by one frame
    pub fn tick(&mut self, frame: &RigFrame, camera: &mut dyn VirtualCamera) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.active_for += frame.delta.max(0.0);
        if self.phase == RigPhase::Activating && state.active_for > self.config.controls_enable_delay
        {
            self.phase = RigPhase::Active;
            log::debug!("Camera rig controls enabled");
        }

        if self.phase == RigPhase::Active && !state.input_locked {
            accumulator::accumulate_input(state, &self.config, frame.input);
        }

        constrainer::constrain_position(state, self.area.as_ref());
        ground::snap_to_ground(state, &self.config, frame.ground);
        follower::follow(
            state,
            &self.config,
            frame.delta,
            frame.sticky_position,
            camera,
        );
    }

    fn state_mut(&mut self, operation: &str) -> Option<&mut RigState> {
        if self.state.is_none() {
            log::warn!("Camera rig is not active, ignoring {}", operation);
        }
        self.state.as_mut()
    }

    /// Aim the rig at a new target. The live pose still eases toward it.
    pub fn set_target(&mut self, position: Point3<f32>, rotation: UnitQuaternion<f32>) {
        if let Some(state) = self.state_mut("set_target") {
            state.desired_position = position;
            state.desired_rotation_euler = euler_degrees_from_rotation(&rotation);
        }
    }

    /// Like [`set_target`](Self::set_target), also replacing the sticky
    /// target. Without a rotation the current desired rotation is kept.
    pub fn set_camera_target(
        &mut self,
        position: Point3<f32>,
        rotation: Option<UnitQuaternion<f32>>,
        sticky: Option<Entity>,
    ) {
        if let Some(state) = self.state_mut("set_camera_target") {
            state.sticky = sticky;
            state.desired_position = position;
            if let Some(rotation) = rotation {
                state.desired_rotation_euler = euler_degrees_from_rotation(&rotation);
            }
        }
    }

    /// Desired position and rotation
    pub fn get_camera_target(&self) -> Option<(Point3<f32>, UnitQuaternion<f32>)> {
        self.state
            .as_ref()
            .map(|state| (state.desired_position, state.desired_rotation()))
    }

    /// Replace the camera area and hand it to the virtual camera as well
    pub fn set_camera_area(&mut self, area: Option<BoxVolume>, camera: &mut dyn VirtualCamera) {
        self.area = area;
        camera.set_bounding_volume(area);
        log::debug!("Camera area set to {:?}", area);
    }

    pub fn get_camera_area(&self) -> Option<BoxVolume> {
        self.area
    }

    pub fn enable_input(&mut self) {
        if let Some(state) = self.state_mut("enable_input") {
            state.input_locked = false;
        }
    }

    pub fn disable_input(&mut self) {
        if let Some(state) = self.state_mut("disable_input") {
            state.input_locked = true;
        }
    }

    /// False while input is locked or the rig is not active
    pub fn is_input_enabled(&self) -> bool {
        self.state.as_ref().is_some_and(|state| !state.input_locked)
    }

    pub fn sticky_target(&self) -> Option<Entity> {
        self.state.as_ref().and_then(|state| state.sticky)
    }

    /// Smoothed pose the camera actually follows
    pub fn live_pose(&self) -> Option<Pose> {
        self.state.as_ref().map(|state| state.live)
    }

    pub fn desired_position(&self) -> Option<Point3<f32>> {
        self.state.as_ref().map(|state| state.desired_position)
    }

    pub fn set_desired_position(&mut self, position: Point3<f32>) {
        if let Some(state) = self.state_mut("set_desired_position") {
            state.desired_position = position;
        }
    }

    pub fn desired_rotation_euler(&self) -> Option<Vector3<f32>> {
        self.state.as_ref().map(|state| state.desired_rotation_euler)
    }

    pub fn set_desired_rotation_euler(&mut self, euler: Vector3<f32>) {
        if let Some(state) = self.state_mut("set_desired_rotation_euler") {
            state.desired_rotation_euler = euler;
        }
    }

    pub fn snapshot(&self) -> Option<RigSnapshot> {
        self.state.as_ref().map(|state| RigSnapshot {
            target_position: state.desired_position,
            target_rotation: state.desired_rotation_euler,
            target_offset: state.desired_offset,
            sticky: state.sticky,
        })
    }

    /// Apply a bulk update. `resolve` looks up entity positions for
    /// [`TargetSource::Entity`]; an unresolved entity leaves the target alone.
    pub fn apply_update(
        &mut self,
        update: &CameraUpdate,
        resolve: impl Fn(Entity) -> Option<Point3<f32>>,
    ) {
        let Some(state) = self.state_mut("apply_update") else {
            return;
        };

        if let Some(sticky) = update.sticky {
            state.sticky = sticky;
        }

        if let Some(target) = update.target {
            let position = match target {
                TargetSource::Position(position) => Some(position),
                TargetSource::Entity(entity) => resolve(entity),
            };
            match position {
                Some(position) => {
                    state.desired_position = position;
                    if let Some(rotation) = update.rotation {
                        state.desired_rotation_euler = euler_degrees_from_rotation(&rotation);
                    }
                }
                None => log::warn!("Camera update target {:?} could not be resolved", target),
            }
        }

        if let Some((height, distance)) = update.offsets {
            state.desired_offset.y = height;
            state.desired_offset.z = -distance.abs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn active_rig(config: RigConfig, camera: &FollowCamera) -> CameraRig {
        let mut rig = CameraRig::new(config);
        rig.activate(Pose::default(), None, camera);
        rig
    }

    fn tick(
        rig: &mut CameraRig,
        delta: f32,
        input: &InputState,
        ground: &dyn SpatialQuery,
        camera: &mut FollowCamera,
    ) {
        let frame = RigFrame {
            delta,
            input,
            ground,
            sticky_position: None,
        };
        rig.tick(&frame, camera);
    }

    #[test]
    fn test_lifecycle() {
        let camera = FollowCamera::default();
        let mut rig = CameraRig::new(RigConfig::default());
        assert_eq!(rig.phase(), RigPhase::Uninitialized);
        assert!(!rig.was_started());
        assert!(!rig.is_input_enabled());

        rig.activate(Pose::default(), None, &camera);
        assert_eq!(rig.phase(), RigPhase::Activating);
        assert!(rig.was_started());
        assert!(rig.is_input_enabled());

        rig.deactivate();
        assert_eq!(rig.phase(), RigPhase::Inactive);
        assert!(rig.state().is_none());
        assert!(rig.get_camera_target().is_none());

        // Operations on an inactive rig are ignored
        rig.set_target(Point3::new(1.0, 2.0, 3.0), UnitQuaternion::identity());
        assert!(rig.desired_position().is_none());
    }

    #[test]
    fn test_activation_seeds_from_camera_and_sticky() {
        let mut world = World::new();
        let pawn = world.spawn_empty().id();
        let camera = FollowCamera::new(Vector3::new(0.0, 4.0, 6.0));

        let mut rig = CameraRig::new(RigConfig::default());
        rig.activate(
            Pose::new(Point3::new(1.0, 0.0, 1.0), UnitQuaternion::identity()),
            Some((pawn, Point3::new(7.0, 0.0, 7.0))),
            &camera,
        );

        let state = rig.state().unwrap();
        assert_eq!(state.live.position, Point3::new(7.0, 0.0, 7.0));
        assert_eq!(state.desired_offset, Vector3::new(0.0, 4.0, -6.0));
        assert_eq!(rig.sticky_target(), Some(pawn));
    }

    #[test]
    fn test_controls_enable_delay() {
        let mut camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);
        let ground = StaticScene::new();
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyW);

        // 0.5s in: input ignored
        tick(&mut rig, 0.5, &input, &ground, &mut camera);
        assert_eq!(rig.phase(), RigPhase::Activating);
        assert_eq!(rig.desired_position(), Some(Point3::origin()));

        // 1.5s in: one frame of panning, regardless of the frame length
        tick(&mut rig, 1.0, &input, &ground, &mut camera);
        assert_eq!(rig.phase(), RigPhase::Active);
        let moved = rig.desired_position().unwrap() - Point3::origin();
        assert!((moved - Vector3::new(0.0, 0.0, 0.5)).norm() < 1e-6);
    }

    #[test]
    fn test_disabled_input_skips_accumulation_only() {
        let mut camera = FollowCamera::default();
        let config = RigConfig {
            controls_enable_delay: 0.0,
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new().with_collider(GROUND_LAYER, Collider::ground(2.0));
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyD);

        rig.disable_input();
        assert!(!rig.is_input_enabled());
        tick(&mut rig, DT, &input, &ground, &mut camera);
        // Ground snapping still ran
        assert_eq!(rig.desired_position(), Some(Point3::new(0.0, 2.0, 0.0)));

        rig.enable_input();
        tick(&mut rig, DT, &input, &ground, &mut camera);
        assert!((rig.desired_position().unwrap() - Point3::new(0.5, 2.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_zero_tick_is_idempotent() {
        let mut camera = FollowCamera::default();
        let config = RigConfig {
            bounds: Some(BoxVolume::new(Point3::origin(), Vector3::new(20.0, 20.0, 20.0))),
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new();
        let input = InputState::new();

        rig.set_target(
            Point3::new(3.0, 1.0, -4.0),
            rotation_from_euler_degrees(&Vector3::new(0.0, 60.0, 0.0)),
        );
        tick(&mut rig, 0.1, &input, &ground, &mut camera);

        let state = rig.state().cloned();
        let offset = camera.follow_offset;
        for _ in 0..10 {
            tick(&mut rig, 0.0, &input, &ground, &mut camera);
        }
        assert_eq!(rig.state().cloned(), state);
        assert_eq!(camera.follow_offset, offset);
    }

    #[test]
    fn test_bounds_clamp_desired_position() {
        let mut camera = FollowCamera::default();
        let area = BoxVolume::new(Point3::origin(), Vector3::new(10.0, 10.0, 10.0));
        let config = RigConfig {
            controls_enable_delay: 0.0,
            movement_speed: 3.0,
            bounds: Some(area),
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new();
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyW);

        for _ in 0..10 {
            tick(&mut rig, DT, &input, &ground, &mut camera);
            assert!(area.contains(&rig.desired_position().unwrap()));
        }
        assert_eq!(rig.desired_position(), Some(Point3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_set_camera_area_reaches_camera() {
        let mut camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);
        let area = BoxVolume::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(50.0, 10.0, 50.0));

        rig.set_camera_area(Some(area), &mut camera);
        assert_eq!(rig.get_camera_area(), Some(area));
        assert_eq!(camera.bounding_volume(), Some(area));

        rig.set_camera_area(None, &mut camera);
        assert_eq!(camera.bounding_volume(), None);
    }

    #[test]
    fn test_sticky_moves_toward_reference() {
        let mut world = World::new();
        let pawn = world.spawn_empty().id();
        let mut camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);
        let ground = StaticScene::new();
        let input = InputState::new();

        rig.set_camera_target(Point3::new(-30.0, 0.0, 4.0), None, Some(pawn));
        let start = rig.live_pose().unwrap().position;
        let target = Point3::new(10.0, 0.0, 10.0);

        let frame = RigFrame {
            delta: DT,
            input: &input,
            ground: &ground,
            sticky_position: Some(target),
        };
        rig.tick(&frame, &mut camera);

        let live = rig.live_pose().unwrap().position;
        assert!((live - target).norm() < (start - target).norm());
        assert_eq!(rig.desired_position(), Some(target));
    }

    #[test]
    fn test_sticky_overrides_bounds_for_the_tick() {
        let mut world = World::new();
        let pawn = world.spawn_empty().id();
        let mut camera = FollowCamera::default();
        let config = RigConfig {
            bounds: Some(BoxVolume::new(Point3::origin(), Vector3::new(2.0, 2.0, 2.0))),
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new();
        let input = InputState::new();
        rig.set_camera_target(Point3::origin(), None, Some(pawn));

        let frame = RigFrame {
            delta: DT,
            input: &input,
            ground: &ground,
            sticky_position: Some(Point3::new(40.0, 0.0, 0.0)),
        };
        rig.tick(&frame, &mut camera);
        assert_eq!(rig.desired_position(), Some(Point3::new(40.0, 0.0, 0.0)));
    }

    #[test]
    fn test_manual_pan_releases_sticky() {
        let mut world = World::new();
        let pawn = world.spawn_empty().id();
        let mut camera = FollowCamera::default();
        let config = RigConfig {
            controls_enable_delay: 0.0,
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new();
        let mut input = InputState::new();
        rig.set_camera_target(Point3::origin(), None, Some(pawn));
        input.press_button(MouseButton::Middle);

        let frame = RigFrame {
            delta: DT,
            input: &input,
            ground: &ground,
            sticky_position: Some(Point3::new(40.0, 0.0, 0.0)),
        };
        rig.tick(&frame, &mut camera);
        assert_eq!(rig.sticky_target(), None);
        assert_eq!(rig.desired_position(), Some(Point3::origin()));
    }

    #[test]
    fn test_set_camera_target_keeps_rotation_when_omitted() {
        let camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);
        rig.set_desired_rotation_euler(Vector3::new(0.0, 120.0, 0.0));

        rig.set_camera_target(Point3::new(1.0, 0.0, 1.0), None, None);
        let (position, rotation) = rig.get_camera_target().unwrap();
        assert_eq!(position, Point3::new(1.0, 0.0, 1.0));
        let yaw = euler_degrees_from_rotation(&rotation).y;
        assert!((yaw - 120.0).abs() < 1e-3);

        rig.set_camera_target(
            Point3::origin(),
            Some(rotation_from_euler_degrees(&Vector3::new(0.0, 45.0, 0.0))),
            None,
        );
        assert!((rig.desired_rotation_euler().unwrap().y - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_target_does_not_snap_live_pose() {
        let mut camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);
        let ground = StaticScene::new();
        let input = InputState::new();

        rig.set_target(Point3::new(100.0, 0.0, 0.0), UnitQuaternion::identity());
        assert_eq!(rig.live_pose().unwrap().position, Point3::origin());

        tick(&mut rig, DT, &input, &ground, &mut camera);
        let x = rig.live_pose().unwrap().position.x;
        assert!(x > 0.0 && x < 100.0);
    }

    #[test]
    fn test_snapshot_and_update() {
        let mut world = World::new();
        let pawn = world.spawn_empty().id();
        let camera = FollowCamera::default();
        let mut rig = active_rig(RigConfig::default(), &camera);

        let update = CameraUpdate::new()
            .stick_to(Some(pawn))
            .target(TargetSource::Entity(pawn))
            .rotation(rotation_from_euler_degrees(&Vector3::new(0.0, 90.0, 0.0)))
            .offsets(4.0, 8.0);
        rig.apply_update(&update, |entity| {
            (entity == pawn).then_some(Point3::new(2.0, 0.0, 3.0))
        });

        let snapshot = rig.snapshot().unwrap();
        assert_eq!(snapshot.target_position, Point3::new(2.0, 0.0, 3.0));
        assert!((snapshot.target_rotation.y - 90.0).abs() < 1e-3);
        assert_eq!(snapshot.target_offset, Vector3::new(0.0, 4.0, -8.0));
        assert_eq!(snapshot.sticky, Some(pawn));

        // Unresolvable target leaves the pose alone but still clears sticky
        let update = CameraUpdate::new()
            .stick_to(None)
            .target(TargetSource::Entity(pawn));
        rig.apply_update(&update, |_| None);
        let snapshot = rig.snapshot().unwrap();
        assert_eq!(snapshot.target_position, Point3::new(2.0, 0.0, 3.0));
        assert_eq!(snapshot.sticky, None);
    }

    #[test]
    fn test_random_input_keeps_invariants() {
        let mut rng = rand::rng();
        let mut camera = FollowCamera::default();
        let area = BoxVolume::new(Point3::new(5.0, 0.0, -5.0), Vector3::new(30.0, 8.0, 30.0));
        let config = RigConfig {
            controls_enable_delay: 0.0,
            bounds: Some(area),
            ..Default::default()
        };
        let mut rig = active_rig(config, &camera);
        let ground = StaticScene::new();
        let keys = [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::KeyQ,
            KeyCode::KeyE,
        ];

        let mut input = InputState::new();
        for _ in 0..3_000 {
            input.reset_frame();
            for key in keys {
                if rng.random_bool(0.3) {
                    input.press_key(key);
                } else {
                    input.release_key(key);
                }
            }
            if rng.random_bool(0.2) {
                input.press_button(MouseButton::Middle);
                input.add_mouse_delta(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
            } else {
                input.release_button(MouseButton::Middle);
            }
            if rng.random_bool(0.3) {
                input.add_scroll(winit::event::MouseScrollDelta::LineDelta(
                    0.0,
                    rng.random_range(-1e4..1e4),
                ));
            }

            tick(&mut rig, rng.random_range(0.0..0.1), &input, &ground, &mut camera);

            let state = rig.state().unwrap();
            assert!(area.contains(&state.desired_position));
            assert!(state.desired_offset.z <= 0.0);
            assert!((3.0..=10.0).contains(&state.zoom_distance()));
            assert!((1.5..=10.0).contains(&state.desired_offset.y));
            assert!(state.live.position.coords.iter().all(|c| c.is_finite()));
        }
    }
}
