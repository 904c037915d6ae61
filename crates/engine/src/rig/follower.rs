use crate::prelude::*;

/// Smooth the live pose and the camera's follow offset toward the desired
/// state and push the offset into the camera.
///
/// A resolved sticky position replaces the desired position first, after
/// bounds and ground correction already ran.
pub(crate) fn follow(
    state: &mut RigState,
    config: &RigConfig,
    delta: f32,
    sticky_position: Option<Point3<f32>>,
    camera: &mut dyn VirtualCamera,
) {
    if let Some(sticky) = state.sticky {
        match sticky_position {
            Some(position) => state.desired_position = position,
            None => {
                log::debug!("Sticky target {:?} is gone, releasing it", sticky);
                state.sticky = None;
            }
        }
    }

    let position_t = blend_factor(delta, config.position_damping);
    let rotation_t = blend_factor(delta, config.rotation_damping);

    state.live.position = state
        .live
        .position
        .coords
        .lerp(&state.desired_position.coords, position_t)
        .into();
    state.live.rotation = slerp(&state.live.rotation, &state.desired_rotation(), rotation_t);

    state.desired_offset.z = -state.desired_offset.z.abs();
    let offset = camera
        .follow_offset()
        .lerp(&state.desired_offset, position_t);
    camera.set_follow_offset(offset);
}

/// Fraction of the remaining distance covered this frame
pub fn blend_factor(delta: f32, damping: f32) -> f32 {
    (delta * damping).clamp(0.0, 1.0)
}

/// Shortest-arc interpolation
fn slerp(from: &UnitQuaternion<f32>, to: &UnitQuaternion<f32>, t: f32) -> UnitQuaternion<f32> {
    if t <= 0.0 {
        return *from;
    }
    from.try_slerp(to, t, 1e-6)
        .unwrap_or_else(|| from.nlerp(to, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RigState {
        RigState::new(Pose::default(), Vector3::new(0.0, 1.5, -3.0))
    }

    #[test]
    fn test_position_moves_fraction_of_gap() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::default();
        let mut state = state();
        state.desired_position = Point3::new(10.0, 0.0, 0.0);

        follow(&mut state, &config, 0.1, None, &mut camera);
        assert!((state.live.position.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::new(Vector3::new(0.0, 4.0, -7.0));
        let mut state = state();
        state.desired_position = Point3::new(10.0, 0.0, 0.0);
        state.desired_rotation_euler.y = 90.0;
        let before = state.clone();

        follow(&mut state, &config, 0.0, None, &mut camera);
        assert_eq!(state, before);
        assert_eq!(camera.follow_offset, Vector3::new(0.0, 4.0, -7.0));
    }

    #[test]
    fn test_large_delta_lands_exactly() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::default();
        let mut state = state();
        state.desired_position = Point3::new(3.0, 1.0, -2.0);
        state.desired_offset = Vector3::new(0.0, 6.0, -8.0);

        follow(&mut state, &config, 5.0, None, &mut camera);
        assert_eq!(state.live.position, Point3::new(3.0, 1.0, -2.0));
        assert_eq!(camera.follow_offset, Vector3::new(0.0, 6.0, -8.0));
    }

    #[test]
    fn test_converges_monotonically() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::new(Vector3::new(0.0, 10.0, -10.0));
        let mut state = state();
        state.desired_position = Point3::new(-20.0, 4.0, 12.0);
        state.desired_rotation_euler.y = 170.0;

        let target_rotation = state.desired_rotation();
        let mut distance = f32::INFINITY;
        let mut angle = f32::INFINITY;
        let mut offset_gap = f32::INFINITY;

        for _ in 0..400 {
            follow(&mut state, &config, 1.0 / 60.0, None, &mut camera);

            let d = (state.live.position - state.desired_position).norm();
            let a = state.live.rotation.angle_to(&target_rotation);
            let o = (camera.follow_offset - state.desired_offset).norm();
            if distance > 1e-3 {
                assert!(d < distance, "{d} !< {distance}");
            }
            // Small angles are quantized by the quaternion's scalar part
            if angle > 1e-2 {
                assert!(a < angle, "{a} !< {angle}");
            }
            if offset_gap > 1e-3 {
                assert!(o < offset_gap);
            }
            distance = d;
            angle = a;
            offset_gap = o;
        }

        assert!(distance < 1e-3);
        assert!(angle < 1e-3);
    }

    #[test]
    fn test_rotation_takes_short_way_round() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::default();
        let mut state = RigState::new(
            Pose::new(Point3::origin(), rotation_from_euler_degrees(&Vector3::new(0.0, 350.0, 0.0))),
            Vector3::new(0.0, 1.5, -3.0),
        );
        state.desired_rotation_euler = Vector3::new(0.0, 10.0, 0.0);

        follow(&mut state, &config, 0.125, None, &mut camera);
        // Half of the 20 degree gap, through 0 rather than 180
        let yaw = euler_degrees_from_rotation(&state.live.rotation).y;
        assert!(yaw < 1e-2 || yaw > 359.99, "{yaw}");
    }

    #[test]
    fn test_sticky_position_overrides_desired() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::default();
        let mut world = World::new();
        let mut state = state();
        state.sticky = Some(world.spawn_empty().id());
        state.desired_position = Point3::new(-50.0, 0.0, 0.0);

        follow(&mut state, &config, 0.1, Some(Point3::new(10.0, 0.0, 10.0)), &mut camera);
        assert_eq!(state.desired_position, Point3::new(10.0, 0.0, 10.0));
        assert!(state.live.position.x > 0.0 && state.live.position.z > 0.0);
    }

    #[test]
    fn test_unresolved_sticky_is_released() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::default();
        let mut world = World::new();
        let mut state = state();
        state.sticky = Some(world.spawn_empty().id());
        state.desired_position = Point3::new(5.0, 0.0, 0.0);

        follow(&mut state, &config, 0.1, None, &mut camera);
        assert!(state.sticky.is_none());
        assert_eq!(state.desired_position, Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_positive_offset_renormalized() {
        let config = RigConfig::default();
        let mut camera = FollowCamera::new(Vector3::new(0.0, 1.5, -3.0));
        let mut state = state();
        state.desired_offset.z = 4.0;

        follow(&mut state, &config, 0.1, None, &mut camera);
        assert_eq!(state.desired_offset.z, -4.0);
        assert!(camera.follow_offset.z < -3.0);
    }
}
