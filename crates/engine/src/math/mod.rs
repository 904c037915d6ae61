mod curve;
mod volume;

pub use curve::*;
pub use volume::*;

use nalgebra::{UnitQuaternion, Vector3};

/// Clamp that returns `min` for an inverted range, where `f32::clamp` panics
pub fn clamp_or_min(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return min;
    }
    value.max(min).min(max)
}

/// Where `value` sits between `min` and `max`, as 0..1.
/// A degenerate range maps everything to 0.
pub fn inverse_lerp(min: f32, max: f32, value: f32) -> f32 {
    let range = max - min;
    if range.abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Rotation from Euler angles in degrees.
/// Roll (z) is applied first, then pitch (x), then yaw (y).
pub fn rotation_from_euler_degrees(euler: &Vector3<f32>) -> UnitQuaternion<f32> {
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler.y.to_radians());
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), euler.x.to_radians());
    let roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler.z.to_radians());
    yaw * pitch * roll
}

/// Inverse of [`rotation_from_euler_degrees`], every angle wrapped to `[0, 360)`
pub fn euler_degrees_from_rotation(rotation: &UnitQuaternion<f32>) -> Vector3<f32> {
    let m = rotation.to_rotation_matrix().into_inner();

    let sin_pitch = (-m[(1, 2)]).clamp(-1.0, 1.0);
    let pitch = sin_pitch.asin();

    let (yaw, roll) = if sin_pitch.abs() < 0.9999 {
        (m[(0, 2)].atan2(m[(2, 2)]), m[(1, 0)].atan2(m[(1, 1)]))
    } else {
        // Gimbal lock, fold roll into yaw
        ((-m[(2, 0)]).atan2(m[(0, 0)]), 0.0)
    };

    Vector3::new(
        wrap_degrees(pitch.to_degrees()),
        wrap_degrees(yaw.to_degrees()),
        wrap_degrees(roll.to_degrees()),
    )
}

pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_or_min() {
        assert_eq!(clamp_or_min(5.0, 3.0, 10.0), 5.0);
        assert_eq!(clamp_or_min(1.0, 3.0, 10.0), 3.0);
        assert_eq!(clamp_or_min(12.0, 3.0, 10.0), 10.0);
        // Inverted range degrades to the lower bound
        assert_eq!(clamp_or_min(7.0, 10.0, 3.0), 10.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert!((inverse_lerp(3.0, 10.0, 6.5) - 0.5).abs() < 1e-6);
        assert_eq!(inverse_lerp(3.0, 10.0, 1.0), 0.0);
        assert_eq!(inverse_lerp(4.0, 4.0, 4.0), 0.0);
    }

    #[test]
    fn test_yaw_turns_forward_toward_right() {
        let rotation = rotation_from_euler_degrees(&Vector3::new(0.0, 90.0, 0.0));
        let forward = rotation * Vector3::z();
        assert!((forward - Vector3::x()).norm() < 1e-5);
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vector3::new(20.0, 135.0, 10.0);
        let rotation = rotation_from_euler_degrees(&euler);
        let back = euler_degrees_from_rotation(&rotation);
        assert!((back - euler).norm() < 1e-3, "{back:?}");
    }

    #[test]
    fn test_negative_yaw_wraps() {
        let rotation = rotation_from_euler_degrees(&Vector3::new(0.0, -30.0, 0.0));
        let euler = euler_degrees_from_rotation(&rotation);
        assert!((euler.y - 330.0).abs() < 1e-3);
        assert_eq!(wrap_degrees(-0.0), 0.0);
    }
}
