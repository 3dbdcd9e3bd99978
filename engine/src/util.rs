use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Deg, InnerSpace, Quaternion, Rotation, Rotation3, Vector3, vec3};

const EULER_EPSILON: f32 = 0.000001;

pub fn identity() -> Quaternion<f32> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Forward (-Z) axis of a rotation
pub fn front(rotation: Quaternion<f32>) -> Vector3<f32> {
    rotation.rotate_vector(vec3(0.0, 0.0, -1.0))
}

pub fn right(rotation: Quaternion<f32>) -> Vector3<f32> {
    rotation.rotate_vector(vec3(1.0, 0.0, 0.0))
}

pub fn up(rotation: Quaternion<f32>) -> Vector3<f32> {
    rotation.rotate_vector(vec3(0.0, 1.0, 0.0))
}

/// Rotation of `degrees` about `axis`. A zero axis yields the identity.
pub fn angle_axis_degrees(degrees: f32, axis: Vector3<f32>) -> Quaternion<f32> {
    if axis.magnitude2() == 0.0 {
        return identity();
    }
    Quaternion::from_axis_angle(axis.normalize(), Deg(degrees))
}

/// Quaternion from pitch (x), yaw (y) and roll (z) in degrees, applied in the
/// same order as `safe_euler_angles` reads them back.
pub fn from_pitch_yaw_roll_degrees(pitch: f32, yaw: f32, roll: f32) -> Quaternion<f32> {
    let half = vec3(pitch, yaw, roll).map(|a| a.to_radians() * 0.5);
    let (sx, cx) = half.x.sin_cos();
    let (sy, cy) = half.y.sin_cos();
    let (sz, cz) = half.z.sin_cos();

    Quaternion::new(
        cx * cy * cz + sx * sy * sz,
        sx * cy * cz - cx * sy * sz,
        cx * sy * cz + sx * cy * sz,
        cx * cy * sz - sx * sy * cz,
    )
}

/// Euler angles in degrees (x = pitch, y = yaw, z = roll) of a unit quaternion.
///
/// Near the poles of the yaw axis there is no unique decomposition; pitch is
/// pinned to zero and the remainder folded into roll. The result is normalised
/// so roll stays within [-90, 90] degrees.
pub fn safe_euler_angles(q: Quaternion<f32>) -> Vector3<f32> {
    let (w, x, y, z) = (q.s, q.v.x, q.v.y, q.v.z);
    let sy = 2.0 * (y * w - x * z);

    let mut eulers = if sy < 1.0 - EULER_EPSILON {
        if sy > -1.0 + EULER_EPSILON {
            vec3(
                (y * z + x * w).atan2(0.5 - (x * x + y * y)),
                sy.asin(),
                (x * y + z * w).atan2(0.5 - (y * y + z * z)),
            )
        } else {
            vec3(
                0.0,
                -FRAC_PI_2,
                (x * w - y * z).atan2(0.5 - (x * x + z * z)),
            )
        }
    } else {
        vec3(
            0.0,
            FRAC_PI_2,
            -(x * w - y * z).atan2(0.5 - (x * x + z * z)),
        )
    };

    if eulers.z < -FRAC_PI_2 || eulers.z > FRAC_PI_2 {
        eulers.x += if eulers.x < 0.0 { PI } else { -PI };
        eulers.y = -eulers.y;
        eulers.y += if eulers.y < 0.0 { PI } else { -PI };
        eulers.z += if eulers.z < 0.0 { PI } else { -PI };
    }

    eulers.map(|a| a.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert_close(actual.x, expected.x);
        assert_close(actual.y, expected.y);
        assert_close(actual.z, expected.z);
    }

    #[test]
    fn test_basis_of_identity() {
        assert_vec_close(front(identity()), vec3(0.0, 0.0, -1.0));
        assert_vec_close(right(identity()), vec3(1.0, 0.0, 0.0));
        assert_vec_close(up(identity()), vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_basis_follows_yaw() {
        // Turning left by 90 degrees points forward down -X
        let rotation = angle_axis_degrees(90.0, vec3(0.0, 1.0, 0.0));
        assert_vec_close(front(rotation), vec3(-1.0, 0.0, 0.0));
        assert_vec_close(right(rotation), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(angle_axis_degrees(45.0, vec3(0.0, 0.0, 0.0)), identity());
    }

    #[test]
    fn test_safe_euler_of_identity_is_zero() {
        assert_vec_close(safe_euler_angles(identity()), vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_safe_euler_single_axis() {
        let pitch = angle_axis_degrees(10.0, vec3(1.0, 0.0, 0.0));
        assert_vec_close(safe_euler_angles(pitch), vec3(10.0, 0.0, 0.0));

        let yaw = angle_axis_degrees(-30.0, vec3(0.0, 1.0, 0.0));
        assert_vec_close(safe_euler_angles(yaw), vec3(0.0, -30.0, 0.0));

        let roll = angle_axis_degrees(20.0, vec3(0.0, 0.0, 1.0));
        assert_vec_close(safe_euler_angles(roll), vec3(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_pitch_yaw_roll_round_trips_through_safe_euler() {
        let q = from_pitch_yaw_roll_degrees(15.0, -40.0, 25.0);
        assert_vec_close(safe_euler_angles(q), vec3(15.0, -40.0, 25.0));
    }

    #[test]
    fn test_safe_euler_at_yaw_pole_stays_finite() {
        let q = angle_axis_degrees(90.0, vec3(0.0, 1.0, 0.0));
        let eulers = safe_euler_angles(q);
        assert!(eulers.x.is_finite() && eulers.y.is_finite() && eulers.z.is_finite());
        assert_close(eulers.y, 90.0);
    }
}
