//! Rotation matrix / quaternion helpers.

use glam::{DMat3, DQuat};

/// Convert a proper rotation matrix to a unit quaternion.
///
/// Picks the branch with the largest pivot (trace, or the largest diagonal
/// entry) so the square root never sees a value near zero.
pub fn quat_from_rotation(m: &DMat3) -> DQuat {
    let (m00, m01, m02) = (m.x_axis.x, m.y_axis.x, m.z_axis.x);
    let (m10, m11, m12) = (m.x_axis.y, m.y_axis.y, m.z_axis.y);
    let (m20, m21, m22) = (m.x_axis.z, m.y_axis.z, m.z_axis.z);

    let trace = m00 + m11 + m22;
    let q = if trace > 0.0 {
        let s = 0.5 / (trace + 1.0).sqrt();
        DQuat::from_xyzw(
            (m21 - m12) * s,
            (m02 - m20) * s,
            (m10 - m01) * s,
            0.25 / s,
        )
    } else if m00 > m11 && m00 > m22 {
        let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
        DQuat::from_xyzw(
            0.25 * s,
            (m01 + m10) / s,
            (m02 + m20) / s,
            (m21 - m12) / s,
        )
    } else if m11 > m22 {
        let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
        DQuat::from_xyzw(
            (m01 + m10) / s,
            0.25 * s,
            (m12 + m21) / s,
            (m02 - m20) / s,
        )
    } else {
        let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
        DQuat::from_xyzw(
            (m02 + m20) / s,
            (m12 + m21) / s,
            0.25 * s,
            (m10 - m01) / s,
        )
    };
    q.normalize()
}

/// Compare two rotations by their matrix form.
///
/// `q` and `-q` describe the same rotation and compare equal here.
pub fn rotations_approx_eq(a: DQuat, b: DQuat, epsilon: f64) -> bool {
    DMat3::from_quat(a).abs_diff_eq(DMat3::from_quat(b), epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_same_rotation(a: DQuat, b: DQuat) {
        assert!(
            rotations_approx_eq(a, b, EPS),
            "Expected {:?}, got {:?}",
            b,
            a
        );
    }

    #[test]
    fn test_identity() {
        let q = quat_from_rotation(&DMat3::IDENTITY);
        assert_same_rotation(q, DQuat::IDENTITY);
        assert!((q.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_each_branch() {
        // trace > 0
        let small = DQuat::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), 0.3);
        // half-turns make the trace negative and exercise each diagonal pivot
        let about_x = DQuat::from_rotation_x(PI);
        let about_y = DQuat::from_rotation_y(PI);
        let about_z = DQuat::from_rotation_z(PI);
        let tilted = DQuat::from_axis_angle(DVec3::new(0.1, 0.2, 1.0).normalize(), 3.0);

        for q in [small, about_x, about_y, about_z, tilted] {
            let recovered = quat_from_rotation(&DMat3::from_quat(q));
            assert_same_rotation(recovered, q);
            assert!((recovered.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_quarter_turn_maps_axes() {
        let m = DMat3::from_quat(DQuat::from_rotation_y(FRAC_PI_2));
        let q = quat_from_rotation(&m);
        let x = q * DVec3::X;
        assert!((x - DVec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_negated_quaternion_compares_equal() {
        let q = DQuat::from_rotation_z(1.2);
        assert!(rotations_approx_eq(q, -q, EPS));
        assert!(!rotations_approx_eq(q, DQuat::from_rotation_z(1.3), EPS));
    }
}
