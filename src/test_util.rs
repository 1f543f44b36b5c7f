//! Shared helpers for unit tests.

use glam::{DMat4, DQuat, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::components::transform::Pose;

/// Deterministic RNG so failures reproduce.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x7265_696e)
}

pub fn random_vec3(rng: &mut StdRng, min: f64, max: f64) -> DVec3 {
    DVec3::new(
        rng.random_range(min..max),
        rng.random_range(min..max),
        rng.random_range(min..max),
    )
}

pub fn random_rotation(rng: &mut StdRng) -> DQuat {
    let axis = loop {
        let v = random_vec3(rng, -1.0, 1.0);
        if v.length_squared() > 1e-3 {
            break v.normalize();
        }
    };
    DQuat::from_axis_angle(axis, rng.random_range(0.0..std::f64::consts::TAU))
}

pub fn random_pose(rng: &mut StdRng) -> Pose {
    Pose {
        translation: random_vec3(rng, -10.0, 10.0),
        rotation: random_rotation(rng),
        scale: random_vec3(rng, 0.5, 2.0),
        skew: random_vec3(rng, -0.5, 0.5),
    }
}

/// Like [`random_pose`], but each scale component may be negative, so the
/// pose can carry a reflection.
pub fn random_signed_pose(rng: &mut StdRng) -> Pose {
    let mut pose = random_pose(rng);
    for axis in 0..3 {
        if rng.random_bool(0.5) {
            pose.scale[axis] = -pose.scale[axis];
        }
    }
    pose
}

fn tolerance(expected: &[f64]) -> f64 {
    let largest = expected.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    1e-5 * (1.0 + largest)
}

#[track_caller]
pub fn assert_vec3_eq(actual: DVec3, expected: DVec3) {
    let eps = tolerance(&expected.to_array());
    assert!(
        actual.abs_diff_eq(expected, eps),
        "Expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[track_caller]
pub fn assert_mat4_eq(actual: DMat4, expected: DMat4) {
    let eps = tolerance(&expected.to_cols_array());
    assert!(
        actual.abs_diff_eq(expected, eps),
        "Expected {:?}, got {:?}",
        expected,
        actual
    );
}
