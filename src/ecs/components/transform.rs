//! Transform components for hierarchy nodes.

use glam::{DMat4, DQuat, DVec3};

use crate::error::Result;
use crate::math::{self, rotations_approx_eq};

/// Local-space affine decomposition: translation, rotation, scale and skew.
///
/// Relative to the parent node, or to world space for a root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
    /// Shear coefficients for the xy, xz and yz planes.
    pub skew: DVec3,
}

impl Pose {
    /// Create an identity pose.
    pub fn identity() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
            skew: DVec3::ZERO,
        }
    }

    /// Create a pose from a translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale * skew).
    pub fn to_matrix(&self) -> DMat4 {
        math::recompose(self)
    }

    /// Inverse of [`Pose::to_matrix`], built in closed form.
    pub fn to_inverse_matrix(&self) -> DMat4 {
        math::recompose_inverse(self)
    }

    /// Decompose an affine matrix into a pose.
    pub fn from_matrix(mat: DMat4) -> Result<Self> {
        math::decompose(mat)
    }

    /// Compare component-wise within `epsilon`, rotations by matrix form.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.translation.abs_diff_eq(other.translation, epsilon)
            && rotations_approx_eq(self.rotation, other.rotation, epsilon)
            && self.scale.abs_diff_eq(other.scale, epsilon)
            && self.skew.abs_diff_eq(other.skew, epsilon)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Memoized world-space data of a node.
///
/// Each field is filled lazily and cleared when the node or one of its
/// ancestors changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalTransform {
    pub(crate) local_to_world: Option<DMat4>,
    pub(crate) world_to_local: Option<DMat4>,
    pub(crate) pose: Option<Pose>,
}

impl GlobalTransform {
    /// Cached local-to-world matrix, if fresh.
    pub fn local_to_world(&self) -> Option<DMat4> {
        self.local_to_world
    }

    /// Cached world-to-local matrix, if fresh.
    pub fn world_to_local(&self) -> Option<DMat4> {
        self.world_to_local
    }

    /// Cached world-space pose, if fresh.
    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    /// True when every cache is populated.
    pub fn is_fresh(&self) -> bool {
        self.local_to_world.is_some() && self.world_to_local.is_some() && self.pose.is_some()
    }

    /// True when no cache is populated.
    pub fn is_invalid(&self) -> bool {
        self.local_to_world.is_none() && self.world_to_local.is_none() && self.pose.is_none()
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Reference to a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub hecs::Entity);

/// List of child nodes. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<hecs::Entity>);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_identity() {
        let p = Pose::identity();
        assert_eq!(p.translation, DVec3::ZERO);
        assert_eq!(p.rotation, DQuat::IDENTITY);
        assert_eq!(p.scale, DVec3::ONE);
        assert_eq!(p.skew, DVec3::ZERO);
        assert_eq!(p.to_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_from_translation() {
        let pos = DVec3::new(1.0, 2.0, 3.0);
        let p = Pose::from_translation(pos);
        assert_eq!(p.translation, pos);
        assert_eq!(p.to_matrix(), DMat4::from_translation(pos));
    }

    #[test]
    fn test_matches_glam_without_skew() {
        let p = Pose {
            translation: DVec3::new(1.0, 2.0, 3.0),
            rotation: DQuat::from_rotation_y(FRAC_PI_4),
            scale: DVec3::new(2.0, 1.5, 0.5),
            skew: DVec3::ZERO,
        };
        let expected = DMat4::from_scale_rotation_translation(p.scale, p.rotation, p.translation);
        assert!(p.to_matrix().abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_to_matrix_roundtrip() {
        let original = Pose {
            translation: DVec3::new(1.0, 2.0, 3.0),
            rotation: DQuat::from_rotation_y(FRAC_PI_4),
            scale: DVec3::new(2.0, 1.5, 0.5),
            skew: DVec3::new(0.1, -0.2, 0.3),
        };
        let recovered = Pose::from_matrix(original.to_matrix()).unwrap();
        assert!(recovered.approx_eq(&original, 1e-9));
    }

    #[test]
    fn test_approx_eq_ignores_quaternion_sign() {
        let a = Pose {
            rotation: DQuat::from_rotation_x(0.5),
            ..Pose::identity()
        };
        let b = Pose {
            rotation: -a.rotation,
            ..a
        };
        assert!(a.approx_eq(&b, 1e-9));
        let c = Pose {
            skew: DVec3::new(0.0, 0.1, 0.0),
            ..a
        };
        assert!(!a.approx_eq(&c, 1e-9));
    }

    #[test]
    fn test_global_transform_default_is_invalid() {
        let gt = GlobalTransform::default();
        assert!(gt.is_invalid());
        assert!(!gt.is_fresh());
        assert_eq!(gt.local_to_world(), None);
    }
}
