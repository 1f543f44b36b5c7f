//! Transform node builder

use glam::{DQuat, DVec3};

use super::TransformTree;
use crate::ecs::components::transform::Pose;
use crate::error::Result;

/// Builder for spawning transform nodes.
///
/// ```
/// use glam::DVec3;
/// use rein_transform::{TransformBuilder, TransformTree};
///
/// let mut tree = TransformTree::new();
/// let root = TransformBuilder::new().build(&mut tree)?;
/// let child = TransformBuilder::new()
///     .with_parent(root)
///     .with_position(DVec3::new(1.0, 2.0, 3.0))
///     .build(&mut tree)?;
/// assert_eq!(tree.parent(child)?, Some(root));
/// # Ok::<(), rein_transform::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformBuilder {
    parent: Option<hecs::Entity>,
    pose: Pose,
}

impl TransformBuilder {
    /// Create a builder for a parentless node with an identity pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the node to `parent`.
    pub fn with_parent(mut self, parent: hecs::Entity) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the local position.
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.pose.translation = position;
        self
    }

    /// Set the local rotation.
    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        self.pose.rotation = rotation;
        self
    }

    /// Set the local scale.
    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.pose.scale = scale;
        self
    }

    /// Set the local skew.
    pub fn with_skew(mut self, skew: DVec3) -> Self {
        self.pose.skew = skew;
        self
    }

    /// Spawn the node into `tree`.
    pub fn build(self, tree: &mut TransformTree) -> Result<hecs::Entity> {
        match self.parent {
            Some(parent) => tree.spawn_child(parent, self.pose),
            None => tree.spawn(self.pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::math::rotations_approx_eq;

    #[test]
    fn test_defaults_to_identity_root() {
        let mut tree = TransformTree::new();
        let node = TransformBuilder::new().build(&mut tree).unwrap();
        assert_eq!(tree.parent(node).unwrap(), None);
        assert_eq!(tree.local_pose(node).unwrap(), Pose::identity());
    }

    #[test]
    fn test_sets_every_property() {
        let mut tree = TransformTree::new();
        let parent = TransformBuilder::new().build(&mut tree).unwrap();
        let rotation = DQuat::from_rotation_z(0.4);
        let node = TransformBuilder::new()
            .with_parent(parent)
            .with_position(DVec3::new(1.0, 2.0, 3.0))
            .with_rotation(rotation * 3.0)
            .with_scale(DVec3::new(2.0, 1.0, 4.0))
            .with_skew(DVec3::new(5.0, -3.0, 1.0))
            .build(&mut tree)
            .unwrap();

        let pose = tree.local_pose(node).unwrap();
        assert_eq!(tree.parent(node).unwrap(), Some(parent));
        assert_eq!(tree.children(parent).unwrap(), vec![node]);
        assert_eq!(pose.translation, DVec3::new(1.0, 2.0, 3.0));
        assert!(rotations_approx_eq(pose.rotation, rotation, 1e-12));
        assert_eq!(pose.scale, DVec3::new(2.0, 1.0, 4.0));
        assert_eq!(pose.skew, DVec3::new(5.0, -3.0, 1.0));

        let recovered = Pose::from_matrix(tree.local_to_parent_matrix(node).unwrap()).unwrap();
        assert!(recovered.scale.abs_diff_eq(DVec3::new(2.0, 1.0, 4.0), 1e-9));
        assert!(recovered.skew.abs_diff_eq(DVec3::new(5.0, -3.0, 1.0), 1e-9));
    }

    #[test]
    fn test_build_reports_errors() {
        let mut tree = TransformTree::new();
        let result = TransformBuilder::new()
            .with_scale(DVec3::ZERO)
            .build(&mut tree);
        assert_eq!(result, Err(Error::DegenerateScale(DVec3::ZERO)));

        let gone = TransformBuilder::new().build(&mut tree).unwrap();
        tree.despawn(gone).unwrap();
        let result = TransformBuilder::new().with_parent(gone).build(&mut tree);
        assert_eq!(result, Err(Error::NoSuchNode(gone)));
    }
}
