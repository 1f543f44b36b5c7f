//! Local and world-space pose accessors.

use glam::{DQuat, DVec3};

use super::TransformTree;
use crate::ecs::components::transform::{GlobalTransform, Pose};
use crate::error::Result;

/// Store `value` in `slot` unless it is already there.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl TransformTree {
    /// Local pose relative to the parent.
    pub fn local_pose(&self, node: hecs::Entity) -> Result<Pose> {
        Ok(*self.get::<Pose>(node)?)
    }

    /// Position relative to the parent.
    pub fn local_position(&self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.get::<Pose>(node)?.translation)
    }

    /// Rotation relative to the parent.
    pub fn local_rotation(&self, node: hecs::Entity) -> Result<DQuat> {
        Ok(self.get::<Pose>(node)?.rotation)
    }

    /// Scale relative to the parent.
    pub fn local_scale(&self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.get::<Pose>(node)?.scale)
    }

    /// Skew relative to the parent.
    pub fn local_skew(&self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.get::<Pose>(node)?.skew)
    }

    /// Replace the whole local pose.
    pub fn set_local_pose(&mut self, node: hecs::Entity, pose: Pose) -> Result<()> {
        let pose = self.checked(pose)?;
        self.update_local(node, |local| replace(local, pose))
    }

    /// Set the position relative to the parent.
    pub fn set_local_position(&mut self, node: hecs::Entity, position: DVec3) -> Result<()> {
        self.update_local(node, |local| replace(&mut local.translation, position))
    }

    /// Set the rotation relative to the parent. The quaternion is normalized.
    pub fn set_local_rotation(&mut self, node: hecs::Entity, rotation: DQuat) -> Result<()> {
        let rotation = rotation.normalize();
        self.update_local(node, |local| replace(&mut local.rotation, rotation))
    }

    /// Set the scale relative to the parent.
    pub fn set_local_scale(&mut self, node: hecs::Entity, scale: DVec3) -> Result<()> {
        self.check_scale(scale)?;
        self.update_local(node, |local| replace(&mut local.scale, scale))
    }

    /// Set the skew relative to the parent.
    pub fn set_local_skew(&mut self, node: hecs::Entity, skew: DVec3) -> Result<()> {
        self.update_local(node, |local| replace(&mut local.skew, skew))
    }

    /// World-space position.
    pub fn position(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.world_pose(node)?.translation)
    }

    /// World-space rotation. Always a proper rotation; a reflection shows up
    /// as a negative `scale().x`.
    pub fn rotation(&mut self, node: hecs::Entity) -> Result<DQuat> {
        Ok(self.world_pose(node)?.rotation)
    }

    /// World-space scale.
    pub fn scale(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.world_pose(node)?.scale)
    }

    /// World-space skew.
    pub fn skew(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.world_pose(node)?.skew)
    }

    /// Set the world-space position. The local rotation, scale and skew are
    /// left as they are.
    pub fn set_position(&mut self, node: hecs::Entity, position: DVec3) -> Result<()> {
        self.set_world_component(
            node,
            |world| world.translation = position,
            |local, reprojected| local.translation = reprojected.translation,
        )
    }

    /// Set the world-space rotation.
    pub fn set_rotation(&mut self, node: hecs::Entity, rotation: DQuat) -> Result<()> {
        let rotation = rotation.normalize();
        self.set_world_component(
            node,
            |world| world.rotation = rotation,
            |local, reprojected| local.rotation = reprojected.rotation,
        )
    }

    /// Set the world-space scale.
    pub fn set_scale(&mut self, node: hecs::Entity, scale: DVec3) -> Result<()> {
        self.check_scale(scale)?;
        self.set_world_component(
            node,
            |world| world.scale = scale,
            |local, reprojected| local.scale = reprojected.scale,
        )
    }

    /// Set the world-space skew.
    pub fn set_skew(&mut self, node: hecs::Entity, skew: DVec3) -> Result<()> {
        self.set_world_component(
            node,
            |world| world.skew = skew,
            |local, reprojected| local.skew = reprojected.skew,
        )
    }

    /// World-space +X axis of the node's rotation.
    pub fn right(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.rotation(node)? * DVec3::X)
    }

    /// World-space +Y axis of the node's rotation.
    pub fn up(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.rotation(node)? * DVec3::Y)
    }

    /// World-space forward axis. Right-handed, so this is -Z.
    pub fn forward(&mut self, node: hecs::Entity) -> Result<DVec3> {
        Ok(self.rotation(node)? * DVec3::NEG_Z)
    }

    fn update_local(
        &mut self,
        node: hecs::Entity,
        update: impl FnOnce(&mut Pose) -> bool,
    ) -> Result<()> {
        let changed = update(&mut *self.get_mut::<Pose>(node)?);
        if changed {
            self.invalidate(node)?;
        }
        Ok(())
    }

    /// Edit one component of the world pose and write back only the matching
    /// local component.
    fn set_world_component(
        &mut self,
        node: hecs::Entity,
        edit: impl FnOnce(&mut Pose),
        assign: impl FnOnce(&mut Pose, &Pose),
    ) -> Result<()> {
        let mut world_pose = self.world_pose(node)?;
        edit(&mut world_pose);

        let local_to_world = world_pose.to_matrix();
        let local_to_parent = match self.parent(node)? {
            Some(parent) => self.world_to_local_matrix(parent)? * local_to_world,
            None => local_to_world,
        };
        let reprojected = Pose::from_matrix(local_to_parent)?;

        assign(&mut *self.get_mut::<Pose>(node)?, &reprojected);
        self.invalidate(node)?;

        // The world values were just computed; keep them.
        let mut cache = self.get_mut::<GlobalTransform>(node)?;
        cache.local_to_world = Some(local_to_world);
        cache.pose = Some(world_pose);
        Ok(())
    }
}
