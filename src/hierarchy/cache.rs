//! Matrix queries and cache maintenance.

use glam::DMat4;
use tracing::trace;

use super::TransformTree;
use crate::ecs::components::transform::{GlobalTransform, Pose};
use crate::error::Result;

impl TransformTree {
    /// Matrix from `node`'s local space to its parent's space.
    pub fn local_to_parent_matrix(&self, node: hecs::Entity) -> Result<DMat4> {
        Ok(self.get::<Pose>(node)?.to_matrix())
    }

    /// Matrix from the parent's space to `node`'s local space.
    pub fn parent_to_local_matrix(&self, node: hecs::Entity) -> Result<DMat4> {
        Ok(self.get::<Pose>(node)?.to_inverse_matrix())
    }

    /// Matrix from `node`'s local space to world space.
    ///
    /// Walks up to the nearest ancestor with a cached matrix and caches every
    /// node on the way back down.
    pub fn local_to_world_matrix(&mut self, node: hecs::Entity) -> Result<DMat4> {
        let mut pending = Vec::new();
        let mut mat = DMat4::IDENTITY;
        let mut current = Some(node);
        while let Some(entity) = current {
            if let Some(cached) = self.get::<GlobalTransform>(entity)?.local_to_world {
                mat = cached;
                break;
            }
            pending.push(entity);
            current = self.parent(entity)?;
        }

        if !pending.is_empty() {
            trace!("Recomputing local-to-world for {} nodes", pending.len());
        }
        for entity in pending.into_iter().rev() {
            mat *= self.local_to_parent_matrix(entity)?;
            self.get_mut::<GlobalTransform>(entity)?.local_to_world = Some(mat);
        }
        Ok(mat)
    }

    /// Matrix from world space to `node`'s local space.
    pub fn world_to_local_matrix(&mut self, node: hecs::Entity) -> Result<DMat4> {
        let mut pending = Vec::new();
        let mut mat = DMat4::IDENTITY;
        let mut current = Some(node);
        while let Some(entity) = current {
            if let Some(cached) = self.get::<GlobalTransform>(entity)?.world_to_local {
                mat = cached;
                break;
            }
            pending.push(entity);
            current = self.parent(entity)?;
        }

        if !pending.is_empty() {
            trace!("Recomputing world-to-local for {} nodes", pending.len());
        }
        for entity in pending.into_iter().rev() {
            mat = self.parent_to_local_matrix(entity)? * mat;
            self.get_mut::<GlobalTransform>(entity)?.world_to_local = Some(mat);
        }
        Ok(mat)
    }

    /// World-space decomposition of `node`.
    pub fn world_pose(&mut self, node: hecs::Entity) -> Result<Pose> {
        if let Some(pose) = self.get::<GlobalTransform>(node)?.pose {
            return Ok(pose);
        }
        let pose = Pose::from_matrix(self.local_to_world_matrix(node)?)?;
        self.get_mut::<GlobalTransform>(node)?.pose = Some(pose);
        Ok(pose)
    }

    /// Populate every cache of `node` (and whatever ancestors it needs).
    pub fn ensure_fresh(&mut self, node: hecs::Entity) -> Result<()> {
        self.local_to_world_matrix(node)?;
        self.world_to_local_matrix(node)?;
        self.world_pose(node)?;
        Ok(())
    }

    /// Clear the caches of `node` and its descendants.
    ///
    /// Stops descending at nodes that hold no cache: nothing below them can
    /// be cached either.
    pub(crate) fn invalidate(&mut self, node: hecs::Entity) -> Result<()> {
        let mut stack = vec![node];
        while let Some(entity) = stack.pop() {
            self.get_mut::<GlobalTransform>(entity)?.clear();
            let children = self.children(entity)?;
            for child in children {
                if !self.get::<GlobalTransform>(child)?.is_invalid() {
                    stack.push(child);
                }
            }
        }
        Ok(())
    }
}
