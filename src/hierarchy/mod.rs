//! Transform hierarchy.
//!
//! [`TransformTree`] owns every node. Nodes refer to each other through
//! `hecs::Entity` handles only, so the tree records relationships and never
//! lifetimes: a node lives until [`TransformTree::despawn`] is called on it.
//!
//! # Caching
//!
//! World-space matrices and the world pose are memoized per node in a
//! [`GlobalTransform`]. Changing a local pose or reparenting clears the caches
//! of the node and its descendants; queries refill them lazily, or
//! [`transform_system`](crate::ecs::systems::transform_system) refreshes the
//! whole tree once per frame.

mod builder;
mod cache;
mod pose;

pub use builder::TransformBuilder;

use glam::DVec3;
use tracing::debug;

use crate::config::HierarchyConfig;
use crate::ecs::components::transform::{Children, GlobalTransform, Parent, Pose};
use crate::error::{Error, Result};

/// Which pose survives a parent change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preserve {
    /// Keep the node fixed in world space; its local pose is recomputed.
    #[default]
    World,
    /// Keep the local pose; the node moves with its new parent.
    Local,
}

/// Arena of transform nodes linked into a forest.
pub struct TransformTree {
    world: hecs::World,
    config: HierarchyConfig,
}

impl TransformTree {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(HierarchyConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: HierarchyConfig) -> Self {
        Self {
            world: hecs::World::new(),
            config,
        }
    }

    /// Configuration this tree was created with.
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Read-only access to the node storage, for renderer-side queries.
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    /// True if `node` is a live node of this tree.
    pub fn contains(&self, node: hecs::Entity) -> bool {
        self.world.satisfies::<&Pose>(node).unwrap_or(false)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    /// True if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All parentless nodes.
    pub fn roots(&self) -> Vec<hecs::Entity> {
        self.world
            .query::<hecs::Without<&Pose, &Parent>>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Spawn a root node with the given local pose.
    pub fn spawn(&mut self, pose: Pose) -> Result<hecs::Entity> {
        let pose = self.checked(pose)?;
        let entity = self
            .world
            .spawn((pose, GlobalTransform::default(), Children::default()));
        debug!("Spawned transform {:?}", entity);
        Ok(entity)
    }

    /// Spawn a node attached to `parent` with the given local pose.
    pub fn spawn_child(&mut self, parent: hecs::Entity, pose: Pose) -> Result<hecs::Entity> {
        self.ensure_node(parent)?;
        let pose = self.checked(pose)?;
        let entity = self.world.spawn((
            pose,
            GlobalTransform::default(),
            Children::default(),
            Parent(parent),
        ));
        self.get_mut::<Children>(parent)?.0.push(entity);
        debug!("Spawned transform {:?} under {:?}", entity, parent);
        Ok(entity)
    }

    /// Create a node with the same local pose and parent as `node`.
    ///
    /// Children are not duplicated.
    pub fn duplicate(&mut self, node: hecs::Entity) -> Result<hecs::Entity> {
        let pose = *self.get::<Pose>(node)?;
        match self.parent(node)? {
            Some(parent) => self.spawn_child(parent, pose),
            None => self.spawn(pose),
        }
    }

    /// Remove `node` from the tree.
    ///
    /// Its children become roots and keep their world-space pose.
    pub fn despawn(&mut self, node: hecs::Entity) -> Result<()> {
        let children = self.children(node)?;

        let mut detached = Vec::with_capacity(children.len());
        for &child in &children {
            let pose = Pose::from_matrix(self.local_to_world_matrix(child)?)?;
            detached.push((child, pose));
        }

        for (child, pose) in detached {
            self.world
                .remove_one::<Parent>(child)
                .map_err(|_| Error::NoSuchNode(child))?;
            *self.get_mut::<Pose>(child)? = pose;
            self.invalidate(child)?;
        }

        let parent = self.parent(node)?;
        self.unlink(node, parent)?;
        self.world
            .despawn(node)
            .map_err(|_| Error::NoSuchNode(node))?;
        debug!(
            "Despawned transform {:?}, detached {} children",
            node,
            children.len()
        );
        Ok(())
    }

    /// Parent of `node`, if any.
    pub fn parent(&self, node: hecs::Entity) -> Result<Option<hecs::Entity>> {
        self.ensure_node(node)?;
        Ok(self.world.get::<&Parent>(node).ok().map(|parent| parent.0))
    }

    /// Direct children of `node`.
    pub fn children(&self, node: hecs::Entity) -> Result<Vec<hecs::Entity>> {
        Ok(self.get::<Children>(node)?.0.clone())
    }

    /// True if `ancestor` appears on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: hecs::Entity, node: hecs::Entity) -> Result<bool> {
        self.ensure_node(ancestor)?;
        let mut current = self.parent(node)?;
        while let Some(entity) = current {
            if entity == ancestor {
                return Ok(true);
            }
            current = self.parent(entity)?;
        }
        Ok(false)
    }

    /// Attach `node` to `parent`, or detach it with `None`.
    ///
    /// Fails with [`Error::Cycle`] if `parent` is `node` itself or one of its
    /// descendants; the tree is left untouched in that case.
    pub fn set_parent(
        &mut self,
        node: hecs::Entity,
        parent: Option<hecs::Entity>,
        preserve: Preserve,
    ) -> Result<()> {
        let current = self.parent(node)?;
        if current == parent {
            return Ok(());
        }
        if let Some(parent) = parent {
            self.ensure_node(parent)?;
            if parent == node || self.is_ancestor(node, parent)? {
                return Err(Error::Cycle { node, parent });
            }
        }

        let pose = match preserve {
            Preserve::World => {
                let mut mat = self.local_to_world_matrix(node)?;
                if let Some(parent) = parent {
                    mat = self.world_to_local_matrix(parent)? * mat;
                }
                Some(Pose::from_matrix(mat)?)
            }
            Preserve::Local => None,
        };

        self.unlink(node, current)?;
        match parent {
            Some(parent) => {
                self.world
                    .insert_one(node, Parent(parent))
                    .map_err(|_| Error::NoSuchNode(node))?;
                self.get_mut::<Children>(parent)?.0.push(node);
            }
            None => {
                self.world
                    .remove_one::<Parent>(node)
                    .map_err(|_| Error::NoSuchNode(node))?;
            }
        }
        if let Some(pose) = pose {
            *self.get_mut::<Pose>(node)? = pose;
        }
        self.invalidate(node)?;
        debug!("Reparented transform {:?}: {:?} -> {:?}", node, current, parent);
        Ok(())
    }

    /// True if both nodes share a parent and their local poses agree within
    /// the configured epsilon.
    pub fn matches(&self, a: hecs::Entity, b: hecs::Entity) -> Result<bool> {
        if self.parent(a)? != self.parent(b)? {
            return Ok(false);
        }
        let a = *self.get::<Pose>(a)?;
        let b = *self.get::<Pose>(b)?;
        Ok(a.approx_eq(&b, self.config.epsilon))
    }

    fn unlink(&mut self, node: hecs::Entity, parent: Option<hecs::Entity>) -> Result<()> {
        if let Some(parent) = parent {
            self.get_mut::<Children>(parent)?
                .0
                .retain(|&child| child != node);
        }
        Ok(())
    }

    fn ensure_node(&self, node: hecs::Entity) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::NoSuchNode(node))
        }
    }

    fn get<T: hecs::Component>(&self, node: hecs::Entity) -> Result<hecs::Ref<'_, T>> {
        self.world
            .get::<&T>(node)
            .map_err(|_| Error::NoSuchNode(node))
    }

    fn get_mut<T: hecs::Component>(&self, node: hecs::Entity) -> Result<hecs::RefMut<'_, T>> {
        self.world
            .get::<&mut T>(node)
            .map_err(|_| Error::NoSuchNode(node))
    }

    fn check_scale(&self, scale: DVec3) -> Result<()> {
        if scale.is_finite() && scale.abs().min_element() >= self.config.min_scale {
            Ok(())
        } else {
            Err(Error::DegenerateScale(scale))
        }
    }

    /// Validate a pose for storage and normalize its rotation.
    fn checked(&self, pose: Pose) -> Result<Pose> {
        self.check_scale(pose.scale)?;
        Ok(Pose {
            rotation: pose.rotation.normalize(),
            ..pose
        })
    }
}

impl Default for TransformTree {
    fn default() -> Self {
        Self::new()
    }
}
