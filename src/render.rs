//! Renderer handoff.
//!
//! The hierarchy works in `f64`; GPU uniforms are `f32`.

use glam::DMat4;
use tracing::warn;

use crate::ecs::systems::transform_system;
use crate::error::Result;
use crate::hierarchy::TransformTree;

/// Model uniform data for GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Build from a model matrix and its inverse.
    ///
    /// The normal matrix is the inverse-transpose, so passing the cached
    /// world-to-local matrix avoids another inversion.
    pub fn from_matrices(local_to_world: DMat4, world_to_local: DMat4) -> Self {
        Self {
            model: local_to_world.as_mat4().to_cols_array_2d(),
            normal_matrix: world_to_local.transpose().as_mat4().to_cols_array_2d(),
        }
    }
}

impl TransformTree {
    /// GPU model uniform of `node`.
    pub fn model_uniform(&mut self, node: hecs::Entity) -> Result<ModelUniform> {
        let local_to_world = self.local_to_world_matrix(node)?;
        let world_to_local = self.world_to_local_matrix(node)?;
        Ok(ModelUniform::from_matrices(local_to_world, world_to_local))
    }
}

/// Refresh the tree and collect a model uniform for every node.
///
/// A node whose matrices cannot be read is logged and left out.
pub fn extract_model_uniforms(tree: &mut TransformTree) -> Vec<(hecs::Entity, ModelUniform)> {
    transform_system(tree);

    let nodes: Vec<hecs::Entity> = tree.world().iter().map(|entity| entity.entity()).collect();
    nodes
        .into_iter()
        .filter_map(|entity| match tree.model_uniform(entity) {
            Ok(uniform) => Some((entity, uniform)),
            Err(err) => {
                warn!("Skipping model uniform for {:?}: {}", entity, err);
                None
            }
        })
        .collect()
}
