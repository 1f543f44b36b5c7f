//! Rein transform hierarchy
//!
//! Affine scene-graph nodes with translation, rotation, non-uniform scale and
//! skew, lazily cached world matrices, and cycle-checked reparenting.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **math** - Affine decomposition (Cholesky, matrix to quaternion) and recomposition
//! 2. **ecs** - hecs components for node data and the per-frame refresh system
//! 3. **hierarchy** - `TransformTree`, the arena that owns nodes and keeps links consistent
//! 4. **render** - `ModelUniform` handoff for renderers

pub mod config;
pub mod ecs;
pub mod error;
pub mod hierarchy;
pub mod math;
pub mod render;

#[cfg(test)]
mod test_util;

// Re-export commonly used types
pub use config::HierarchyConfig;
pub use ecs::prelude::*;
pub use error::{Error, Result};
pub use hierarchy::{Preserve, TransformBuilder, TransformTree};
pub use render::{extract_model_uniforms, ModelUniform};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
