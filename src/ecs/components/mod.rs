//! ECS components (local pose, world caches, hierarchy links).

pub mod transform;

pub use transform::*;
