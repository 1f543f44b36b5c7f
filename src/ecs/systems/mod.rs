//! ECS systems (transform cache refresh).

pub mod transform;

pub use transform::transform_system;
