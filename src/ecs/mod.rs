//! Entity Component System integration with hecs.
//!
//! Every hierarchy node is a `hecs::Entity`; its data lives in the components
//! below and is kept consistent by [`TransformTree`](crate::TransformTree).

pub mod components;
pub mod systems;

pub mod prelude {
    pub use super::components::*;
    pub use super::systems::transform_system;
}
