//! Error types for the transform hierarchy.

use glam::DVec3;
use thiserror::Error;

/// Errors reported by [`TransformTree`](crate::TransformTree) operations.
///
/// A failing operation never leaves the tree partially modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Reparenting would make a node its own ancestor.
    #[error("setting the parent of {node:?} to {parent:?} would create a cycle")]
    Cycle {
        node: hecs::Entity,
        parent: hecs::Entity,
    },

    /// The handle was despawned or never belonged to this tree.
    #[error("no transform node {0:?}")]
    NoSuchNode(hecs::Entity),

    /// A scale component is zero (or close enough that inverting it blows up).
    #[error("degenerate scale {0}")]
    DegenerateScale(DVec3),

    /// The linear block of a matrix cannot be decomposed.
    #[error("matrix is singular (determinant {0})")]
    SingularMatrix(f64),
}

/// Result type alias using the hierarchy's Error type.
pub type Result<T> = std::result::Result<T, Error>;
