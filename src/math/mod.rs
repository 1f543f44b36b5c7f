//! Affine decomposition math.
//!
//! Everything here works in `f64` on glam's column-major matrices. Comments use
//! `(row, column)` indexing; glam stores `m.col(c)[r]`.

pub mod affine;
pub mod rotation;

pub use affine::{cholesky, decompose, recompose, recompose_inverse};
pub use rotation::{quat_from_rotation, rotations_approx_eq};
