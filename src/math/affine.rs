//! Affine matrix decomposition and recomposition.
//!
//! A pose is recomposed as `T * R * S * K`: translation, rotation, diagonal
//! scale and a unit upper-triangular shear `K` holding the skew coefficients
//! `(xy, xz, yz)` at `(0, 1)`, `(0, 2)` and `(1, 2)`.

use glam::{DMat3, DMat4, DVec3};

use super::rotation::quat_from_rotation;
use crate::ecs::components::transform::Pose;
use crate::error::{Error, Result};

/// Upper-triangular Cholesky factor `U` of a symmetric positive-definite
/// matrix, so that `a == U^T * U`.
pub fn cholesky(a: &DMat3) -> DMat3 {
    // Lower factor, row-major: l[i][k] is row i, column k.
    let mut l = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for k in 0..i {
            let mut value = a.col(k)[i];
            for j in 0..k {
                value -= l[i][j] * l[k][j];
            }
            l[i][k] = value / l[k][k];
        }
        let mut value = a.col(i)[i];
        for j in 0..i {
            value -= l[i][j] * l[i][j];
        }
        l[i][i] = value.sqrt();
    }
    // Rows of L become columns, which is exactly L^T.
    DMat3::from_cols_array_2d(&l)
}

fn shear_matrix(skew: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::X,
        DVec3::new(skew.x, 1.0, 0.0),
        DVec3::new(skew.y, skew.z, 1.0),
    )
}

fn inverse_shear_matrix(skew: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::X,
        DVec3::new(-skew.x, 1.0, 0.0),
        DVec3::new(skew.x * skew.z - skew.y, -skew.z, 1.0),
    )
}

fn affine_from_parts(linear: DMat3, translation: DVec3) -> DMat4 {
    DMat4::from_cols(
        linear.x_axis.extend(0.0),
        linear.y_axis.extend(0.0),
        linear.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}

/// Decompose an affine matrix into translation, rotation, scale and skew.
///
/// The returned rotation is always proper; a reflection is carried by a
/// negative `scale.x`. Fails with [`Error::SingularMatrix`] when the linear
/// block has no inverse.
///
/// The check is on exact singularity only: the determinant of a small but
/// valid block shrinks with the cube of its scale, so no absolute cutoff is
/// safe to apply here.
pub fn decompose(mat: DMat4) -> Result<Pose> {
    let translation = mat.w_axis.truncate();
    let rzs = DMat3::from_mat4(mat);

    let det = rzs.determinant();
    if !det.is_finite() || det == 0.0 {
        return Err(Error::SingularMatrix(det));
    }

    let zs = cholesky(&(rzs.transpose() * rzs));
    let mut scale = DVec3::new(zs.x_axis.x, zs.y_axis.y, zs.z_axis.z);
    // Underflow in the normal matrix shows up as a zero or NaN diagonal.
    if !scale.is_finite() || scale.min_element() <= 0.0 {
        return Err(Error::SingularMatrix(det));
    }
    let skew = DVec3::new(
        zs.y_axis.x / scale.x,
        zs.z_axis.x / scale.x,
        zs.z_axis.y / scale.y,
    );

    let mut rot = rzs * zs.inverse();
    if rot.determinant() < 0.0 {
        // Negating the first row of ZS (and scale.x with it) is the same as
        // negating the first column of R * ZS^-1.
        scale.x = -scale.x;
        rot.x_axis = -rot.x_axis;
    }

    Ok(Pose {
        translation,
        rotation: quat_from_rotation(&rot),
        scale,
        skew,
    })
}

/// Build the local-to-parent matrix of a pose.
pub fn recompose(pose: &Pose) -> DMat4 {
    let linear = DMat3::from_quat(pose.rotation)
        * DMat3::from_diagonal(pose.scale)
        * shear_matrix(pose.skew);
    affine_from_parts(linear, pose.translation)
}

/// Build the inverse of [`recompose`] without a general matrix inverse.
pub fn recompose_inverse(pose: &Pose) -> DMat4 {
    let linear = inverse_shear_matrix(pose.skew)
        * DMat3::from_diagonal(pose.scale.recip())
        * DMat3::from_quat(pose.rotation.conjugate());
    affine_from_parts(linear, -(linear * pose.translation))
}
