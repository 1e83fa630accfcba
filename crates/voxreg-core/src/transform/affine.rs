//! Homogeneous affine transforms between voxel and world coordinates.
//!
//! An [`Affine`] maps homogeneous voxel-index coordinates into a reference
//! (world) frame: `world = M * voxel + t` for the 3x3 linear part `M` and
//! translation `t`.

use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// A 4x4 homogeneous transform mapping voxel indices to a world frame.
///
/// The linear part is not assumed orthonormal: a loaded affine may carry
/// scale or shear. Only the matrices produced by
/// [`crate::transform::euler`] are guaranteed proper rotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine(Matrix4<f64>);

impl Affine {
    /// Wrap an existing 4x4 homogeneous matrix.
    pub fn new(matrix: Matrix4<f64>) -> Self {
        Self(matrix)
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Compose an affine from a 3x3 linear part and a translation vector.
    ///
    /// Exact inverse of [`Affine::to_mat_vec`] up to floating-point
    /// rounding.
    pub fn from_mat_vec(mat: Matrix3<f64>, vec: Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&mat);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&vec);
        Self(matrix)
    }

    /// A pure translation.
    pub fn from_translation(vec: Vector3<f64>) -> Self {
        Self::from_mat_vec(Matrix3::identity(), vec)
    }

    /// A pure rotation (or any linear map) about the index origin.
    pub fn from_rotation(mat: Matrix3<f64>) -> Self {
        Self::from_mat_vec(mat, Vector3::zeros())
    }

    /// Decompose into the 3x3 linear part and the translation vector.
    pub fn to_mat_vec(&self) -> (Matrix3<f64>, Vector3<f64>) {
        let mat = self.0.fixed_view::<3, 3>(0, 0).into_owned();
        let vec = Vector3::new(self.0[(0, 3)], self.0[(1, 3)], self.0[(2, 3)]);
        (mat, vec)
    }

    /// The underlying 4x4 matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Invert the transform, rejecting singular matrices explicitly.
    pub fn try_inverse(&self) -> Result<Affine, TransformError> {
        self.0
            .try_inverse()
            .map(Affine)
            .ok_or(TransformError::SingularTransform {
                determinant: self.0.determinant(),
            })
    }

    /// The transform that maps static-grid voxel indices into moving-grid
    /// voxel index space: `inverse(moving) * static`.
    ///
    /// Despite relating the moving image to the static one, this runs in
    /// the pull direction: applied to a static-grid index it yields the
    /// continuous moving-grid index to sample from.
    pub fn resampling_transform(
        static_affine: &Affine,
        moving_affine: &Affine,
    ) -> Result<Affine, TransformError> {
        Ok(moving_affine.try_inverse()? * *static_affine)
    }

    /// Apply the transform to a single index-space point.
    pub fn apply(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let (mat, vec) = self.to_mat_vec();
        mat * point + vec
    }
}

impl std::ops::Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Affine(self.0 * rhs.0)
    }
}
