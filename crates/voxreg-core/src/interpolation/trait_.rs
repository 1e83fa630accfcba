//! Interpolator trait.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Samples a volume at continuous voxel-index coordinates.
///
/// # Type Parameters
/// * `B` - The tensor backend
pub trait Interpolator<B: Backend> {
    /// Interpolate `data` at each row of `indices`.
    ///
    /// `indices` has shape `[N, 3]` with columns in array-axis order
    /// `(i, j, k)`; the result has shape `[N]`.
    fn interpolate(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1>;
}
