//! Resample filter.
//!
//! Maps one image's grid into another's coordinate frame and samples it
//! there, producing a new volume on the target grid.

use std::marker::PhantomData;

use burn::tensor::backend::Backend;
use burn::tensor::{Shape, Tensor, TensorData};

use crate::error::TransformError;
use crate::image::{grid, Image};
use crate::interpolation::{Interpolator, LinearInterpolator};
use crate::transform::Affine;

/// Resample filter.
///
/// Pulls the moving image onto the static image's grid: every static voxel
/// index is mapped through `inverse(moving_affine) * static_affine` into
/// continuous moving-index coordinates and interpolated there. The output
/// always has exactly the static volume's shape and carries the static
/// affine; neither input is mutated.
///
/// This is the hot path of registration - it runs once per cost-function
/// evaluation, O(static voxels) each time, and no partial results are
/// reusable across calls because every call sees a different sampling
/// transform.
pub struct ResampleFilter<B, I>
where
    B: Backend,
    I: Interpolator<B>,
{
    interpolator: I,
    _phantom: PhantomData<B>,
}

impl<B: Backend> ResampleFilter<B, LinearInterpolator> {
    /// Create a resample filter with trilinear interpolation.
    pub fn new() -> Self {
        Self::with_interpolator(LinearInterpolator::new())
    }
}

impl<B: Backend> Default for ResampleFilter<B, LinearInterpolator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, I> ResampleFilter<B, I>
where
    B: Backend,
    I: Interpolator<B>,
{
    /// Create a resample filter with a custom interpolator.
    pub fn with_interpolator(interpolator: I) -> Self {
        Self {
            interpolator,
            _phantom: PhantomData,
        }
    }

    /// Resample `moving` onto `static_image`'s grid.
    pub fn apply(
        &self,
        static_image: &Image<B>,
        moving: &Image<B>,
    ) -> Result<Image<B>, TransformError> {
        let sampling =
            Affine::resampling_transform(static_image.affine(), moving.affine())?;
        let (mat, vec) = sampling.to_mat_vec();

        let device = moving.data().device();
        let shape = static_image.shape();

        // 1. Static-grid voxel indices, one row per output voxel.
        let static_indices = grid::generate_grid_3d::<B>(shape, &device);

        // 2. Map into moving-index space: index @ M^T + t (row vectors).
        let mut mat_t = Vec::with_capacity(9);
        for r in 0..3 {
            for c in 0..3 {
                mat_t.push(mat[(c, r)] as f32);
            }
        }
        let mat_tensor =
            Tensor::<B, 2>::from_data(TensorData::new(mat_t, Shape::new([3, 3])), &device);
        let vec_tensor = Tensor::<B, 1>::from_data(
            TensorData::new(
                vec![vec[0] as f32, vec[1] as f32, vec[2] as f32],
                Shape::new([3]),
            ),
            &device,
        )
        .reshape([1, 3]);
        let moving_indices = static_indices.matmul(mat_tensor) + vec_tensor;

        // 3. Sample the moving volume at the mapped coordinates.
        let values = self.interpolator.interpolate(moving.data(), moving_indices);
        let data = values.reshape(shape);

        Ok(Image::new(data, *static_image.affine()))
    }
}

/// Resample `moving` onto the static grid with trilinear interpolation.
pub fn resample<B: Backend>(
    static_image: &Image<B>,
    moving: &Image<B>,
) -> Result<Image<B>, TransformError> {
    ResampleFilter::new().apply(static_image, moving)
}
