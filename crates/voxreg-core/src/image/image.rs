//! Image type pairing voxel data with its voxel-to-world affine.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use nalgebra::Vector3;

use crate::transform::Affine;

/// A 3D scalar image with a voxel-to-world affine.
///
/// The tensor has shape `(I, J, K)`; the affine maps voxel indices in
/// array-axis order `(i, j, k)` into the world frame. Images are read-only
/// once constructed: filters produce new images instead of mutating their
/// inputs.
///
/// # Type Parameters
/// * `B` - The backend for tensor operations
#[derive(Debug, Clone)]
pub struct Image<B: Backend> {
    data: Tensor<B, 3>,
    affine: Affine,
}

impl<B: Backend> Image<B> {
    /// Create a new image from voxel data and its affine.
    pub fn new(data: Tensor<B, 3>, affine: Affine) -> Self {
        Self { data, affine }
    }

    /// The voxel data tensor.
    pub fn data(&self) -> &Tensor<B, 3> {
        &self.data
    }

    /// The voxel-to-world affine.
    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    /// The image shape as `[I, J, K]`.
    pub fn shape(&self) -> [usize; 3] {
        self.data.dims()
    }

    /// Intensity-weighted centroid in voxel-index space.
    ///
    /// Components are undefined (non-finite) when the total intensity is
    /// zero; callers aligning centers of mass are expected to pass volumes
    /// with mass.
    pub fn center_of_mass(&self) -> Vector3<f64> {
        let [ni, nj, nk] = self.shape();
        let data = self.data.clone().into_data().convert::<f32>();
        let values = data
            .as_slice::<f32>()
            .expect("image tensor converts to f32 elements");

        let mut total = 0.0f64;
        let mut weighted = Vector3::zeros();
        let mut idx = 0;
        for i in 0..ni {
            for j in 0..nj {
                for k in 0..nk {
                    let w = values[idx] as f64;
                    idx += 1;
                    total += w;
                    weighted += w * Vector3::new(i as f64, j as f64, k as f64);
                }
            }
        }
        weighted / total
    }
}
