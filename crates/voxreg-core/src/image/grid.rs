//! Voxel-index grid generation.

use burn::tensor::backend::Backend;
use burn::tensor::{Shape, Tensor, TensorData};

/// Generate the full grid of voxel indices for a 3D shape.
///
/// Returns a tensor of shape `[N, 3]` where N is the total number of
/// voxels. Rows are in array-axis order `(i, j, k)` with `k` varying
/// fastest, matching the row-major layout of image tensors so that row `n`
/// corresponds to flat element `n`.
pub fn generate_grid_3d<B: Backend>(shape: [usize; 3], device: &B::Device) -> Tensor<B, 2> {
    let [ni, nj, nk] = shape;
    let total = ni * nj * nk;

    let mut grid = Vec::with_capacity(total * 3);
    for i in 0..ni {
        for j in 0..nj {
            for k in 0..nk {
                grid.push(i as f32);
                grid.push(j as f32);
                grid.push(k as f32);
            }
        }
    }

    Tensor::<B, 1>::from_data(TensorData::new(grid, Shape::new([total * 3])), device)
        .reshape([total, 3])
}
