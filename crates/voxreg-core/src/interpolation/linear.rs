//! Trilinear interpolation with constant-zero padding.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

use super::trait_::Interpolator;

/// Trilinear interpolator.
///
/// Each sample is the weighted average of the 8 nearest integer-index
/// neighbors. A neighbor outside the volume contributes an intensity of 0
/// (constant padding, not clamped or mirrored), so samples fade to zero at
/// the volume boundary instead of smearing edge voxels outward.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolator;

impl LinearInterpolator {
    /// Create a new trilinear interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Interpolator<B> for LinearInterpolator {
    fn interpolate(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let [d0, d1, d2] = data.dims();
        let batch_size = indices.dims()[0];
        let device = indices.device();

        // Extract coordinates; columns are (i, j, k).
        let i = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let j = indices.clone().narrow(1, 1, 1).squeeze::<1>(1);
        let k = indices.narrow(1, 2, 1).squeeze::<1>(1);

        let i0 = i.clone().floor();
        let j0 = j.clone().floor();
        let k0 = k.clone().floor();

        let wi = i - i0.clone();
        let wj = j - j0.clone();
        let wk = k - k0.clone();

        let i1 = i0.clone() + 1.0;
        let j1 = j0.clone() + 1.0;
        let k1 = k0.clone() + 1.0;

        // Validity of each neighbor coordinate, computed before clamping.
        let valid = |coord: &Tensor<B, 1>, dim: usize| -> Tensor<B, 1> {
            (coord.clone().greater_equal_elem(0.0).int()
                * coord.clone().lower_equal_elem((dim - 1) as f32).int())
            .float()
        };
        let vi0 = valid(&i0, d0);
        let vi1 = valid(&i1, d0);
        let vj0 = valid(&j0, d1);
        let vj1 = valid(&j1, d1);
        let vk0 = valid(&k0, d2);
        let vk1 = valid(&k1, d2);

        // Clamp for safe gathering; the masks zero out clamped neighbors.
        let i0_i = i0.clamp(0.0, (d0 - 1) as f64).int();
        let j0_i = j0.clamp(0.0, (d1 - 1) as f64).int();
        let k0_i = k0.clamp(0.0, (d2 - 1) as f64).int();
        let i1_i = i1.clamp(0.0, (d0 - 1) as f64).int();
        let j1_i = j1.clamp(0.0, (d1 - 1) as f64).int();
        let k1_i = k1.clamp(0.0, (d2 - 1) as f64).int();

        // Strides for the (I, J, K) row-major layout.
        let stride_i = (d1 * d2) as i32;
        let stride_j = d2 as i32;

        let flat_data = data.clone().reshape([d0 * d1 * d2]);

        // Gather the 8 neighbors; out-of-bounds neighbors contribute 0.
        let v000 = Self::gather(&flat_data, &i0_i, &j0_i, &k0_i, stride_i, stride_j)
            * (vi0.clone() * vj0.clone() * vk0.clone());
        let v001 = Self::gather(&flat_data, &i0_i, &j0_i, &k1_i, stride_i, stride_j)
            * (vi0.clone() * vj0.clone() * vk1.clone());
        let v010 = Self::gather(&flat_data, &i0_i, &j1_i, &k0_i, stride_i, stride_j)
            * (vi0.clone() * vj1.clone() * vk0.clone());
        let v011 = Self::gather(&flat_data, &i0_i, &j1_i, &k1_i, stride_i, stride_j)
            * (vi0 * vj1.clone() * vk1.clone());
        let v100 = Self::gather(&flat_data, &i1_i, &j0_i, &k0_i, stride_i, stride_j)
            * (vi1.clone() * vj0.clone() * vk0.clone());
        let v101 = Self::gather(&flat_data, &i1_i, &j0_i, &k1_i, stride_i, stride_j)
            * (vi1.clone() * vj0 * vk1.clone());
        let v110 = Self::gather(&flat_data, &i1_i, &j1_i, &k0_i, stride_i, stride_j)
            * (vi1.clone() * vj1.clone() * vk0);
        let v111 = Self::gather(&flat_data, &i1_i, &j1_i, &k1_i, stride_i, stride_j)
            * (vi1 * vj1 * vk1);

        let one = Tensor::<B, 1>::ones([batch_size], &device);
        let one_minus_wi = one.clone() - wi.clone();
        let one_minus_wj = one.clone() - wj.clone();
        let one_minus_wk = one - wk.clone();

        // Interpolate along k, then j, then i.
        let c00 = v000 * one_minus_wk.clone() + v001 * wk.clone();
        let c01 = v010 * one_minus_wk.clone() + v011 * wk.clone();
        let c10 = v100 * one_minus_wk.clone() + v101 * wk.clone();
        let c11 = v110 * one_minus_wk + v111 * wk;

        let c0 = c00 * one_minus_wj.clone() + c01 * wj.clone();
        let c1 = c10 * one_minus_wj + c11 * wj;

        c0 * one_minus_wi + c1 * wi
    }
}

impl LinearInterpolator {
    #[inline]
    fn gather<B: Backend>(
        flat_data: &Tensor<B, 1>,
        ii: &Tensor<B, 1, Int>,
        ji: &Tensor<B, 1, Int>,
        ki: &Tensor<B, 1, Int>,
        stride_i: i32,
        stride_j: i32,
    ) -> Tensor<B, 1> {
        let idx = ii.clone() * stride_i + ji.clone() * stride_j + ki.clone();
        flat_data.clone().gather(0, idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::{Shape, TensorData};
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn sample(data_vec: Vec<f32>, shape: [usize; 3], coords: Vec<[f32; 3]>) -> Vec<f32> {
        let device = Default::default();
        let data = Tensor::<TestBackend, 3>::from_data(
            TensorData::new(data_vec, Shape::new(shape)),
            &device,
        );
        let n = coords.len();
        let flat: Vec<f32> = coords.into_iter().flatten().collect();
        let indices = Tensor::<TestBackend, 1>::from_data(
            TensorData::new(flat, Shape::new([n * 3])),
            &device,
        )
        .reshape([n, 3]);

        let interpolator = LinearInterpolator::new();
        let result = interpolator.interpolate(&data, indices);
        result.into_data().as_slice::<f32>().unwrap().to_vec()
    }

    #[test]
    fn test_values_at_grid_points() {
        // Shape [2, 2, 2], value encodes the index: i*100 + j*10 + k.
        let data = vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0];
        let out = sample(
            data,
            [2, 2, 2],
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 1.0],
            ],
        );
        assert_eq!(out, vec![0.0, 1.0, 10.0, 100.0, 111.0]);
    }

    #[test]
    fn test_center_is_average_of_corners() {
        let data = vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0];
        let out = sample(data, [2, 2, 2], vec![[0.5, 0.5, 0.5]]);
        let expected = (0.0 + 1.0 + 10.0 + 11.0 + 100.0 + 101.0 + 110.0 + 111.0) / 8.0;
        assert!((out[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_bounds_neighbors_contribute_zero() {
        // Uniform ones: any deviation from 1.0 must come from zero padding.
        let data = vec![1.0; 8];
        let out = sample(
            data,
            [2, 2, 2],
            vec![
                [-0.5, 0.0, 0.0], // half a voxel outside on one axis
                [1.5, 1.0, 1.0],  // half a voxel outside on the high side
                [-3.0, 0.0, 0.0], // far outside
                [0.0, 0.0, 5.0],  // far outside on k
            ],
        );
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
        assert_eq!(out[3], 0.0);
    }

    #[test]
    fn test_corner_fade_is_separable() {
        // Outside along two axes at once: weights multiply.
        let data = vec![1.0; 8];
        let out = sample(data, [2, 2, 2], vec![[-0.5, -0.5, 0.0]]);
        assert!((out[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_fractional_along_one_axis() {
        let data = vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0];
        let out = sample(data, [2, 2, 2], vec![[0.25, 0.0, 0.0]]);
        assert!((out[0] - 25.0).abs() < 1e-5);
    }
}
