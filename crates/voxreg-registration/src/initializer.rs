//! Center-of-mass initialization.

use burn::tensor::backend::Backend;
use voxreg_core::{Affine, Image};

/// Translation-only update that superimposes the two centers of mass.
///
/// Each volume's intensity-weighted centroid is mapped into the world frame
/// through its own affine; the returned transform is
/// `translation(displacement) * moving_affine`, the moving affine updated
/// so that both centers of mass coincide after resampling. This gives the
/// rigid optimizer its starting point. It never evaluates a similarity
/// metric and runs in a single pass over each volume.
pub fn center_of_mass_transform<B: Backend>(
    static_image: &Image<B>,
    moving: &Image<B>,
) -> Affine {
    let static_world = static_image.affine().apply(&static_image.center_of_mass());
    let moving_world = moving.affine().apply(&moving.center_of_mass());

    let displacement = static_world - moving_world;
    Affine::from_translation(displacement) * *moving.affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::{Shape, Tensor, TensorData};
    use burn_ndarray::NdArray;
    use nalgebra::Vector3;

    type B = NdArray<f32>;

    fn image_from_vec(data: Vec<f32>, shape: [usize; 3], affine: Affine) -> Image<B> {
        let device = Default::default();
        let tensor = Tensor::<B, 3>::from_data(TensorData::new(data, Shape::new(shape)), &device);
        Image::new(tensor, affine)
    }

    #[test]
    fn test_recovers_known_index_shift() {
        let n = 11;
        let mut fixed = vec![0.0; n * n * n];
        fixed[5 * n * n + 5 * n + 5] = 100.0;
        let mut moved = vec![0.0; n * n * n];
        moved[4 * n * n + 3 * n + 2] = 100.0;

        let static_image = image_from_vec(fixed, [n, n, n], Affine::identity());
        let moving = image_from_vec(moved, [n, n, n], Affine::identity());

        let updated = center_of_mass_transform(&static_image, &moving);
        let (mat, vec) = updated.to_mat_vec();

        assert!((mat - nalgebra::Matrix3::identity()).norm() < 1e-9);
        assert!((vec - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn test_world_displacement_uses_both_affines() {
        // Identical volumes whose affines already differ by a translation:
        // the centroids coincide in index space but not in world space.
        let n = 7;
        let mut data = vec![0.0; n * n * n];
        data[3 * n * n + 3 * n + 3] = 1.0;

        let static_image = image_from_vec(data.clone(), [n, n, n], Affine::identity());
        let moving = image_from_vec(
            data,
            [n, n, n],
            Affine::from_translation(Vector3::new(2.0, 0.0, -1.0)),
        );

        let updated = center_of_mass_transform(&static_image, &moving);
        let (_, vec) = updated.to_mat_vec();
        // The shift cancels the world offset of the moving centroid.
        assert!((vec - Vector3::new(0.0, 0.0, 0.0)).norm() < 1e-9);
    }
}
