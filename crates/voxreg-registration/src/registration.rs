//! Rigid registration driver.

use burn::tensor::backend::Backend;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::info;

use voxreg_core::transform::euler;
use voxreg_core::{resample, Affine, Image};

use crate::error::Result;
use crate::metric::{Metric, MutualInformation};
use crate::optimizer::Powell;

/// Which parameter groups the rigid search optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationMode {
    /// Translation search followed by rotation search.
    Combined,
    /// Translation search only; rotation stays at zero angles.
    TranslationOnly,
    /// Rotation search only; translation stays at the zero vector.
    RotationOnly,
}

/// Rigid-body registration by mutual information.
///
/// Searches the 3 translation parameters, then the 3 Euler angles, with
/// Powell's method. Every cost evaluation resamples the moving image onto
/// the static grid under the candidate transform and scores negative
/// mutual information, so the resampler dominates total runtime.
///
/// The translation phase uses a finer joint histogram than the rotation
/// phase: rotation sweeps cover larger intensity shuffles per parameter
/// step, where coarser bins are less noisy. Both counts are configurable
/// but the 64/32 defaults are the documented behavior.
///
/// The driver does not seed itself; callers typically pass a moving image
/// whose affine was updated by
/// [`crate::initializer::center_of_mass_transform`].
#[derive(Debug, Clone)]
pub struct RigidRegistration {
    max_iterations: usize,
    mode: RegistrationMode,
    translation_bins: usize,
    rotation_bins: usize,
}

impl RigidRegistration {
    /// Create a driver bounded by `max_iterations` Powell iterations per
    /// phase, in combined mode.
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            mode: RegistrationMode::Combined,
            translation_bins: 64,
            rotation_bins: 32,
        }
    }

    /// Restrict the search to one parameter group.
    pub fn with_mode(mut self, mode: RegistrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the per-phase histogram resolutions.
    pub fn with_histogram_bins(mut self, translation_bins: usize, rotation_bins: usize) -> Self {
        assert!(
            translation_bins > 0 && rotation_bins > 0,
            "histogram needs at least one bin"
        );
        self.translation_bins = translation_bins;
        self.rotation_bins = rotation_bins;
        self
    }

    /// Run the search and return the rigid correction affine.
    ///
    /// The result recombines the best rotation matrix and the best
    /// translation vector into a single affine,
    /// `from_mat_vec(best_rotation, best_translation)` - deliberately not
    /// the product of the two intermediate phase affines. A phase skipped
    /// by the mode contributes the identity (zero vector / zero angles).
    ///
    /// # Errors
    /// Propagates `SingularTransform` if a candidate transform cannot be
    /// inverted and any metric failure; the search is aborted, not
    /// retried.
    pub fn execute<B: Backend>(
        &self,
        static_image: &Image<B>,
        moving: &Image<B>,
    ) -> Result<Affine> {
        let powell = Powell::new(self.max_iterations);

        let best_translation = match self.mode {
            RegistrationMode::Combined | RegistrationMode::TranslationOnly => {
                let metric = MutualInformation::new(self.translation_bins);
                let mut cost = |params: &[f64]| -> Result<f64> {
                    let shift = Affine::from_translation(Vector3::new(
                        params[0], params[1], params[2],
                    ));
                    let candidate =
                        Image::new(moving.data().clone(), *moving.affine() * shift);
                    let resampled = resample(static_image, &candidate)?;
                    Ok(-metric.evaluate(static_image.data(), resampled.data())?)
                };

                info!("translation search ({} bins)", self.translation_bins);
                let result = powell.minimize(&mut cost, &[0.0, 0.0, 0.0])?;
                info!(
                    "translation search done: {} iterations, cost {:.6}, converged {}",
                    result.iterations, result.fval, result.converged
                );
                Vector3::new(result.x[0], result.x[1], result.x[2])
            }
            RegistrationMode::RotationOnly => Vector3::zeros(),
        };

        // The rotation cost closes over the translation-updated affine as
        // an explicit captured value, keeping the driver reentrant.
        let translated_affine = *moving.affine() * Affine::from_translation(best_translation);

        let best_rotation = match self.mode {
            RegistrationMode::Combined | RegistrationMode::RotationOnly => {
                let metric = MutualInformation::new(self.rotation_bins);
                let mut cost = |params: &[f64]| -> Result<f64> {
                    let rotation = Affine::from_rotation(euler::rotation_matrix(
                        params[0], params[1], params[2],
                    ));
                    let candidate =
                        Image::new(moving.data().clone(), translated_affine * rotation);
                    let resampled = resample(static_image, &candidate)?;
                    Ok(-metric.evaluate(static_image.data(), resampled.data())?)
                };

                info!("rotation search ({} bins)", self.rotation_bins);
                let result = powell.minimize(&mut cost, &[0.0, 0.0, 0.0])?;
                info!(
                    "rotation search done: {} iterations, cost {:.6}, converged {}",
                    result.iterations, result.fval, result.converged
                );
                euler::rotation_matrix(result.x[0], result.x[1], result.x[2])
            }
            RegistrationMode::TranslationOnly => Matrix3::identity(),
        };

        Ok(Affine::from_mat_vec(best_rotation, best_translation))
    }
}
