//! Mutual information metric.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::histogram::JointHistogram;
use super::trait_::Metric;
use crate::error::{RegistrationError, Result};

/// Mutual information from a hard-binned joint intensity histogram.
///
/// Measures the statistical dependence between the intensity distributions
/// of two co-registered volumes, which makes it usable across imaging
/// modalities with no direct intensity correspondence. The bin count trades
/// resolution against noise robustness; the rigid registration driver uses
/// a finer histogram for its translation phase than for its rotation phase.
#[derive(Debug, Clone, Copy)]
pub struct MutualInformation {
    num_bins: usize,
}

impl MutualInformation {
    /// Create a mutual information metric with the given bin count.
    pub fn new(num_bins: usize) -> Self {
        assert!(num_bins > 0, "histogram needs at least one bin");
        Self { num_bins }
    }
}

impl Default for MutualInformation {
    /// The finer translation-phase resolution.
    fn default() -> Self {
        Self::new(64)
    }
}

impl<B: Backend> Metric<B> for MutualInformation {
    fn evaluate(&self, fixed: &Tensor<B, 3>, moving: &Tensor<B, 3>) -> Result<f64> {
        let expected = fixed.dims();
        let actual = moving.dims();
        if expected != actual {
            return Err(RegistrationError::ShapeMismatch {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }

        let fixed_data = fixed.clone().into_data().convert::<f32>();
        let moving_data = moving.clone().into_data().convert::<f32>();
        let fixed_values = fixed_data
            .as_slice::<f32>()
            .expect("volume tensor converts to f32 elements");
        let moving_values = moving_data
            .as_slice::<f32>()
            .expect("volume tensor converts to f32 elements");

        let hist = JointHistogram::from_samples(fixed_values, moving_values, self.num_bins)?;
        Ok(hist.mutual_information())
    }

    fn name(&self) -> &'static str {
        "MutualInformation"
    }
}

/// Mutual information between two same-shape volumes.
pub fn mutual_information<B: Backend>(
    a: &Tensor<B, 3>,
    b: &Tensor<B, 3>,
    nbins: usize,
) -> Result<f64> {
    MutualInformation::new(nbins).evaluate(a, b)
}
