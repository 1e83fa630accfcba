//! Metric trait for image similarity measurement.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::Result;

/// Similarity between two volumes already sampled on the same grid.
///
/// Higher values indicate better alignment; the registration driver
/// negates the metric to obtain a cost to minimize.
///
/// # Type Parameters
/// * `B` - The tensor backend
pub trait Metric<B: Backend> {
    /// Score the similarity of two same-shape volumes.
    ///
    /// # Errors
    /// `ShapeMismatch` when the volumes do not share a grid shape;
    /// `DegenerateHistogram` when the metric has no samples to work with.
    fn evaluate(&self, fixed: &Tensor<B, 3>, moving: &Tensor<B, 3>) -> Result<f64>;

    /// Name of this metric.
    fn name(&self) -> &'static str;
}
