//! Error types for transform algebra.

use thiserror::Error;

/// Errors raised by affine transform operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// An affine could not be inverted.
    ///
    /// Raised before any sampling happens, so a non-invertible moving
    /// affine never degrades into NaN coordinates downstream.
    #[error("singular transform: affine with determinant {determinant} is not invertible")]
    SingularTransform {
        /// Determinant of the offending matrix.
        determinant: f64,
    },
}
