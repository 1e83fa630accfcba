//! Error types for registration operations.
//!
//! All variants are unrecoverable at the point of detection and propagate
//! to the caller; none are retried internally or replaced by sentinel
//! values that could corrupt an optimization trajectory.

use thiserror::Error;
use voxreg_core::TransformError;

/// Main error type for registration operations.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Two volumes expected to share a grid shape do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A joint histogram has zero total count, so mutual information is
    /// undefined.
    #[error("degenerate histogram: no overlapping samples to bin")]
    DegenerateHistogram,

    /// Transform algebra failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Result type for registration operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;
