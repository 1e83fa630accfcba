pub mod resample;

pub use resample::{resample, ResampleFilter};
