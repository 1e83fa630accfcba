pub mod affine;
pub mod euler;

pub use affine::Affine;
