pub mod grid;
pub mod image;

pub use image::Image;
