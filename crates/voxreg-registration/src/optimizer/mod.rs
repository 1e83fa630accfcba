pub mod brent;
pub mod powell;

pub use powell::{Powell, PowellResult};
