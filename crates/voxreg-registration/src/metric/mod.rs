pub mod histogram;
pub mod mutual_information;
pub mod trait_;

pub use histogram::JointHistogram;
pub use mutual_information::{mutual_information, MutualInformation};
pub use trait_::Metric;
