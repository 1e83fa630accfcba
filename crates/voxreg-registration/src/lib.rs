pub mod error;
pub mod initializer;
pub mod metric;
pub mod optimizer;
pub mod registration;

pub use error::{RegistrationError, Result};
pub use initializer::center_of_mass_transform;
pub use metric::{mutual_information, MutualInformation};
pub use registration::{RegistrationMode, RigidRegistration};
