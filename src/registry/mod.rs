mod error;
mod types;

pub use error::RegistryError;
pub use types::{Satellite, SatelliteRegistry};
