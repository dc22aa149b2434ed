mod error;
mod propagation;
mod time_grid;
mod types;

pub use error::{GridError, PropagationError};
pub use propagation::propagate;
pub use time_grid::TimeGrid;
pub use types::{PositionSample, ReferenceFrame, SatelliteTrack};
