use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("time step must be positive")]
    NonPositiveStep,
    #[error("time window must not be negative")]
    NegativeDuration,
    #[error("time grid would have {points} points (max {max})")]
    TooManyPoints { points: i64, max: i64 },
}

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("timestamp out of range: {0}")]
    Epoch(String),
    #[error("propagation error: {0}")]
    Propagation(String),
}

impl From<sgp4::Error> for PropagationError {
    fn from(err: sgp4::Error) -> Self {
        PropagationError::Propagation(err.to_string())
    }
}
