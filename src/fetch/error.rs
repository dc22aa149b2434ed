use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected HTTP status {status} for CATNR={norad_id}")]
    Status { norad_id: u32, status: u16 },
    #[error("could not parse TLE from response for CATNR={norad_id}")]
    MalformedPayload { norad_id: u32 },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}
