use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("satellites file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid satellites file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no satellites configured")]
    Empty,
    #[error("duplicate satellite name: {0}")]
    DuplicateName(String),
    #[error("invalid satellite name {0:?}: names must be non-empty, without commas or surrounding spaces")]
    InvalidName(String),
}
