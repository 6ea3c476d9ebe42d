use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("destination identity must contain at least one output index")]
    EmptyDestinationId,
    #[error("invalid destination identity: {0:?}")]
    InvalidDestinationId(String),
    #[error("invalid preset identity: {0:?}")]
    InvalidPresetId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
