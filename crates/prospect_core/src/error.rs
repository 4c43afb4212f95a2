use thiserror::Error;

/// Failures surfaced across the library boundary. Every variant is
/// recoverable by the caller; none of the core operations panic on bad
/// input or bad documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("not connected: {0}")]
    NotConnected(String),
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(String),
}
