// Import errors: validation happens before any remote call; remote failures abort the run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

/// A failed call against CloudWatch or EC2. Not retried, not classified further.
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
pub struct RemoteCallError {
    pub operation: &'static str,
    pub message: String,
}

impl RemoteCallError {
    pub fn new(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            operation,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] RemoteCallError),
}

impl ImportError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ImportError::Validation(_))
    }
}
