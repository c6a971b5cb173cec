use thiserror::Error;

/// Error taxonomy for the client.
///
/// `Backend` carries a business error the server returned in an otherwise
/// well-formed response (`{"error": "..."}`), surfaced to the user verbatim.
/// `Connectivity` is any transport-level failure and is always retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("failed to connect to the server: {0}")]
    Connectivity(String),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Validation(String),

    #[error("camera unavailable: {0}")]
    Permission(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal,
}

impl CoreError {
    /// Whether the failure came from outside the primary request/response
    /// cycle and can safely be logged and dropped.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Connectivity(_))
    }
}
