//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Caller input failed validation. Reported inline, never fatal.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote store rejected an append.
    #[error("store write failed: {0}")]
    StoreWrite(String),

    /// The remote store failed to deliver a live query result.
    #[error("store read failed: {0}")]
    StoreRead(String),
}
