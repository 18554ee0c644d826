//! Storage-layer errors.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by [`GraphStore`](crate::traits::GraphStore) backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// An explicit-ID insert collided with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend rejected or failed the operation.
    #[error("backend error: {0}")]
    Backend(String),
}
