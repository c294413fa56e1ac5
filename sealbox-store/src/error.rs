//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The secret key is already held by an active record. Deliberately
    /// carries no payload: the colliding key is another depositor's live
    /// lookup token and must not reach logs or error chains.
    #[error("secret key already held by an active record")]
    DuplicateKey,

    /// Failure in the backing persistence engine.
    #[error("storage backend error: {0}")]
    Backend(String),
}
