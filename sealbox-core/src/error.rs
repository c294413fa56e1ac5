//! Error taxonomy for the secret lifecycle.

use sealbox_crypto::CryptoError;
use sealbox_store::StoreError;
use thiserror::Error;

/// Result type for lifecycle operations.
pub type SecretsResult<T> = Result<T, SecretError>;

/// Typed errors surfaced by [`Secrets`](crate::Secrets) operations.
///
/// The expected categories (`Validation`, `NotFound`, `WrongPhrase`)
/// carry stable, minimal messages that are safe to forward to callers.
/// Everything else is an internal fault: it is logged with context at
/// the point of failure and should reach callers only as an opaque
/// generic failure. Secrets, phrases, and key material never appear in
/// any message.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Malformed or missing input; the caller's fault, recoverable.
    #[error("{0}")]
    Validation(String),

    /// Unknown, already consumed, or expired secret key. Deliberately a
    /// single category with a single message so callers cannot tell the
    /// three cases apart.
    #[error("wrong secret key")]
    NotFound,

    /// The code phrase did not match. The record is untouched and stays
    /// retrievable until it expires; there is no lockout.
    #[error("wrong code phrase")]
    WrongPhrase,

    /// Key generation kept colliding with active records.
    #[error("secret key space exhausted after {attempts} attempts")]
    KeySpaceExhausted { attempts: u32 },

    /// A stored ciphertext failed authentication on decrypt — the master
    /// key changed or the record was corrupted.
    #[error("stored ciphertext failed integrity check")]
    Integrity,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// A blocking worker task failed to complete.
    #[error("worker task failed: {0}")]
    Task(String),
}

impl SecretError {
    /// Whether this is an internal fault that must reach callers only as
    /// an opaque failure, with no detail leaked.
    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            Self::Validation(_) | Self::NotFound | Self::WrongPhrase
        )
    }
}
