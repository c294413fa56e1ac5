//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The authentication tag did not verify: wrong key or tampered
    /// ciphertext. No plaintext is ever returned alongside this error.
    #[error("ciphertext integrity check failed (wrong key or tampered data)")]
    Integrity,

    #[error("phrase hashing failed: {0}")]
    Hash(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid key encoding: {0}")]
    KeyEncoding(String),
}
