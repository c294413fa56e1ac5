//! The persistent secret record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deposited secret at rest.
///
/// Immutable once written (expiry scheduling only stamps `expires_at`).
/// Destroyed by the winning retrieval or by expiry, whichever fires
/// first; afterwards it is indistinguishable from never having existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Store-assigned identifier; the handle used for atomic removal.
    pub id: Uuid,
    /// Public lookup token, unique among active records.
    pub secret_key: String,
    /// AEAD ciphertext of the secret text; opaque to the store.
    pub ciphertext: Vec<u8>,
    /// PHC-encoded Argon2id hash of the code phrase.
    pub phrase_hash: String,
    pub created_at: DateTime<Utc>,
    /// Instant after which the record must no longer be retrievable.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SecretRecord {
    /// Builds a fresh record with a random id, stamped now, no expiry.
    pub fn new(secret_key: String, ciphertext: Vec<u8>, phrase_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            secret_key,
            ciphertext,
            phrase_hash,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Whether the record has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
