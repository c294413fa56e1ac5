//! The one-time-secret lifecycle engine.
//!
//! Orchestrates key generation, phrase hashing, payload encryption, and
//! the store into two operations: [`Secrets::create`] and
//! [`Secrets::retrieve`]. Per record the state machine is
//! `Active -> Gone`, triggered by exactly one of: a retrieval that wins
//! the atomic removal, or expiry. Wrong-phrase attempts are self-loops
//! on `Active`.

use crate::config::SecretsConfig;
use crate::error::{SecretError, SecretsResult};
use sealbox_crypto::{self as crypto, MasterKey, PhraseHasher};
use sealbox_store::{ExpirySweeper, SecretRecord, SecretStore, StoreError, SweeperHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Handle to the secret lifecycle engine.
///
/// Cheap to clone; all clones share the store, the hasher, and the
/// master key.
#[derive(Clone)]
pub struct Secrets {
    store: Arc<dyn SecretStore>,
    hasher: Arc<PhraseHasher>,
    master_key: Arc<MasterKey>,
    config: Arc<SecretsConfig>,
}

impl Secrets {
    /// Builds the engine around a store, the process master key, and
    /// configuration.
    pub fn new(store: Arc<dyn SecretStore>, master_key: MasterKey, config: SecretsConfig) -> Self {
        Self {
            hasher: Arc::new(PhraseHasher::new(config.phrase_cost)),
            store,
            master_key: Arc::new(master_key),
            config: Arc::new(config),
        }
    }

    /// Starts the background expiry sweeper for this engine's store at
    /// the configured interval.
    pub fn spawn_sweeper(&self) -> SweeperHandle {
        ExpirySweeper::spawn(
            self.store.clone(),
            Duration::from_secs(self.config.sweep_interval_secs),
        )
    }

    /// Deposits a secret and returns its public secret key.
    ///
    /// With `ttl_secs` set, the record self-destructs `ttl_secs` seconds
    /// after creation unless retrieved first.
    pub async fn create(
        &self,
        secret_text: &str,
        phrase: &str,
        ttl_secs: Option<u64>,
    ) -> SecretsResult<String> {
        if secret_text.is_empty() {
            return Err(SecretError::Validation("secret must not be empty".into()));
        }
        if phrase.is_empty() {
            return Err(SecretError::Validation("code phrase must not be empty".into()));
        }
        if secret_text.len() > self.config.max_secret_bytes {
            return Err(SecretError::Validation(format!(
                "secret exceeds {} bytes",
                self.config.max_secret_bytes
            )));
        }
        if let Some(ttl) = ttl_secs {
            if ttl == 0 {
                return Err(SecretError::Validation(
                    "lifetime must be a positive number of seconds".into(),
                ));
            }
            // A lifetime the clock cannot represent can never be stamped
            // on the record; reject it up front instead of surfacing a
            // storage fault later.
            let stampable = i64::try_from(ttl)
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .and_then(|delta| chrono::Utc::now().checked_add_signed(delta))
                .is_some();
            if !stampable {
                return Err(SecretError::Validation(
                    "lifetime is too far in the future".into(),
                ));
            }
        }

        // Argon2id and the AEAD are CPU-bound; one hop to the blocking
        // pool keeps the async workers free for unrelated requests.
        let hasher = self.hasher.clone();
        let master_key = self.master_key.clone();
        let secret = secret_text.to_owned();
        let phrase = phrase.to_owned();
        let (phrase_hash, ciphertext) = tokio::task::spawn_blocking(move || {
            let phrase_hash = hasher.hash(&phrase)?;
            let ciphertext = crypto::encrypt(&master_key, secret.as_bytes())?;
            Ok::<_, SecretError>((phrase_hash, ciphertext))
        })
        .await
        .map_err(|e| SecretError::Task(format!("hash/encrypt worker: {e}")))??;

        let secret_key = self.insert_with_fresh_key(ciphertext, phrase_hash).await?;

        if let Some(ttl) = ttl_secs {
            self.store
                .expire_after(&secret_key, Duration::from_secs(ttl))
                .await?;
        }

        debug!("[SECRETS] secret created (ttl_secs: {:?})", ttl_secs);
        Ok(secret_key)
    }

    /// Discloses a secret exactly once.
    ///
    /// The atomic delete-if-present on the record id is the single
    /// serialization point: of any number of concurrent correct-phrase
    /// callers (the expiry sweeper included), exactly one removes the
    /// record, and only that one decrypts and returns plaintext.
    pub async fn retrieve(&self, secret_key: &str, phrase: &str) -> SecretsResult<String> {
        if phrase.is_empty() {
            return Err(SecretError::Validation("code phrase must not be empty".into()));
        }
        // A key that cannot have been generated gets the same NotFound as
        // a consumed or expired one — no shape oracle, no store hit.
        if !crypto::is_well_formed(secret_key) {
            return Err(SecretError::NotFound);
        }

        let record = self
            .store
            .find_by_key(secret_key)
            .await?
            .ok_or(SecretError::NotFound)?;

        let hasher = self.hasher.clone();
        let phrase = phrase.to_owned();
        let phrase_hash = record.phrase_hash.clone();
        let matched = tokio::task::spawn_blocking(move || hasher.verify(&phrase_hash, &phrase))
            .await
            .map_err(|e| SecretError::Task(format!("verify worker: {e}")))??;
        if !matched {
            // Self-loop: the record stays retrievable until expiry.
            return Err(SecretError::WrongPhrase);
        }

        // Whoever wins this conditional remove is the one disclosure.
        // Losing the race — to another caller or to the sweeper — is
        // indistinguishable from the key never having existed.
        if !self.store.remove_by_id(&record.id).await? {
            return Err(SecretError::NotFound);
        }

        let master_key = self.master_key.clone();
        let ciphertext = record.ciphertext;
        let plaintext = tokio::task::spawn_blocking(move || crypto::decrypt(&master_key, &ciphertext))
            .await
            .map_err(|e| SecretError::Task(format!("decrypt worker: {e}")))?
            .map_err(|e| {
                error!("[SECRETS] stored ciphertext failed to decrypt: {}", e);
                SecretError::Integrity
            })?;

        String::from_utf8(plaintext).map_err(|_| {
            error!("[SECRETS] decrypted payload is not valid UTF-8");
            SecretError::Integrity
        })
    }

    async fn insert_with_fresh_key(
        &self,
        ciphertext: Vec<u8>,
        phrase_hash: String,
    ) -> SecretsResult<String> {
        let attempts = self.config.max_key_attempts;
        for attempt in 1..=attempts {
            let secret_key = crypto::generate_secret_key();
            let record =
                SecretRecord::new(secret_key.clone(), ciphertext.clone(), phrase_hash.clone());
            match self.store.insert(record).await {
                Ok(()) => return Ok(secret_key),
                Err(StoreError::DuplicateKey) => {
                    // Astronomically unlikely with 190-bit keys; retry
                    // with a fresh draw.
                    warn!(
                        "[SECRETS] secret key collision on attempt {}/{}",
                        attempt, attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        error!(
            "[SECRETS] key generation exhausted after {} attempts",
            attempts
        );
        Err(SecretError::KeySpaceExhausted { attempts })
    }
}
