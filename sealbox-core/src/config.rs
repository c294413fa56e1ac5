//! Service configuration and master key provisioning.

use sealbox_crypto::{CryptoError, MasterKey, PhraseCost};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration for the secret lifecycle engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Path to the master key file (raw 32 bytes or base64). `None` when
    /// the key is provided programmatically.
    pub key_file: Option<PathBuf>,

    /// Argon2id work factor for code-phrase hashing.
    pub phrase_cost: PhraseCost,

    /// Interval between background expiry sweeps, in seconds.
    pub sweep_interval_secs: u64,

    /// How many fresh keys to try when insertion hits a collision.
    pub max_key_attempts: u32,

    /// Upper bound on the secret payload, in bytes.
    pub max_secret_bytes: usize,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            key_file: None,
            phrase_cost: PhraseCost::default(),
            sweep_interval_secs: 60,
            max_key_attempts: 5,
            max_secret_bytes: 64 * 1024,
        }
    }
}

impl SecretsConfig {
    /// Cheap hashing and a fast sweep, for tests. Not for production use.
    pub fn fast() -> Self {
        Self {
            phrase_cost: PhraseCost::fast(),
            sweep_interval_secs: 1,
            ..Self::default()
        }
    }

    /// Loads the master key from the configured `key_file`.
    ///
    /// Fails with [`ConfigError::NoKeyFile`] when the config carries no
    /// path; embedders providing the key programmatically skip this and
    /// call [`Secrets::new`](crate::Secrets::new) directly.
    pub fn load_master_key(&self) -> Result<MasterKey, ConfigError> {
        let path = self.key_file.as_deref().ok_or(ConfigError::NoKeyFile)?;
        load_master_key(path)
    }
}

/// Errors while loading configuration inputs at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no key file configured")]
    NoKeyFile,

    #[error("cannot read key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid master key: {0}")]
    Key(#[from] CryptoError),
}

/// Reads and parses the master key file once at process start.
///
/// The returned key is immutable shared state for the process lifetime;
/// wrap it in `Arc` and hand it to [`Secrets`](crate::Secrets).
pub fn load_master_key(path: &Path) -> Result<MasterKey, ConfigError> {
    let data = std::fs::read(path)?;
    Ok(MasterKey::from_key_file(&data)?)
}
