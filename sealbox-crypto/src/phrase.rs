//! Code-phrase hashing with Argon2id.
//!
//! Hashes are PHC strings: algorithm, version, parameters, and salt are
//! embedded in the encoding, so verification needs no side channel and
//! cost parameters can change without invalidating stored hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};

/// Tunable Argon2id work factor.
///
/// Higher cost slows every hash and verify, which is the only brake on
/// phrase brute-forcing (there is deliberately no lockout).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhraseCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Parallelism lanes.
    pub parallelism: u32,
}

impl Default for PhraseCost {
    /// 19 MiB / 2 passes / 1 lane — the OWASP-recommended Argon2id
    /// minimum, ~50ms on current server hardware.
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PhraseCost {
    /// Cheap parameters for tests. Not for production use.
    pub fn fast() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Argon2id phrase hasher with a fixed cost preset.
#[derive(Debug, Clone)]
pub struct PhraseHasher {
    cost: PhraseCost,
}

impl Default for PhraseHasher {
    fn default() -> Self {
        Self::new(PhraseCost::default())
    }
}

impl PhraseHasher {
    pub fn new(cost: PhraseCost) -> Self {
        Self { cost }
    }

    fn argon2(&self) -> CryptoResult<Argon2<'static>> {
        let params = Params::new(
            self.cost.memory_kib,
            self.cost.iterations,
            self.cost.parallelism,
            None,
        )
        .map_err(|e| CryptoError::Hash(format!("invalid argon2 params: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hashes a phrase with a fresh random salt, returning the PHC string.
    ///
    /// CPU- and memory-hard; callers on an async runtime should run this
    /// on a blocking worker.
    pub fn hash(&self, phrase: &str) -> CryptoResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(phrase.as_bytes(), &salt)
            .map_err(|e| CryptoError::Hash(format!("argon2 hash: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a phrase against a stored PHC string.
    ///
    /// Parameters come from the stored encoding, not from this hasher, so
    /// hashes created under older cost presets keep verifying. Comparison
    /// inside the argon2 crate is constant-time. A stored encoding that
    /// does not parse is an error, not a mismatch.
    pub fn verify(&self, encoded: &str, phrase: &str) -> CryptoResult<bool> {
        let parsed = PasswordHash::new(encoded)
            .map_err(|e| CryptoError::Hash(format!("malformed phrase hash: {e}")))?;
        match Argon2::default().verify_password(phrase.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CryptoError::Hash(format!("argon2 verify: {e}"))),
        }
    }
}
