//! Process-wide master key.

use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use rand::RngCore;
use zeroize::ZeroizeOnDrop;

/// Size of the master key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// The symmetric key used for all payload encryption in the process.
///
/// Provisioned once at startup from a key file and shared read-only
/// (wrap in `Arc`) for the process lifetime. Never derived from request
/// input. Zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_SIZE]);

impl MasterKey {
    /// Generates a fresh random key from the OS CSPRNG.
    ///
    /// Used for initial provisioning and in tests; production processes
    /// load an existing key with [`MasterKey::from_key_file`].
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wraps raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses key-file contents: either raw 32 bytes or a base64 encoding
    /// (standard or URL-safe) of 32 bytes, with surrounding whitespace
    /// tolerated.
    pub fn from_key_file(data: &[u8]) -> CryptoResult<Self> {
        if data.len() == KEY_SIZE {
            let mut bytes = [0u8; KEY_SIZE];
            bytes.copy_from_slice(data);
            return Ok(Self(bytes));
        }
        let text = std::str::from_utf8(data)
            .map_err(|_| CryptoError::KeyEncoding("key file is neither raw nor base64".into()))?;
        Self::from_base64(text.trim())
    }

    /// Parses a base64-encoded key (standard or URL-safe alphabet).
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let decoded = STANDARD
            .decode(encoded)
            .or_else(|_| URL_SAFE.decode(encoded))
            .map_err(|e| CryptoError::KeyEncoding(format!("base64 decode: {e}")))?;
        if decoded.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: decoded.len(),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Encodes the key as standard base64 (key-file format).
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

// Key material must never leak through Debug output.
impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}
