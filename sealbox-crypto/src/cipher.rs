//! XChaCha20-Poly1305 authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 24-byte nonce and
//! prepends it to the ciphertext, so the stored blob is self-contained
//! and equal plaintexts never produce equal ciphertexts.
//!
//! Layout of the returned byte buffer:
//!   [ 24-byte nonce | ciphertext + 16-byte auth tag ]

use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{AeadCore, XChaCha20Poly1305, XNonce};

use crate::error::{CryptoError, CryptoResult};
use crate::key::MasterKey;

/// Size of the XChaCha20 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypts `plaintext` under the master key.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::Encryption(format!("aead encrypt: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts a blob produced by [`encrypt`].
///
/// Any tag failure (wrong key, tampered or truncated bytes) is
/// [`CryptoError::Integrity`] — partial plaintext is never returned.
pub fn decrypt(key: &MasterKey, blob: &[u8]) -> CryptoResult<Vec<u8>> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Integrity);
    }

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Integrity)
}
