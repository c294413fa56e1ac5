//! Cryptographic primitives for sealbox.
//!
//! Provides the three primitives the one-time-secret lifecycle needs:
//! - Random public secret-key tokens (`[A-Za-z0-9]{32}`)
//! - Argon2id code-phrase hashing with PHC-encoded salt and parameters
//! - XChaCha20-Poly1305 authenticated encryption under a process-wide
//!   master key
//!
//! # Key model
//!
//! A single [`MasterKey`] is provisioned at process start and used for all
//! payload encryption. It is never derived from request input and never
//! persisted next to the data it protects. Compromise of the database alone
//! does not reveal any secret payload.
//!
//! Code phrases are never stored — only their Argon2id hashes, which embed
//! a random per-phrase salt.

mod cipher;
mod error;
mod key;
mod phrase;
mod token;

pub use cipher::{decrypt, encrypt, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{MasterKey, KEY_SIZE};
pub use phrase::{PhraseCost, PhraseHasher};
pub use token::{generate_secret_key, is_well_formed, SECRET_KEY_LEN};
