//! One-time secret lifecycle engine.
//!
//! One party deposits a short-lived secret protected by a code phrase;
//! a second party discloses it exactly once using the generated secret
//! key plus the phrase. [`Secrets`] orchestrates the four collaborators:
//! key generation, phrase hashing, payload encryption (all from
//! `sealbox-crypto`), and the persistence contract (`sealbox-store`).
//!
//! # Exactly-once disclosure
//!
//! Retrieval destroys the record through the store's atomic
//! delete-if-present. Under concurrent correct-phrase retrievals — or a
//! race with the expiry sweeper — exactly one caller wins the removal
//! and receives plaintext; every other caller sees the same `NotFound`
//! as if the secret never existed.
//!
//! # Out of scope
//!
//! HTTP transport, wire encoding, and depositing-party authentication
//! belong to the embedding application. This crate exposes typed
//! operations and a typed error taxonomy for it to map.

mod config;
mod error;
mod secrets;

pub use config::{load_master_key, ConfigError, SecretsConfig};
pub use error::{SecretError, SecretsResult};
pub use secrets::Secrets;

// Re-exports so embedders need only this crate for the common path.
pub use sealbox_crypto::{MasterKey, PhraseCost};
pub use sealbox_store::{MemoryStore, SecretStore, SweeperHandle};
