//! Persistence contract and in-process store for sealbox secrets.
//!
//! The lifecycle engine talks to storage only through the [`SecretStore`]
//! trait; any keyed engine that can offer an atomic delete-if-present can
//! implement it. [`MemoryStore`] is the production in-process
//! implementation, and [`ExpirySweeper`] runs the background purge of
//! expired records.
//!
//! # Atomicity
//!
//! The whole exactly-once disclosure guarantee rests on
//! [`SecretStore::remove_by_id`]: a single conditional remove that tells
//! the caller whether *it* was the remover. Retrieval and expiry both
//! funnel their destruction through it, so exactly one writer wins per
//! record.

mod error;
mod memory;
mod record;
mod sweep;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::SecretRecord;
pub use sweep::{ExpirySweeper, SweeperHandle};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// Keyed persistence contract for secret records.
///
/// Implementations must make [`remove_by_id`](Self::remove_by_id) a single
/// atomic delete-if-present: under concurrent callers exactly one observes
/// `true`. A check-then-delete emulation is not a valid implementation.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Inserts a new record. Fails with [`StoreError::DuplicateKey`] if
    /// the secret key is already held by an active record.
    async fn insert(&self, record: SecretRecord) -> StoreResult<()>;

    /// Looks up an active record by secret key.
    ///
    /// Records past their `expires_at` are reported absent even before
    /// the sweeper removes them, so TTL enforcement never depends on
    /// sweep timing.
    async fn find_by_key(&self, secret_key: &str) -> StoreResult<Option<SecretRecord>>;

    /// Atomically removes the record if present. Returns `true` iff this
    /// call removed it. Idempotent: removing an already-gone id is
    /// `false`, not an error.
    async fn remove_by_id(&self, id: &Uuid) -> StoreResult<bool>;

    /// Schedules expiry at `created_at + ttl`. A no-op if the record has
    /// already been consumed.
    async fn expire_after(&self, secret_key: &str, ttl: Duration) -> StoreResult<()>;

    /// Removes every record expired as of `now`, returning the count.
    /// Best-effort; races with retrieval are resolved by the atomicity
    /// of removal.
    async fn purge_expired(&self, now: DateTime<Utc>) -> StoreResult<usize>;
}
