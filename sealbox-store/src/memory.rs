//! In-process implementation of the store contract.

use crate::error::{StoreError, StoreResult};
use crate::record::SecretRecord;
use crate::SecretStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory [`SecretStore`].
///
/// Records live in a by-id map with a secret-key index. All mutation
/// happens under a single write guard, which is what makes
/// `remove_by_id` a true delete-if-present. Clones share the same
/// underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Maps>>,
}

#[derive(Default)]
struct Maps {
    by_id: HashMap<Uuid, SecretRecord>,
    key_index: HashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn insert(&self, record: SecretRecord) -> StoreResult<()> {
        let mut maps = self.inner.write().await;
        // An expired-but-unswept record still holds its key; the caller
        // retries with a freshly generated one.
        if maps.key_index.contains_key(&record.secret_key) {
            return Err(StoreError::DuplicateKey);
        }
        maps.key_index.insert(record.secret_key.clone(), record.id);
        maps.by_id.insert(record.id, record);
        Ok(())
    }

    async fn find_by_key(&self, secret_key: &str) -> StoreResult<Option<SecretRecord>> {
        let maps = self.inner.read().await;
        let Some(id) = maps.key_index.get(secret_key) else {
            return Ok(None);
        };
        let record = maps.by_id.get(id).filter(|r| !r.is_expired(Utc::now()));
        Ok(record.cloned())
    }

    async fn remove_by_id(&self, id: &Uuid) -> StoreResult<bool> {
        let mut maps = self.inner.write().await;
        match maps.by_id.remove(id) {
            Some(record) => {
                maps.key_index.remove(&record.secret_key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn expire_after(&self, secret_key: &str, ttl: Duration) -> StoreResult<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| StoreError::Backend(format!("ttl out of range: {e}")))?;
        let mut maps = self.inner.write().await;
        let Some(id) = maps.key_index.get(secret_key).copied() else {
            // Already consumed — nothing to schedule.
            return Ok(());
        };
        if let Some(record) = maps.by_id.get_mut(&id) {
            let expires_at = record
                .created_at
                .checked_add_signed(ttl)
                .ok_or_else(|| StoreError::Backend("ttl overflows expiry instant".into()))?;
            record.expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> StoreResult<usize> {
        let mut maps = self.inner.write().await;
        let expired: Vec<Uuid> = maps
            .by_id
            .values()
            .filter(|r| r.is_expired(now))
            .map(|r| r.id)
            .collect();
        for id in &expired {
            if let Some(record) = maps.by_id.remove(id) {
                maps.key_index.remove(&record.secret_key);
            }
        }
        Ok(expired.len())
    }
}
