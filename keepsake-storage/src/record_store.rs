//! Opaque envelope storage keyed by record id.
//!
//! The store never inspects what it holds: it receives the exact envelope
//! string the codec produced and must return it byte-for-byte unmodified.
//! Production backs this with the hosted database client; tests and the
//! local cache use [`MemoryRecordStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageResult;

/// Opaque string storage keyed by record id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Stores (or replaces) the envelope under `id`.
    async fn put(&self, id: &str, envelope: &str) -> StorageResult<()>;

    /// Returns the envelope stored under `id`, if any.
    async fn get(&self, id: &str) -> StorageResult<Option<String>>;

    /// Removes the record under `id`. Removing an absent id is not an error.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Lists all stored record ids, in no particular order.
    async fn ids(&self) -> StorageResult<Vec<String>>;
}

/// In-memory store for tests and in-process caching.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, id: &str, envelope: &str) -> StorageResult<()> {
        self.records
            .write()
            .await
            .insert(id.to_string(), envelope.to_string());
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<String>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn ids(&self) -> StorageResult<Vec<String>> {
        Ok(self.records.read().await.keys().cloned().collect())
    }
}
