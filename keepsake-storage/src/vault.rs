//! Encrypted record vault: codec composed with a record store.
//!
//! `SecretVault` is what item screens talk to. Records go in as structured
//! data, cross the seam as opaque envelope strings, and come back out
//! structurally identical. The store never sees plaintext; the codec never
//! sees the store's schema.

use std::sync::Arc;

use keepsake_crypto::{SecretCodec, SecretProvider};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::record_store::RecordStore;

/// Encrypted CRUD over a [`RecordStore`].
pub struct SecretVault {
    codec: SecretCodec,
    store: Arc<dyn RecordStore>,
}

impl SecretVault {
    pub fn new(provider: Arc<dyn SecretProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            codec: SecretCodec::new(provider),
            store,
        }
    }

    /// Encrypts and stores a new record, returning its generated id.
    pub async fn create<T: Serialize>(&self, record: &T) -> StorageResult<String> {
        let id = Uuid::new_v4().to_string();
        self.save(&id, record).await?;
        Ok(id)
    }

    /// Encrypts and stores a record under an existing id.
    pub async fn save<T: Serialize>(&self, id: &str, record: &T) -> StorageResult<()> {
        let envelope = self.codec.encrypt(record).await?;
        debug!(id, "storing encrypted record");
        self.store.put(id, &envelope).await
    }

    /// Loads and decrypts the record stored under `id`.
    pub async fn load<T: DeserializeOwned>(&self, id: &str) -> StorageResult<T> {
        let envelope = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        debug!(id, "decrypting stored record");
        Ok(self.codec.decrypt(&envelope).await?)
    }

    /// Removes the record stored under `id`.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.store.delete(id).await
    }

    /// Lists all stored record ids.
    pub async fn ids(&self) -> StorageResult<Vec<String>> {
        self.store.ids().await
    }
}
