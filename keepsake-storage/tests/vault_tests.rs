use std::sync::Arc;

use keepsake_crypto::{CryptoError, StaticSecretProvider, UnavailableSecretProvider};
use keepsake_storage::{MemoryRecordStore, RecordStore, SecretVault, StorageError};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CardRecord {
    holder: String,
    number: String,
    expiry: String,
    cvv: String,
}

fn sample_card() -> CardRecord {
    CardRecord {
        holder: "Alice Example".to_string(),
        number: "4111111111111111".to_string(),
        expiry: "12/29".to_string(),
        cvv: "031".to_string(),
    }
}

fn vault_over(store: Arc<MemoryRecordStore>) -> SecretVault {
    SecretVault::new(
        Arc::new(StaticSecretProvider::new("vault-test-passphrase")),
        store,
    )
}

#[tokio::test]
async fn create_load_round_trip() {
    let vault = vault_over(Arc::new(MemoryRecordStore::new()));
    let card = sample_card();

    let id = vault.create(&card).await.unwrap();
    let loaded: CardRecord = vault.load(&id).await.unwrap();

    assert_eq!(loaded, card);
}

#[tokio::test]
async fn store_only_ever_sees_ciphertext() {
    let store = Arc::new(MemoryRecordStore::new());
    let vault = vault_over(store.clone());

    let id = vault.create(&sample_card()).await.unwrap();
    let stored = store.get(&id).await.unwrap().unwrap();

    // The stored blob is a v1 envelope, with no plaintext field values.
    let parsed: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed["v"], 1);
    assert!(!stored.contains("4111111111111111"));
    assert!(!stored.contains("Alice"));
}

#[tokio::test]
async fn save_replaces_existing_record() {
    let vault = vault_over(Arc::new(MemoryRecordStore::new()));
    let id = vault.create(&sample_card()).await.unwrap();

    let mut updated = sample_card();
    updated.expiry = "12/31".to_string();
    vault.save(&id, &updated).await.unwrap();

    let loaded: CardRecord = vault.load(&id).await.unwrap();
    assert_eq!(loaded, updated);
}

#[tokio::test]
async fn load_missing_record_is_not_found() {
    let vault = vault_over(Arc::new(MemoryRecordStore::new()));
    let result: Result<CardRecord, _> = vault.load("no-such-id").await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn delete_removes_record() {
    let vault = vault_over(Arc::new(MemoryRecordStore::new()));
    let id = vault.create(&sample_card()).await.unwrap();

    vault.delete(&id).await.unwrap();
    let result: Result<CardRecord, _> = vault.load(&id).await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn missing_passphrase_aborts_save_before_store() {
    let store = Arc::new(MemoryRecordStore::new());
    let vault = SecretVault::new(Arc::new(UnavailableSecretProvider), store.clone());

    let result = vault.create(&sample_card()).await;
    assert!(matches!(
        result,
        Err(StorageError::Crypto(CryptoError::Encryption(_)))
    ));
    // Nothing was written — no silent plaintext fallback.
    assert!(store.ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupted_stored_envelope_surfaces_decryption_error() {
    let store = Arc::new(MemoryRecordStore::new());
    let vault = vault_over(store.clone());

    let id = vault.create(&sample_card()).await.unwrap();
    store.put(&id, "corrupted beyond recognition").await.unwrap();

    let result: Result<CardRecord, _> = vault.load(&id).await;
    assert!(matches!(
        result,
        Err(StorageError::Crypto(CryptoError::Decryption(_)))
    ));
}
