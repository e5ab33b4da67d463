//! The record codec: structured secret <-> opaque envelope string.
//!
//! `SecretCodec` is the single entry point the rest of the product uses.
//! It serializes a flat record to JSON, seals it under the session key, and
//! emits a self-describing envelope; on read it sniffs the stored format
//! and routes to the matching cipher, so callers never know (or care)
//! which generation wrote a record.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cipher;
use crate::envelope::{Envelope, EnvelopeV1};
use crate::error::{CryptoError, CryptoResult};
use crate::key::KeyContext;
use crate::legacy;
use crate::secret::SecretProvider;

/// Field-level codec for vault records.
///
/// Owns a [`KeyContext`]; the passphrase is fetched and the key derived on
/// the first operation, then reused for the session.
pub struct SecretCodec {
    keys: KeyContext,
}

impl SecretCodec {
    pub fn new(provider: Arc<dyn SecretProvider>) -> Self {
        Self {
            keys: KeyContext::new(provider),
        }
    }

    /// Builds a codec over an externally owned key context, for callers
    /// that share one context across components.
    pub fn with_key_context(keys: KeyContext) -> Self {
        Self { keys }
    }

    /// Encrypts a record into a v1 envelope string.
    ///
    /// Accepts any JSON-serializable record. The output carries its own
    /// nonce and version tag and round-trips through [`Self::decrypt`]
    /// under the same passphrase.
    pub async fn encrypt<T: Serialize>(&self, record: &T) -> CryptoResult<String> {
        let session = self
            .keys
            .session()
            .await
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let plaintext = serde_json::to_vec(record)
            .map_err(|e| CryptoError::Encryption(format!("record is not serializable: {e}")))?;

        let (nonce, sealed) = cipher::seal(session.key(), &plaintext)?;

        let envelope = EnvelopeV1::new(STANDARD.encode(nonce), STANDARD.encode(sealed));
        serde_json::to_string(&envelope)
            .map_err(|e| CryptoError::Encryption(format!("envelope serialization failed: {e}")))
    }

    /// Decrypts an envelope string written by any generation of the codec.
    pub async fn decrypt<T: DeserializeOwned>(&self, raw: &str) -> CryptoResult<T> {
        let session = self
            .keys
            .session()
            .await
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;

        let plaintext = match Envelope::parse(raw) {
            Envelope::V1(envelope) => {
                let nonce = STANDARD.decode(&envelope.iv).map_err(|_| {
                    CryptoError::Decryption("malformed envelope iv".to_string())
                })?;
                let sealed = STANDARD.decode(&envelope.ciphertext).map_err(|_| {
                    CryptoError::Decryption("malformed envelope ciphertext".to_string())
                })?;
                cipher::open(session.key(), &nonce, &sealed)?
            }
            // Legacy cipher derives its own key material from the raw
            // passphrase; the session key does not apply.
            Envelope::Legacy(body) => legacy::open(session.passphrase(), body)?,
        };

        serde_json::from_slice(&plaintext)
            .map_err(|_| CryptoError::Decryption("decrypted payload is not valid JSON".to_string()))
    }
}
