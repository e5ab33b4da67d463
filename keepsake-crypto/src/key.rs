//! Key derivation and session-scoped key caching.
//!
//! The vault key is derived from the configured passphrase with SHA-256:
//! the same passphrase always yields the same 256-bit key, and the key is
//! never persisted. The raw passphrase is kept alongside the derived key
//! because the legacy cipher does its own key handling and needs the
//! passphrase itself, not the digest.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::OnceCell;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::secret::{SecretError, SecretProvider, SecretResult};

/// Symmetric key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// A 256-bit symmetric key derived from the vault passphrase.
///
/// Zeroized on drop. Never serialized, never logged.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derives the vault key from a passphrase (SHA-256, deterministic).
pub fn derive_key(passphrase: &str) -> DerivedKey {
    let digest = Sha256::digest(passphrase.as_bytes());
    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&digest);
    DerivedKey(bytes)
}

/// Passphrase and derived key cached for the lifetime of a session.
pub(crate) struct SessionSecret {
    passphrase: Zeroizing<String>,
    key: DerivedKey,
}

impl SessionSecret {
    pub(crate) fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub(crate) fn key(&self) -> &DerivedKey {
        &self.key
    }
}

/// Session-scoped key cache, populated lazily from a [`SecretProvider`].
///
/// Construct one per session and hand it to the codec. The first
/// encrypt/decrypt fetches the passphrase and derives the key; every later
/// call reuses the cached values. There is no invalidation: a passphrase
/// change requires a new context (and a re-encryption migration for
/// existing envelopes, which does not exist yet).
pub struct KeyContext {
    provider: Arc<dyn SecretProvider>,
    session: OnceCell<SessionSecret>,
}

impl KeyContext {
    pub fn new(provider: Arc<dyn SecretProvider>) -> Self {
        Self {
            provider,
            session: OnceCell::new(),
        }
    }

    /// Returns the cached session secret, fetching and deriving on first use.
    pub(crate) async fn session(&self) -> SecretResult<&SessionSecret> {
        self.session
            .get_or_try_init(|| async {
                let passphrase = self.provider.passphrase().await?;
                if passphrase.is_empty() {
                    return Err(SecretError::Empty);
                }
                let key = derive_key(&passphrase);
                Ok(SessionSecret {
                    passphrase: Zeroizing::new(passphrase),
                    key,
                })
            })
            .await
    }
}
