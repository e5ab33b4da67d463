//! Error types for the encryption layer.

use thiserror::Error;

/// Errors from the field-level encryption codec.
///
/// Messages are safe to surface to the UI layer: they never contain key
/// material, the passphrase, or any fragment of plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A record could not be encrypted (no passphrase available, or the
    /// record failed to serialize).
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// A stored envelope could not be decrypted (wrong key, tampered or
    /// malformed data, or no passphrase available).
    #[error("failed to decrypt data: {0}")]
    Decryption(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;
