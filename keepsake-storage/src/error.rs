//! Error types for the storage seam.

use keepsake_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No record stored under the given id.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Encryption or decryption failed while crossing the seam.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type StorageResult<T> = Result<T, StorageError>;
