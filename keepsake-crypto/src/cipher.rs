//! AES-256-GCM authenticated encryption.
//!
//! A fresh random 96-bit nonce is generated for every seal; nonce reuse
//! under the same key breaks both confidentiality and authenticity, so
//! there is deliberately no way to supply a nonce from outside.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;

/// AES-GCM nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Poly1305/GCM authentication tag size in bytes, appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// Seals `plaintext` under `key`, returning the fresh nonce and the
/// ciphertext with the authentication tag appended.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<([u8; NONCE_SIZE], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("cipher init failed: {e}")))?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Encryption("AES-GCM seal failed".to_string()))?;

    Ok((nonce, sealed))
}

/// Opens an AES-GCM ciphertext. Fails if the tag does not verify —
/// no plaintext is ever returned from tampered or wrong-key input.
pub fn open(key: &DerivedKey, nonce: &[u8], sealed: &[u8]) -> CryptoResult<Vec<u8>> {
    if nonce.len() != NONCE_SIZE {
        return Err(CryptoError::Decryption(format!(
            "invalid nonce size: expected {NONCE_SIZE}, got {}",
            nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Decryption(format!("cipher init failed: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::Decryption("wrong key or tampered data".to_string()))
}
