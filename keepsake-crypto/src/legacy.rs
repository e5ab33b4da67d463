//! Legacy passphrase cipher: OpenSSL EVP envelopes.
//!
//! Records written before the v1 envelope format are base64 of
//! `"Salted__" || salt(8) || AES-256-CBC body`, with key and IV derived
//! from the raw passphrase via EVP_BytesToKey (single-round MD5 chain) and
//! PKCS#7 padding. These parameters are fixed by data already in
//! production and must not be changed; new writes always use the v1
//! AES-GCM envelope, so only decryption is exposed here.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};

const SALT_MAGIC: &[u8; 8] = b"Salted__";
const SALT_SIZE: usize = 8;
const IV_SIZE: usize = 16;
const LEGACY_KEY_SIZE: usize = 32;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// EVP_BytesToKey with MD5, one round per block, as OpenSSL's `enc` and
/// CryptoJS `AES.encrypt(message, passphrase)` both implement it.
fn evp_bytes_to_key(passphrase: &[u8], salt: &[u8; SALT_SIZE]) -> ([u8; LEGACY_KEY_SIZE], [u8; IV_SIZE]) {
    let mut material = Vec::with_capacity(LEGACY_KEY_SIZE + IV_SIZE);
    let mut block: Vec<u8> = Vec::new();

    while material.len() < LEGACY_KEY_SIZE + IV_SIZE {
        let mut hasher = Md5::new();
        hasher.update(&block);
        hasher.update(passphrase);
        hasher.update(salt);
        block = hasher.finalize().to_vec();
        material.extend_from_slice(&block);
    }

    let mut key = [0u8; LEGACY_KEY_SIZE];
    let mut iv = [0u8; IV_SIZE];
    key.copy_from_slice(&material[..LEGACY_KEY_SIZE]);
    iv.copy_from_slice(&material[LEGACY_KEY_SIZE..LEGACY_KEY_SIZE + IV_SIZE]);

    material.zeroize();
    block.zeroize();
    (key, iv)
}

/// Decrypts a legacy envelope with the raw passphrase.
///
/// CBC has no authentication: a wrong passphrase usually surfaces as a
/// padding error here, and otherwise as garbage that fails JSON parsing in
/// the codec. Either way the caller sees a decryption failure, never
/// unverified plaintext presented as valid.
pub fn open(passphrase: &str, envelope: &str) -> CryptoResult<Vec<u8>> {
    let raw = STANDARD
        .decode(envelope.trim())
        .map_err(|_| CryptoError::Decryption("unrecognized envelope format".to_string()))?;

    if raw.len() < SALT_MAGIC.len() + SALT_SIZE || &raw[..SALT_MAGIC.len()] != SALT_MAGIC {
        return Err(CryptoError::Decryption(
            "unrecognized envelope format".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&raw[SALT_MAGIC.len()..SALT_MAGIC.len() + SALT_SIZE]);
    let body = &raw[SALT_MAGIC.len() + SALT_SIZE..];

    let (mut key, iv) = evp_bytes_to_key(passphrase.as_bytes(), &salt);

    let result = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::Decryption(format!("cipher init failed: {e}")))
        .and_then(|cipher| {
            cipher
                .decrypt_padded_vec_mut::<Pkcs7>(body)
                .map_err(|_| CryptoError::Decryption("wrong key or tampered data".to_string()))
        });

    key.zeroize();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbc::cipher::BlockEncryptMut;

    type Aes256CbcEnc = cbc::Encryptor<Aes256>;

    /// Produces an envelope byte-compatible with the production legacy
    /// cipher. Test-only: new records never write this format.
    fn seal_legacy(passphrase: &str, salt: [u8; SALT_SIZE], plaintext: &[u8]) -> String {
        let (key, iv) = evp_bytes_to_key(passphrase.as_bytes(), &salt);
        let body = Aes256CbcEnc::new_from_slices(&key, &iv)
            .unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut raw = Vec::with_capacity(SALT_MAGIC.len() + SALT_SIZE + body.len());
        raw.extend_from_slice(SALT_MAGIC);
        raw.extend_from_slice(&salt);
        raw.extend_from_slice(&body);
        STANDARD.encode(raw)
    }

    #[test]
    fn round_trips_own_envelope() {
        let envelope = seal_legacy("legacy-pass", *b"saltsalt", b"{\"password\":\"p\"}");
        let plaintext = open("legacy-pass", &envelope).unwrap();
        assert_eq!(plaintext, b"{\"password\":\"p\"}");
    }

    #[test]
    fn wrong_passphrase_fails() {
        let envelope = seal_legacy("legacy-pass", *b"saltsalt", b"{\"password\":\"p\"}");
        assert!(open("not-the-passphrase", &envelope).is_err());
    }

    #[test]
    fn missing_salt_magic_rejected() {
        let raw = STANDARD.encode(b"NotSalted_and_some_other_bytes__");
        assert!(open("legacy-pass", &raw).is_err());
    }

    #[test]
    fn non_base64_rejected() {
        assert!(open("legacy-pass", "not base64 at all!!").is_err());
    }

    #[test]
    fn truncated_envelope_rejected() {
        let raw = STANDARD.encode(b"Salted__1234");
        assert!(open("legacy-pass", &raw).is_err());
    }

    #[test]
    fn key_derivation_is_deterministic() {
        let (k1, iv1) = evp_bytes_to_key(b"pass", b"saltsalt");
        let (k2, iv2) = evp_bytes_to_key(b"pass", b"saltsalt");
        assert_eq!(k1, k2);
        assert_eq!(iv1, iv2);
    }
}
