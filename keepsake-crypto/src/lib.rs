//! Field-level encryption for Keepsake.
//!
//! Every secret a user stores — login credentials, cards, wallet seed
//! phrases, file metadata — is encrypted on the client before it reaches
//! the persistence backend, which only ever sees opaque envelope strings.
//!
//! # Architecture
//!
//! - The vault key is SHA-256 of a configured passphrase, derived lazily on
//!   first use and cached for the session in a [`KeyContext`].
//! - New records are sealed with AES-256-GCM under a fresh random nonce and
//!   persisted as a self-describing JSON envelope (`{iv, ciphertext, v: 1}`).
//! - Records written by the previous product generation use an OpenSSL EVP
//!   passphrase cipher; [`SecretCodec::decrypt`] sniffs the stored format
//!   and handles both transparently, so no data migration was required.
//!
//! The passphrase comes from a [`SecretProvider`] (environment-backed in
//! production). There is no key rotation: changing the passphrase orphans
//! existing envelopes until a re-encryption migration exists.

mod cipher;
mod codec;
mod envelope;
mod error;
mod key;
pub mod legacy;
mod secret;

pub use cipher::{open, seal, NONCE_SIZE, TAG_SIZE};
pub use codec::SecretCodec;
pub use envelope::{Envelope, EnvelopeV1, ENVELOPE_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KeyContext, KEY_SIZE};
pub use secret::{
    EnvSecretProvider, SecretError, SecretProvider, SecretResult, StaticSecretProvider,
    UnavailableSecretProvider, DEFAULT_SECRET_ENV,
};
