//! Persisted ciphertext envelope: wire format and format sniffing.
//!
//! Two generations of stored data exist. Current records are JSON objects
//! `{"iv": "<base64>", "ciphertext": "<base64>", "v": 1}`; records written
//! before the envelope format was introduced are opaque strings produced by
//! a passphrase-based cipher (see [`crate::legacy`]). The store holds both
//! indefinitely, so parsing dispatches on shape rather than assuming one.

use serde::{Deserialize, Serialize};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Version-1 envelope: AES-256-GCM with an explicit random nonce.
///
/// Field order is part of the wire format consumed by other Keepsake
/// clients; do not reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeV1 {
    /// 12-byte AES-GCM nonce, base64.
    pub iv: String,
    /// Ciphertext with appended authentication tag, base64.
    pub ciphertext: String,
    /// Format version tag.
    pub v: u8,
}

impl EnvelopeV1 {
    pub fn new(iv: String, ciphertext: String) -> Self {
        Self {
            iv,
            ciphertext,
            v: ENVELOPE_VERSION,
        }
    }
}

/// A stored envelope, classified by format.
#[derive(Debug)]
pub enum Envelope<'a> {
    /// Current AES-GCM envelope.
    V1(EnvelopeV1),
    /// Anything that is not a well-formed v1 envelope. Routed to the
    /// legacy passphrase cipher, which does its own validation.
    Legacy(&'a str),
}

impl<'a> Envelope<'a> {
    /// Classifies a raw stored string.
    ///
    /// A single parse attempt decides the path: the input is v1 iff it is a
    /// JSON object with the exact `{iv, ciphertext, v: 1}` shape. Everything
    /// else — legacy ciphertext, corrupt JSON, unknown versions — falls
    /// through to [`Envelope::Legacy`].
    pub fn parse(raw: &'a str) -> Envelope<'a> {
        match serde_json::from_str::<EnvelopeV1>(raw) {
            Ok(env) if env.v == ENVELOPE_VERSION => Envelope::V1(env),
            _ => Envelope::Legacy(raw),
        }
    }
}
