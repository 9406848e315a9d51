//! Short SHA-256 fingerprint of the session key, logged at startup so
//! operators can tell which key is active without exposing it.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of `SHA-256(signing key)`, lowercase hex.
///
/// ```
/// use actix_web::cookie::Key;
/// use quest_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}
