//! Content hashing for callers that do not bring their own identifier.

use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of `data`.
pub fn content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `hash` looks like a content hash: 32 to 128 ASCII hex digits.
pub fn is_valid_hash(hash: &str) -> bool {
    (32..=128).contains(&hash.len()) && hash.bytes().all(|b| b.is_ascii_hexdigit())
}
