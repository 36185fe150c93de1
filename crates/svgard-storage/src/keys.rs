//! Shared key generation for storage backends.
//!
//! Key format: `{bucket}/{hash[0..2]}/{hash}`.

use svgard_core::constants::IMAGES_BUCKET;
use svgard_core::hash::is_valid_hash;

use crate::traits::{StorageError, StorageResult};

/// Generate a storage key for `hash` inside `bucket`.
///
/// The hash is validated first so a caller-supplied identifier can never
/// address anything outside the bucket.
pub fn blob_key(bucket: &str, hash: &str) -> StorageResult<String> {
    if !is_valid_hash(hash) {
        return Err(StorageError::InvalidKey(format!(
            "not a content hash: {:?}",
            hash
        )));
    }
    let hash = hash.to_ascii_lowercase();
    Ok(format!("{}/{}/{}", bucket, &hash[..2], hash))
}

/// Key of the sanitized original for `hash`.
pub fn image_key(hash: &str) -> StorageResult<String> {
    blob_key(IMAGES_BUCKET, hash)
}

/// Reject keys that could escape the storage root.
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
