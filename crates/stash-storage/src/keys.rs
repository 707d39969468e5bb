//! Shared key generation for storage backends.
//!
//! Key format: content `{uuid}.{ext}`, thumbnail `thumbnail/{uuid}.webp`, both
//! relative to the uploader's container.

use crate::{AllocatedNames, StorageError, StorageResult};
use stash_core::constants::THUMBNAIL_EXTENSION;
use uuid::Uuid;

const THUMBNAIL_PREFIX: &str = "thumbnail";

/// Generate storage keys for a file and its thumbnail.
///
/// The content key keeps the display filename's extension (lowercased) so the
/// blob stays recognizable; the stem is a fresh UUID.
pub fn allocate(filename: &str) -> AllocatedNames {
    let stem = Uuid::new_v4().simple().to_string();
    let content_key = match extension(filename) {
        Some(ext) => format!("{}.{}", stem, ext.to_lowercase()),
        None => stem.clone(),
    };
    let thumbnail_key = format!("{}/{}.{}", THUMBNAIL_PREFIX, stem, THUMBNAIL_EXTENSION);

    AllocatedNames {
        content_key,
        thumbnail_key,
    }
}

/// Reject container names that would escape the storage root.
pub fn validate_container(username: &str) -> StorageResult<()> {
    if username.is_empty()
        || username == "."
        || username.contains("..")
        || username.contains('/')
        || username.contains('\\')
    {
        return Err(StorageError::InvalidKey(format!(
            "Container name {:?} contains invalid characters",
            username
        )));
    }
    Ok(())
}

/// Reject keys that would escape their container.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key {:?} contains invalid characters",
            key
        )));
    }
    Ok(())
}

fn extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < base.len() => Some(&base[idx + 1..]),
        _ => None,
    }
}
