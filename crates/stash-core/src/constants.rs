//! Constants shared across the migration crates.

/// Expiry value the new metadata store reads as "never expires".
pub const NEVER_EXPIRES: &str = "Infinity";

/// Extension of pre-computed legacy thumbnails, and of thumbnails written to the blob store.
pub const THUMBNAIL_EXTENSION: &str = "webp";

/// Legacy `in_album` value meaning "not part of an album".
pub const NO_ALBUM: &str = "0";

pub const DEFAULT_LEGACY_DATABASE_PATH: &str = "./storage/database/stash.db";
pub const DEFAULT_LEGACY_LOCK_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LEGACY_UPLOAD_ROOT: &str = ".";
pub const DEFAULT_LEGACY_THUMBNAIL_DIR: &str = "../thumbnail";
