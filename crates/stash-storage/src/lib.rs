//! Stash Storage Library
//!
//! This crate provides the blob-store abstraction the migration writes file
//! content and thumbnails into, and a local filesystem implementation.
//!
//! # Key format
//!
//! Blobs live in per-user containers. Keys are container-relative:
//!
//! - **Content**: `{uuid}.{ext}` (extension taken from the display filename)
//! - **Thumbnail**: `thumbnail/{uuid}.webp`
//!
//! Keys and container names must not contain `..` or a leading `/`. Key
//! generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use stash_core::StorageBackend;
pub use traits::{
    AllocatedNames, BlobPayload, BlobReader, BlobStore, StorageError, StorageResult,
    WriteOutcome, WriteRequest,
};
