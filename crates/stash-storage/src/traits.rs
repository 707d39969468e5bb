//! Blob store abstraction trait
//!
//! This module defines the BlobStore trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::fmt;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Container creation failed: {0}")]
    ContainerFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Readable byte stream handed to the store
pub type BlobReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Storage-facing names for a file and its thumbnail, scoped to one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedNames {
    pub content_key: String,
    pub thumbnail_key: String,
}

/// One blob to write: where it goes and where its bytes come from
pub struct BlobPayload {
    pub key: String,
    pub reader: BlobReader,
}

impl BlobPayload {
    pub fn new(key: impl Into<String>, reader: BlobReader) -> Self {
        Self {
            key: key.into(),
            reader,
        }
    }
}

impl fmt::Debug for BlobPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobPayload")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// A file and its thumbnail, written together into the uploader's container
#[derive(Debug)]
pub struct WriteRequest {
    pub username: String,
    pub content: BlobPayload,
    pub thumbnail: BlobPayload,
}

/// Sizes measured by the backend while writing
///
/// `size_bytes` is the authoritative size of the content blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub size_bytes: u64,
    pub thumbnail_size_bytes: u64,
}

/// Blob store abstraction trait
///
/// All storage backends must implement this trait so the migration can target
/// any backend without coupling to its addressing scheme.
///
/// **Key format:** keys returned by `allocate_names` are relative to the
/// container of the user they were allocated for. See the crate root documentation.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the per-user namespace that later writes for `username` land in
    async fn create_container(&self, username: &str) -> StorageResult<()>;

    /// Allocate storage keys for a file and its thumbnail
    ///
    /// `filename` is the display filename; backends may use its extension but
    /// must not use it verbatim, so two uploads with the same name never collide.
    fn allocate_names(&self, username: &str, filename: &str) -> StorageResult<AllocatedNames>;

    /// Stream the content and thumbnail of one file into the store
    ///
    /// Both readers are consumed until EOF. Returns the sizes the backend measured.
    async fn write(&self, request: WriteRequest) -> StorageResult<WriteOutcome>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
