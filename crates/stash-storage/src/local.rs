use crate::keys;
use crate::traits::{
    AllocatedNames, BlobPayload, BlobStore, StorageError, StorageResult, WriteOutcome,
    WriteRequest,
};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
///
/// Each container is a directory under `base_path`; keys are paths inside it.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for containers (e.g., "/var/lib/stash/storage")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Directory backing a user's container
    pub fn container_path(&self, username: &str) -> StorageResult<PathBuf> {
        keys::validate_container(username)?;
        Ok(self.base_path.join(username))
    }

    /// Convert a container-relative key to a filesystem path with security validation
    pub fn key_to_path(&self, username: &str, storage_key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(storage_key)?;
        let container = self.container_path(username)?;
        let path = container.join(storage_key);

        if path.strip_prefix(&container).is_err() {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside its container".to_string(),
            ));
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Stream one payload to disk, returning the number of bytes written
    async fn write_payload(&self, username: &str, payload: BlobPayload) -> StorageResult<u64> {
        let BlobPayload { key, mut reader } = payload;
        let path = self.key_to_path(username, &key)?;

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            key = %key,
            size_bytes = bytes_copied,
            "Local storage stream write successful"
        );

        Ok(bytes_copied)
    }
}

#[async_trait]
impl BlobStore for LocalStorage {
    async fn create_container(&self, username: &str) -> StorageResult<()> {
        let path = self.container_path(username)?;

        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::ContainerFailed(format!(
                "Failed to create container {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            container = %username,
            path = %path.display(),
            "Local storage container created"
        );

        Ok(())
    }

    fn allocate_names(&self, username: &str, filename: &str) -> StorageResult<AllocatedNames> {
        keys::validate_container(username)?;
        Ok(keys::allocate(filename))
    }

    async fn write(&self, request: WriteRequest) -> StorageResult<WriteOutcome> {
        let WriteRequest {
            username,
            content,
            thumbnail,
        } = request;
        let start = std::time::Instant::now();

        let size_bytes = self.write_payload(&username, content).await?;
        let thumbnail_size_bytes = self.write_payload(&username, thumbnail).await?;

        tracing::info!(
            container = %username,
            size_bytes,
            thumbnail_size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(WriteOutcome {
            size_bytes,
            thumbnail_size_bytes,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
