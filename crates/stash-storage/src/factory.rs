#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{BlobStore, StorageBackend, StorageError, StorageResult};
use stash_core::MigrationConfig;
use std::sync::Arc;

/// Create a blob store based on configuration
pub async fn create_storage(config: &MigrationConfig) -> StorageResult<Arc<dyn BlobStore>> {
    match config.storage_backend {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
