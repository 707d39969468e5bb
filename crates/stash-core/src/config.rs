//! Configuration module
//!
//! The migration is a batch job without command-line flags; everything it needs
//! comes from the environment (optionally seeded from a `.env` file): where the
//! legacy store and its on-disk layout live, and which metadata/blob backends
//! receive the migrated data.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_LEGACY_DATABASE_PATH, DEFAULT_LEGACY_LOCK_TIMEOUT_SECS, DEFAULT_LEGACY_THUMBNAIL_DIR,
    DEFAULT_LEGACY_UPLOAD_ROOT,
};
use crate::storage_types::{MetadataBackend, StorageBackend};

/// Migration configuration
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    // Legacy source
    pub legacy_database_path: PathBuf,
    pub legacy_lock_timeout_secs: u64,
    /// Directory the legacy locator patterns are resolved against.
    pub legacy_upload_root: PathBuf,
    pub legacy_thumbnail_dir: PathBuf,
    // Metadata store
    pub metadata_backend: MetadataBackend,
    pub metadata_database_url: Option<String>,
    // Blob store
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
}

impl MigrationConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let legacy_lock_timeout_secs = match lookup("LEGACY_LOCK_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("LEGACY_LOCK_TIMEOUT_SECS must be a whole number of seconds")
            })?,
            None => DEFAULT_LEGACY_LOCK_TIMEOUT_SECS,
        };

        let metadata_backend = lookup("METADATA_BACKEND")
            .map(|s| s.parse::<MetadataBackend>())
            .transpose()?
            .unwrap_or(MetadataBackend::Sqlite);

        let storage_backend = lookup("STORAGE_BACKEND")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::Local);

        let config = MigrationConfig {
            legacy_database_path: lookup("LEGACY_DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_LEGACY_DATABASE_PATH.to_string())
                .into(),
            legacy_lock_timeout_secs,
            legacy_upload_root: lookup("LEGACY_UPLOAD_ROOT")
                .unwrap_or_else(|| DEFAULT_LEGACY_UPLOAD_ROOT.to_string())
                .into(),
            legacy_thumbnail_dir: lookup("LEGACY_THUMBNAIL_DIR")
                .unwrap_or_else(|| DEFAULT_LEGACY_THUMBNAIL_DIR.to_string())
                .into(),
            metadata_backend,
            metadata_database_url: lookup("METADATA_DATABASE_URL"),
            storage_backend,
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.legacy_lock_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "LEGACY_LOCK_TIMEOUT_SECS must be greater than zero"
            ));
        }

        match self.metadata_backend {
            MetadataBackend::Sqlite => {
                if self.metadata_database_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "METADATA_DATABASE_URL must be set when METADATA_BACKEND=sqlite"
                    ));
                }
            }
        }

        match self.storage_backend {
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn legacy_lock_timeout(&self) -> Duration {
        Duration::from_secs(self.legacy_lock_timeout_secs)
    }

    pub fn metadata_database_url(&self) -> Option<&str> {
        self.metadata_database_url.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }
}
