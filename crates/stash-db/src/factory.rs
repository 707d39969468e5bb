use crate::{MetadataStore, SqliteMetadataStore};
use anyhow::{Context, Result};
use stash_core::{MetadataBackend, MigrationConfig};
use std::sync::Arc;

/// Create a metadata store based on configuration
pub async fn create_metadata_store(config: &MigrationConfig) -> Result<Arc<dyn MetadataStore>> {
    match config.metadata_backend {
        MetadataBackend::Sqlite => {
            let url = config
                .metadata_database_url()
                .context("METADATA_DATABASE_URL not configured")?;

            let store = SqliteMetadataStore::connect(url).await?;
            tracing::info!(backend = %MetadataBackend::Sqlite, "Metadata store connected");
            Ok(Arc::new(store))
        }
    }
}
