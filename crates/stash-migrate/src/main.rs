use anyhow::{Context, Result};
use stash_db::create_metadata_store;
use stash_migrate::{init_tracing, load_config, ContentLocator, LegacyReader, Migrator};
use stash_storage::create_storage;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;

    tracing::info!(
        legacy_database = %config.legacy_database_path.display(),
        upload_root = %config.legacy_upload_root.display(),
        metadata_backend = %config.metadata_backend,
        storage_backend = %config.storage_backend,
        "Configuration loaded"
    );

    let metadata = create_metadata_store(&config)
        .await
        .context("Failed to create metadata store")?;

    let legacy = LegacyReader::open(&config.legacy_database_path, config.legacy_lock_timeout())
        .await
        .context("Failed to open legacy store")?;

    let storage = create_storage(&config)
        .await
        .context("Failed to create blob store")?;

    let locator = ContentLocator::new(&config.legacy_upload_root, &config.legacy_thumbnail_dir);
    let migrator = Migrator::new(metadata, storage, locator);

    let result = migrator.run(&legacy).await;
    legacy.close().await;

    let report = result.context("Migration failed")?;
    if report.skipped() > 0 {
        tracing::warn!(
            skipped = report.skipped(),
            file_ids = ?report.skipped_ids().collect::<Vec<_>>(),
            "Some files had no legacy content"
        );
    }

    Ok(())
}
