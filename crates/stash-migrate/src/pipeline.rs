//! Migration orchestrator
//!
//! One sequential pass: every account and container first, then every file in
//! reader order. Album founders are written before any of their joins because
//! files of one album are contiguous and nothing runs concurrently.

use std::sync::Arc;

use stash_core::models::{FileRecord, LegacyFile, LegacyUser};
use stash_db::MetadataStore;
use stash_storage::{BlobPayload, BlobStore, StorageError, WriteRequest};

use crate::album::{AlbumAggregator, AlbumPlan};
use crate::error::{MigrationError, MigrationResult};
use crate::legacy::LegacyReader;
use crate::locator::ContentLocator;
use crate::mapper;
use crate::report::{MigrationReport, RecordOutcome};

pub struct Migrator {
    metadata: Arc<dyn MetadataStore>,
    storage: Arc<dyn BlobStore>,
    locator: ContentLocator,
}

impl Migrator {
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        storage: Arc<dyn BlobStore>,
        locator: ContentLocator,
    ) -> Self {
        Self {
            metadata,
            storage,
            locator,
        }
    }

    /// Migrate everything the legacy store holds.
    #[tracing::instrument(skip(self, legacy), fields(legacy.path = %legacy.path().display()))]
    pub async fn run(&self, legacy: &LegacyReader) -> MigrationResult<MigrationReport> {
        let users = legacy.list_users().await?;
        let files = legacy.list_files().await?;
        self.run_records(&users, &files).await
    }

    /// Migrate already-read legacy rows. `files` must keep album members contiguous.
    pub async fn run_records(
        &self,
        users: &[LegacyUser],
        files: &[LegacyFile],
    ) -> MigrationResult<MigrationReport> {
        let mut report = MigrationReport::start();

        tracing::info!(
            users = users.len(),
            files = files.len(),
            metadata_backend = %self.metadata.backend_type(),
            storage_backend = %self.storage.backend_type(),
            "Starting migration"
        );

        self.migrate_users(users, &mut report).await?;
        self.migrate_files(files, &mut report).await?;

        report.finish();

        tracing::info!(
            accounts = report.accounts_created,
            containers = report.containers_created,
            processed = report.processed(),
            skipped = report.skipped(),
            albums = report.albums_created,
            joined = report.files_joined,
            duration_ms = report.duration_ms().unwrap_or_default(),
            "Migration complete"
        );

        Ok(report)
    }

    async fn migrate_users(
        &self,
        users: &[LegacyUser],
        report: &mut MigrationReport,
    ) -> MigrationResult<()> {
        for user in users {
            let account = mapper::mint_account(user);

            self.metadata
                .create_account(&account)
                .await
                .map_err(MigrationError::metadata("create_account"))?;
            report.accounts_created += 1;

            self.storage
                .create_container(&user.username)
                .await
                .map_err(MigrationError::storage("create_container"))?;
            report.containers_created += 1;

            tracing::debug!(
                username = %user.username,
                account_id = %account.id,
                "Migrated account"
            );
        }

        tracing::info!(count = users.len(), "Accounts migrated");
        Ok(())
    }

    async fn migrate_files(
        &self,
        files: &[LegacyFile],
        report: &mut MigrationReport,
    ) -> MigrationResult<()> {
        let mut albums = AlbumAggregator::new();
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            tracing::info!(
                file_id = %file.legacy_id,
                position = index + 1,
                total,
                "Migrating file"
            );

            let outcome = self.migrate_file(file, &mut albums).await?;
            if let RecordOutcome::SkippedMissingSource { pattern, .. } = &outcome {
                tracing::warn!(
                    file_id = %file.legacy_id,
                    pattern = %pattern,
                    "No legacy content found, skipping file"
                );
            }
            report.record(outcome);
        }

        Ok(())
    }

    async fn migrate_file(
        &self,
        file: &LegacyFile,
        albums: &mut AlbumAggregator,
    ) -> MigrationResult<RecordOutcome> {
        let Some(source) = self
            .locator
            .locate(&file.locator_pattern, &file.legacy_id)
            .await? else {
            return Ok(RecordOutcome::SkippedMissingSource {
                file_id: file.legacy_id.clone(),
                pattern: file.locator_pattern.clone(),
            });
        };

        let display_name = mapper::display_filename(&file.original_filename, &file.mime_type);

        let names = self
            .storage
            .allocate_names(&file.uploaded_by, &display_name)
            .map_err(MigrationError::storage("allocate_names"))?;

        let content = ContentLocator::open(&source)
            .await
            .map_err(|source_err| MigrationError::SourceRead {
                path: source.clone(),
                source: source_err,
            })?;

        let thumbnail_path = self.locator.thumbnail_path(&file.legacy_id);
        let thumbnail = ContentLocator::open(&thumbnail_path)
            .await
            .map_err(|err| MigrationError::Storage {
                operation: "write",
                source: StorageError::IoError(err),
            })?;

        let written = self
            .storage
            .write(WriteRequest {
                username: file.uploaded_by.clone(),
                content: BlobPayload::new(names.content_key.clone(), content),
                thumbnail: BlobPayload::new(names.thumbnail_key, thumbnail),
            })
            .await
            .map_err(MigrationError::storage("write"))?;

        if written.size_bytes != file.size_bytes as u64 {
            tracing::debug!(
                file_id = %file.legacy_id,
                legacy_size = file.size_bytes,
                measured_size = written.size_bytes,
                "Legacy size differs from stored size"
            );
        }

        let mapped = mapper::map_file(file, display_name, names.content_key, written.size_bytes);
        let plan = albums.route(mapped);
        let action = plan.action();

        match plan {
            AlbumPlan::Standalone(record) => {
                self.add_file(record.into()).await?;
            }
            AlbumPlan::Found { file: record, album } => {
                self.add_file(record.into()).await?;
                self.metadata
                    .create_album(&album)
                    .await
                    .map_err(MigrationError::metadata("create_album"))?;
                tracing::debug!(album_id = %album.id, founder = %file.legacy_id, "Created album");
            }
            AlbumPlan::Join(record) => {
                self.add_file(record.into()).await?;
            }
        }

        Ok(RecordOutcome::Processed {
            file_id: file.legacy_id.clone(),
            album: action,
            size_bytes: written.size_bytes,
        })
    }

    async fn add_file(&self, record: FileRecord) -> MigrationResult<()> {
        self.metadata
            .add_file(&record)
            .await
            .map_err(MigrationError::metadata("add_file"))
    }
}
