//! Test helpers: recording adapters and legacy fixtures for migration tests.
//!
//! Both recording adapters append to one shared call log, so tests can assert
//! on the interleaving of metadata and blob store operations.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stash_core::models::{FileRecord, NewAccount, NewAlbum};
use stash_core::{MetadataBackend, StorageBackend};
use stash_db::MetadataStore;
use stash_migrate::{ContentLocator, Migrator};
use stash_storage::{
    AllocatedNames, BlobStore, StorageError, StorageResult, WriteOutcome, WriteRequest,
};
use tokio::io::AsyncReadExt;

/// One adapter call, in the order it was made
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateAccount(NewAccount),
    CreateAlbum(NewAlbum),
    AddFile(FileRecord),
    CreateContainer(String),
    AllocateNames {
        username: String,
        filename: String,
    },
    Write {
        username: String,
        content_key: String,
        thumbnail_key: String,
        content: Vec<u8>,
    },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct RecordingMetadataStore {
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl RecordingMetadataStore {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail_on: None }
    }

    /// Reject every call to `operation`.
    pub fn failing(log: CallLog, operation: &'static str) -> Self {
        Self {
            log,
            fail_on: Some(operation),
        }
    }

    fn push(&self, operation: &str, call: Call) -> anyhow::Result<()> {
        if self.fail_on == Some(operation) {
            anyhow::bail!("{} rejected", operation);
        }
        self.log.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for RecordingMetadataStore {
    async fn create_account(&self, account: &NewAccount) -> anyhow::Result<()> {
        self.push("create_account", Call::CreateAccount(account.clone()))
    }

    async fn create_album(&self, album: &NewAlbum) -> anyhow::Result<()> {
        self.push("create_album", Call::CreateAlbum(album.clone()))
    }

    async fn add_file(&self, file: &FileRecord) -> anyhow::Result<()> {
        self.push("add_file", Call::AddFile(file.clone()))
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Sqlite
    }
}

pub struct RecordingBlobStore {
    log: CallLog,
    fail_on: Option<&'static str>,
    next_key: Mutex<u32>,
}

impl RecordingBlobStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_on: None,
            next_key: Mutex::new(0),
        }
    }

    pub fn failing(log: CallLog, operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::new(log)
        }
    }

    fn check(&self, operation: &str) -> StorageResult<()> {
        if self.fail_on == Some(operation) {
            return Err(StorageError::BackendError(format!("{} rejected", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn create_container(&self, username: &str) -> StorageResult<()> {
        self.check("create_container")?;
        self.log
            .lock()
            .unwrap()
            .push(Call::CreateContainer(username.to_string()));
        Ok(())
    }

    fn allocate_names(&self, username: &str, filename: &str) -> StorageResult<AllocatedNames> {
        self.check("allocate_names")?;
        let n = {
            let mut next = self.next_key.lock().unwrap();
            *next += 1;
            *next
        };
        self.log.lock().unwrap().push(Call::AllocateNames {
            username: username.to_string(),
            filename: filename.to_string(),
        });
        Ok(AllocatedNames {
            content_key: format!("key-{}", n),
            thumbnail_key: format!("thumbnail/key-{}.webp", n),
        })
    }

    async fn write(&self, mut request: WriteRequest) -> StorageResult<WriteOutcome> {
        self.check("write")?;
        let mut content = Vec::new();
        request.content.reader.read_to_end(&mut content).await?;
        let mut thumbnail = Vec::new();
        request.thumbnail.reader.read_to_end(&mut thumbnail).await?;

        let outcome = WriteOutcome {
            size_bytes: content.len() as u64,
            thumbnail_size_bytes: thumbnail.len() as u64,
        };
        self.log.lock().unwrap().push(Call::Write {
            username: request.username,
            content_key: request.content.key,
            thumbnail_key: request.thumbnail.key,
            content,
        });
        Ok(outcome)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Migrator wired to recording adapters over a fixture layout
pub struct Harness {
    pub log: CallLog,
    pub migrator: Migrator,
}

impl Harness {
    pub fn new(fixture: &fixtures::LegacyLayout) -> Self {
        let log = CallLog::default();
        let metadata = RecordingMetadataStore::new(log.clone());
        let storage = RecordingBlobStore::new(log.clone());
        Self::with_adapters(fixture, log, metadata, storage)
    }

    pub fn with_adapters(
        fixture: &fixtures::LegacyLayout,
        log: CallLog,
        metadata: RecordingMetadataStore,
        storage: RecordingBlobStore,
    ) -> Self {
        let locator = ContentLocator::new(fixture.upload_root(), fixture.thumbnail_dir());
        let migrator = Migrator::new(Arc::new(metadata), Arc::new(storage), locator);
        Self { log, migrator }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn accounts(&self) -> Vec<NewAccount> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateAccount(account) => Some(account),
                _ => None,
            })
            .collect()
    }

    pub fn albums(&self) -> Vec<NewAlbum> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateAlbum(album) => Some(album),
                _ => None,
            })
            .collect()
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddFile(file) => Some(file),
                _ => None,
            })
            .collect()
    }
}
