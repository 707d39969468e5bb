//! Metadata store abstraction
//!
//! The minimal interface the migration needs from the new metadata store,
//! allowing for easy mocking and testing without database dependencies.

use anyhow::Result;
use async_trait::async_trait;
use stash_core::models::{FileRecord, NewAccount, NewAlbum};
use stash_core::MetadataBackend;

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Create an account
    async fn create_account(&self, account: &NewAccount) -> Result<()>;

    /// Create an album whose `file_ids` have already been added
    async fn create_album(&self, album: &NewAlbum) -> Result<()>;

    /// Add a file record
    ///
    /// Full records carry their own timestamps and visibility; join records
    /// reference an existing album and inherit them.
    async fn add_file(&self, file: &FileRecord) -> Result<()>;

    /// Get the metadata backend type
    fn backend_type(&self) -> MetadataBackend;
}
