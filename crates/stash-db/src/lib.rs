//! Stash Metadata Layer
//!
//! This crate provides the metadata-store abstraction the migration writes
//! accounts, albums and file records through, and a SQLite implementation.
//
// Module declarations
pub mod db;
pub mod factory;
pub mod traits;

// Re-exports
pub use db::{SqliteMetadataStore, StoredAlbum, StoredFile};
pub use factory::create_metadata_store;
pub use traits::MetadataStore;
