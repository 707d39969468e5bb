//! Stash Core Library
//!
//! This crate provides the domain models, constants, configuration and backend
//! selectors shared by the migration components: the legacy row shapes read from
//! the old SQLite store and the record shapes written to the new metadata and
//! blob stores.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::MigrationConfig;
pub use storage_types::{MetadataBackend, StorageBackend};
