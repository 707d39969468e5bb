//! Data models for the migration
//!
//! `legacy` holds the row shapes read from the old store; the remaining modules
//! hold the records written to the new metadata store.

mod account;
mod album;
mod expiry;
mod file;
mod legacy;

// Re-export all models for convenient imports
pub use account::*;
pub use album::*;
pub use expiry::*;
pub use file::*;
pub use legacy::*;
