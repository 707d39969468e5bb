//! SQLite metadata store
//!
//! `schema` creates the tables on connect; `metadata` holds the repository.

mod metadata;
mod schema;

pub use metadata::{SqliteMetadataStore, StoredAlbum, StoredFile};
