//! Error types for the migration run
//!
//! Every variant here ends the run. A legacy file whose content cannot be found
//! is not an error: it is reported as [`crate::RecordOutcome::SkippedMissingSource`].

use std::path::PathBuf;

use stash_storage::StorageError;

/// Broad classes of run-ending failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The legacy store could not be opened, was locked past the timeout or is malformed
    LegacyStoreUnavailable,
    /// Reading legacy rows or legacy content failed after the store was opened
    LegacySource,
    /// The metadata store or blob store rejected an operation
    AdapterFailure,
    Configuration,
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Legacy store unavailable at {}: {source}", .path.display())]
    LegacyStoreUnavailable {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    #[error("Legacy query {query} failed: {source}")]
    LegacyQuery {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid locator pattern {pattern:?}: {source}")]
    LocatorPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read legacy content at {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Metadata store {operation} failed: {source}")]
    Metadata {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Blob store {operation} failed: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

impl MigrationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            MigrationError::LegacyStoreUnavailable { .. } => FailureKind::LegacyStoreUnavailable,
            MigrationError::LegacyQuery { .. }
            | MigrationError::LocatorPattern { .. }
            | MigrationError::SourceRead { .. } => FailureKind::LegacySource,
            MigrationError::Metadata { .. } | MigrationError::Storage { .. } => {
                FailureKind::AdapterFailure
            }
            MigrationError::Config(_) => FailureKind::Configuration,
        }
    }

    pub(crate) fn metadata(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| MigrationError::Metadata { operation, source }
    }

    pub(crate) fn storage(operation: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| MigrationError::Storage { operation, source }
    }
}
