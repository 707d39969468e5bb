//! Stash legacy migration
//!
//! Moves users, files and implicit albums out of the legacy SQLite store and its
//! on-disk upload layout into a metadata store and a blob store. The run is a
//! single sequential pass: accounts first, then files in album order.

pub mod album;
pub mod error;
pub mod legacy;
pub mod locator;
pub mod mapper;
pub mod pipeline;
pub mod report;

pub use album::{AlbumAggregator, AlbumPlan};
pub use error::{FailureKind, MigrationError, MigrationResult};
pub use legacy::LegacyReader;
pub use locator::ContentLocator;
pub use pipeline::Migrator;
pub use report::{AlbumAction, MigrationReport, RecordOutcome};

use stash_core::MigrationConfig;

/// Load configuration from the environment and validate it.
pub fn load_config() -> MigrationResult<MigrationConfig> {
    checked_config(MigrationConfig::from_env())
}

/// Classify load or validation failures as [`FailureKind::Configuration`].
pub fn checked_config(
    loaded: anyhow::Result<MigrationConfig>,
) -> MigrationResult<MigrationConfig> {
    let config = loaded.map_err(|err| MigrationError::Config(format!("{:#}", err)))?;
    config
        .validate()
        .map_err(|err| MigrationError::Config(format!("{:#}", err)))?;
    Ok(config)
}

/// Initialize tracing for the migration binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
