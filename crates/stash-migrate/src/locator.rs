//! Legacy content discovery
//!
//! Legacy content lives at `<upload root>/<username>/<mime prefix>/<file id><ext>`.
//! The reader hands back a glob (`*/image/abc123*`) rather than a path, so the
//! uploader's directory and the extension never have to be known.

use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use stash_core::constants::THUMBNAIL_EXTENSION;
use stash_storage::BlobReader;

use crate::error::{MigrationError, MigrationResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub struct ContentLocator {
    upload_root: PathBuf,
    thumbnail_dir: PathBuf,
}

impl ContentLocator {
    pub fn new(upload_root: impl Into<PathBuf>, thumbnail_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
            thumbnail_dir: thumbnail_dir.into(),
        }
    }

    /// Resolve a locator pattern to the content file of `file_id`.
    ///
    /// The trailing `*` of a pattern also matches longer ids (`1*` matches
    /// `12.png`), so only files named `<file_id>` or `<file_id>.<ext>` count.
    /// Returns `Ok(None)` when nothing matches. When several files match, the
    /// first in lexical order wins.
    pub async fn locate(&self, pattern: &str, file_id: &str) -> MigrationResult<Option<PathBuf>> {
        let full_pattern = format!(
            "{}/{}",
            Pattern::escape(&self.upload_root.to_string_lossy()),
            pattern
        );

        let paths = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|source| {
            MigrationError::LocatorPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|err| MigrationError::SourceRead {
                path: err.path().to_path_buf(),
                source: err.into(),
            })?;
            if path.is_file() && names_file(&path, file_id) {
                matches.push(path);
            }
        }

        let Some(first) = matches.first() else {
            return Ok(None);
        };

        if matches.len() > 1 {
            tracing::warn!(
                pattern = %pattern,
                matches = matches.len(),
                chosen = %first.display(),
                "Locator pattern matched several files"
            );
        }

        let resolved = tokio::fs::canonicalize(first)
            .await
            .map_err(|source| MigrationError::SourceRead {
                path: first.clone(),
                source,
            })?;

        Ok(Some(resolved))
    }

    /// Pre-rendered thumbnail for a legacy file id
    pub fn thumbnail_path(&self, file_id: &str) -> PathBuf {
        self.thumbnail_dir
            .join(format!("{}.{}", file_id, THUMBNAIL_EXTENSION))
    }

    pub async fn open(path: &Path) -> io::Result<BlobReader> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::pin(file))
    }
}

fn names_file(path: &Path, file_id: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    match name.strip_prefix(file_id) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
