//! Legacy store reader
//!
//! The legacy store is a single SQLite file with `users` and `files` tables.
//! It is opened read-write like the application that owned it, but only read.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use stash_core::models::{LegacyFile, LegacyUser};

use crate::error::{MigrationError, MigrationResult};

const LIST_USERS: &str = r#"
    SELECT
        "username",
        "email",
        "password" AS "password_hash",
        "admin" AS "is_admin"
    FROM
        "users"
"#;

// The locator turns `image/png` + `abc123` into `*/image/abc123*`: rtrim strips
// every character of the slash-less MIME type from the right, leaving the
// prefix up to and including the slash.
//
// Ordering by album keeps album members contiguous; rowid makes the donor
// (first member visited) deterministic.
const LIST_FILES: &str = r#"
    SELECT
        CAST("file_id" AS TEXT) AS "legacy_id",
        "original_filename",
        '*/' || rtrim("mimetype", replace("mimetype", '/', '')) || "file_id" || '*' AS "locator_pattern",
        "filesize" AS "size_bytes",
        "mimetype" AS "mime_type",
        "uploaded_by",
        "uploaded_at",
        "uploaded_until",
        "public" AS "is_public",
        CAST("in_album" AS TEXT) AS "album_id"
    FROM
        "files"
    ORDER BY
        "in_album" ASC,
        rowid ASC
"#;

pub struct LegacyReader {
    pool: SqlitePool,
    path: PathBuf,
}

impl LegacyReader {
    /// Open the legacy store, waiting at most `lock_timeout` for locks.
    ///
    /// Fails with [`MigrationError::LegacyStoreUnavailable`] when the file is
    /// missing, stays locked past the timeout or is not a SQLite database.
    pub async fn open(path: impl AsRef<Path>, lock_timeout: Duration) -> MigrationResult<Self> {
        let path = path.as_ref().to_path_buf();
        let unavailable = |source| MigrationError::LegacyStoreUnavailable {
            path: path.clone(),
            source,
        };

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(false)
            .read_only(false)
            .busy_timeout(lock_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(lock_timeout)
            .connect_with(options)
            .await
            .map_err(unavailable)?;

        // A malformed file only fails once a page is read.
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&pool)
            .await
            .map_err(unavailable)?;

        tracing::info!(path = %path.display(), "Opened legacy store");

        Ok(Self { pool, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every legacy account, in no particular order
    pub async fn list_users(&self) -> MigrationResult<Vec<LegacyUser>> {
        sqlx::query_as::<_, LegacyUser>(LIST_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| MigrationError::LegacyQuery {
                query: "list_users",
                source,
            })
    }

    /// Every legacy file, standalone files first, album members contiguous
    pub async fn list_files(&self) -> MigrationResult<Vec<LegacyFile>> {
        sqlx::query_as::<_, LegacyFile>(LIST_FILES)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| MigrationError::LegacyQuery {
                query: "list_files",
                source,
            })
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
