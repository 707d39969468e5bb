//! Legacy fixtures: on-disk upload layout, thumbnails and legacy rows.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use stash_core::models::{LegacyFile, LegacyUser};
use tempfile::TempDir;

pub const LEGACY_SCHEMA: &str = r#"
    CREATE TABLE users (
        username TEXT PRIMARY KEY,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        admin INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE files (
        file_id TEXT PRIMARY KEY,
        original_filename TEXT NOT NULL,
        filesize INTEGER NOT NULL,
        mimetype TEXT NOT NULL,
        uploaded_by TEXT NOT NULL,
        uploaded_at INTEGER NOT NULL,
        uploaded_until INTEGER,
        public INTEGER NOT NULL DEFAULT 1,
        in_album TEXT
    );
"#;

/// Temp directory holding `uploads/<user>/<mime prefix>/<id>.<ext>` and
/// `thumbnail/<id>.webp`
pub struct LegacyLayout {
    pub temp_dir: TempDir,
}

impl LegacyLayout {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp_dir.path().join("uploads")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("thumbnail")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn upload_root(&self) -> PathBuf {
        self.root().join("uploads")
    }

    pub fn thumbnail_dir(&self) -> PathBuf {
        self.root().join("thumbnail")
    }

    /// Place content and thumbnail for a legacy file.
    pub fn add_content(&self, file: &LegacyFile, extension: &str, content: &[u8]) {
        let dir = self
            .upload_root()
            .join(&file.uploaded_by)
            .join(mime_prefix(&file.mime_type));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.{}", file.legacy_id, extension)), content).unwrap();
        std::fs::write(
            self.thumbnail_dir().join(format!("{}.webp", file.legacy_id)),
            b"thumb",
        )
        .unwrap();
    }

    /// Write a legacy SQLite store holding `users` and `files`.
    pub async fn write_database(&self, users: &[LegacyUser], files: &[LegacyFile]) -> PathBuf {
        let path = self.root().join("stash.db");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::raw_sql(LEGACY_SCHEMA).execute(&pool).await.unwrap();

        for user in users {
            sqlx::query("INSERT INTO users VALUES (?, ?, ?, ?)")
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.is_admin)
                .execute(&pool)
                .await
                .unwrap();
        }

        for file in files {
            sqlx::query("INSERT INTO files VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)")
                .bind(&file.legacy_id)
                .bind(&file.original_filename)
                .bind(file.size_bytes)
                .bind(&file.mime_type)
                .bind(&file.uploaded_by)
                .bind(file.uploaded_at)
                .bind(file.uploaded_until)
                .bind(file.is_public)
                .bind(&file.album_id)
                .execute(&pool)
                .await
                .unwrap();
        }

        pool.close().await;
        path
    }
}

impl Default for LegacyLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn mime_prefix(mime_type: &str) -> &str {
    mime_type.split('/').next().unwrap_or(mime_type)
}

pub fn legacy_user(username: &str) -> LegacyUser {
    LegacyUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: format!("hash-{}", username),
        is_admin: false,
    }
}

/// Legacy file row as the legacy reader would return it
pub fn legacy_file(
    id: &str,
    original_filename: &str,
    mime_type: &str,
    uploaded_by: &str,
    album_id: Option<&str>,
) -> LegacyFile {
    LegacyFile {
        legacy_id: id.to_string(),
        original_filename: original_filename.to_string(),
        locator_pattern: format!("*/{}/{}*", mime_prefix(mime_type), id),
        size_bytes: 0,
        mime_type: mime_type.to_string(),
        uploaded_by: uploaded_by.to_string(),
        uploaded_at: 1_600_000_000_000,
        uploaded_until: None,
        is_public: true,
        album_id: album_id.map(String::from),
    }
}
