use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use stash_core::models::{FileRecord, JoinFile, NewAccount, NewAlbum, NewFile};
use stash_core::MetadataBackend;
use std::str::FromStr;

use super::schema::initialize_schema;
use crate::traits::MetadataStore;

/// File row as stored in the metadata store
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredFile {
    pub id: String,
    pub display_name: String,
    pub storage_key: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub uploaded_at: Option<i64>,
    pub expires_at: Option<String>,
    pub is_private: Option<bool>,
    pub album_id: Option<String>,
}

/// Album row plus its members in insertion order
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredAlbum {
    pub id: String,
    pub uploaded_by: String,
    pub uploaded_at: i64,
    pub expires_at: String,
    pub is_private: bool,
    #[sqlx(skip)]
    pub file_ids: Vec<String>,
}

#[derive(Clone)]
pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
    /// Connect to (creating if needed) the metadata database and its schema
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid metadata database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to connect to metadata database")?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    #[tracing::instrument(skip(self), fields(db.table = "accounts", db.operation = "count"))]
    pub async fn count_accounts(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select", db.record_id = %id))]
    pub async fn get_file(&self, id: &str) -> Result<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, display_name, storage_key, size_bytes, mime_type, uploaded_by,
                   uploaded_at, expires_at, is_private, album_id
            FROM files
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(db.table = "albums", db.operation = "select", db.record_id = %id))]
    pub async fn get_album(&self, id: &str) -> Result<Option<StoredAlbum>> {
        let album = sqlx::query_as::<_, StoredAlbum>(
            "SELECT id, uploaded_by, uploaded_at, expires_at, is_private FROM albums WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut album) = album else {
            return Ok(None);
        };

        album.file_ids = sqlx::query_scalar::<_, String>(
            "SELECT file_id FROM album_files WHERE album_id = ? ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(album))
    }

    async fn insert_full_file(&self, file: &NewFile) -> Result<()> {
        let size_bytes = i64::try_from(file.size_bytes).context("File size exceeds i64")?;

        sqlx::query(
            r#"
            INSERT INTO files (id, display_name, storage_key, size_bytes, mime_type,
                               uploaded_by, uploaded_at, expires_at, is_private)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&file.id)
        .bind(&file.display_name)
        .bind(&file.storage_key)
        .bind(size_bytes)
        .bind(&file.mime_type)
        .bind(&file.uploaded_by)
        .bind(file.uploaded_at)
        .bind(file.expires_at.to_string())
        .bind(file.is_private)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert file {}", file.id))?;

        Ok(())
    }

    async fn insert_join_file(&self, file: &JoinFile) -> Result<()> {
        let size_bytes = i64::try_from(file.size_bytes).context("File size exceeds i64")?;

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO files (id, display_name, storage_key, size_bytes, mime_type,
                               uploaded_by, album_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&file.id)
        .bind(&file.display_name)
        .bind(&file.storage_key)
        .bind(size_bytes)
        .bind(&file.mime_type)
        .bind(&file.uploaded_by)
        .bind(&file.album_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert file {}", file.id))?;

        sqlx::query(
            r#"
            INSERT INTO album_files (album_id, file_id, position)
            VALUES (?, ?, (SELECT COUNT(*) FROM album_files WHERE album_id = ?))
            "#,
        )
        .bind(&file.album_id)
        .bind(&file.id)
        .bind(&file.album_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to add file {} to album {}", file.id, file.album_id))?;

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(())
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    #[tracing::instrument(skip(self, account), fields(db.table = "accounts", db.operation = "insert", db.record_id = %account.id))]
    async fn create_account(&self, account: &NewAccount) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, is_admin)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.is_admin)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to create account {}", account.username))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, album), fields(db.table = "albums", db.operation = "insert", db.record_id = %album.id))]
    async fn create_album(&self, album: &NewAlbum) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO albums (id, uploaded_by, uploaded_at, expires_at, is_private)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&album.id)
        .bind(&album.uploaded_by)
        .bind(album.uploaded_at)
        .bind(album.expires_at.to_string())
        .bind(album.is_private)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to create album {}", album.id))?;

        for (index, file_id) in album.file_ids.iter().enumerate() {
            sqlx::query("INSERT INTO album_files (album_id, file_id, position) VALUES (?, ?, ?)")
                .bind(&album.id)
                .bind(file_id)
                .bind(index as i64)
                .execute(&mut *tx)
                .await
                .context("Failed to insert album member")?;

            sqlx::query("UPDATE files SET album_id = ? WHERE id = ?")
                .bind(&album.id)
                .bind(file_id)
                .execute(&mut *tx)
                .await
                .context("Failed to link file to album")?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(())
    }

    #[tracing::instrument(skip(self, file), fields(db.table = "files", db.operation = "insert", db.record_id = %file.id()))]
    async fn add_file(&self, file: &FileRecord) -> Result<()> {
        match file {
            FileRecord::Full(file) => self.insert_full_file(file).await,
            FileRecord::Join(file) => self.insert_join_file(file).await,
        }
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Sqlite
    }
}
