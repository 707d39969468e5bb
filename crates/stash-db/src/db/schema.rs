use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// Create the metadata tables if they do not exist yet.
///
/// `expires_at` columns hold either epoch milliseconds or the `Infinity`
/// sentinel, so they are TEXT. Join records leave the inherited columns NULL.
pub(crate) async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    // Accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create accounts table")?;

    // Albums table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id TEXT PRIMARY KEY,
            uploaded_by TEXT NOT NULL,
            uploaded_at INTEGER NOT NULL,
            expires_at TEXT NOT NULL,
            is_private INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create albums table")?;

    // Files table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            storage_key TEXT NOT NULL,
            size_bytes INTEGER NOT NULL,
            mime_type TEXT NOT NULL,
            uploaded_by TEXT NOT NULL,
            uploaded_at INTEGER,
            expires_at TEXT,
            is_private INTEGER,
            album_id TEXT,
            FOREIGN KEY (album_id) REFERENCES albums (id)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create files table")?;

    // Album membership, in insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS album_files (
            album_id TEXT NOT NULL,
            file_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (album_id, file_id),
            FOREIGN KEY (album_id) REFERENCES albums (id),
            FOREIGN KEY (file_id) REFERENCES files (id)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create album_files table")?;

    Ok(())
}
