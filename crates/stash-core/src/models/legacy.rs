use serde::{Deserialize, Serialize};

/// Account row from the legacy `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LegacyUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// File row from the legacy `files` table
///
/// `locator_pattern` is not a path: it is a glob of the form
/// `*/<mime prefix>/<legacy id>*` relative to the legacy upload root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LegacyFile {
    pub legacy_id: String,
    pub original_filename: String,
    pub locator_pattern: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub uploaded_by: String,
    /// Upload time, milliseconds since the Unix epoch
    pub uploaded_at: i64,
    /// `None` means the upload never expires
    pub uploaded_until: Option<i64>,
    pub is_public: bool,
    /// Raw `in_album` value; see [`LegacyFile::album`]
    pub album_id: Option<String>,
}

impl LegacyFile {
    /// Album this file belongs to, if any.
    ///
    /// The legacy schema marks "no album" with NULL, an empty string or `0`.
    pub fn album(&self) -> Option<&str> {
        match self.album_id.as_deref().map(str::trim) {
            None | Some("") | Some(crate::constants::NO_ALBUM) => None,
            Some(album) => Some(album),
        }
    }
}
