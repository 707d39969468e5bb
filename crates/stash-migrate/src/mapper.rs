//! Identity mapping from legacy rows to new records
//!
//! Accounts get fresh ids; files and albums keep their legacy ids so external
//! references to them stay valid.

use stash_core::models::{Expiry, LegacyFile, LegacyUser, NewAccount};
use uuid::Uuid;

/// Extensions preferred over the first `mime_guess` candidate, which is
/// alphabetical rather than conventional (`image/jpeg` would give `jfif`).
const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/svg+xml", "svg"),
    ("image/tiff", "tiff"),
    ("audio/mpeg", "mp3"),
    ("video/mpeg", "mpeg"),
    ("video/quicktime", "mov"),
    ("text/plain", "txt"),
];

/// A legacy file after identity mapping, once its content has been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedFile {
    pub id: String,
    pub display_name: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub uploaded_at: i64,
    pub expires_at: Expiry,
    pub is_private: bool,
    pub album_id: Option<String>,
}

pub fn mint_account(user: &LegacyUser) -> NewAccount {
    NewAccount {
        id: Uuid::new_v4().to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        is_admin: user.is_admin,
    }
}

/// Final display filename: the original name if it already has an extension,
/// otherwise the original name plus the MIME type's extension (if one is known).
pub fn display_filename(original: &str, mime_type: &str) -> String {
    if has_extension(original) {
        return original.to_string();
    }
    match mime_extension(mime_type) {
        Some(ext) => format!("{}.{}", original, ext),
        None => original.to_string(),
    }
}

/// Whether the last path segment has a `.` after its first character.
///
/// `.bashrc` has no extension, `notes.` has an empty one (and keeps it).
pub fn has_extension(filename: &str) -> bool {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    matches!(base.rfind('.'), Some(idx) if idx > 0)
}

pub fn mime_extension(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_ascii_lowercase();

    if let Some((_, ext)) = PREFERRED_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
    {
        return Some(ext);
    }

    mime_guess::get_mime_extensions_str(&essence).and_then(|exts| exts.first().copied())
}

pub fn is_private(is_public: bool) -> bool {
    !is_public
}

/// Map a legacy file whose content now lives at `storage_key`.
///
/// `size_bytes` must be the size measured by the blob store; the legacy
/// `filesize` column is not trusted.
pub fn map_file(
    file: &LegacyFile,
    display_name: String,
    storage_key: String,
    size_bytes: u64,
) -> MappedFile {
    MappedFile {
        id: file.legacy_id.clone(),
        display_name,
        storage_key,
        size_bytes,
        mime_type: file.mime_type.clone(),
        uploaded_by: file.uploaded_by.clone(),
        uploaded_at: file.uploaded_at,
        expires_at: Expiry::from_legacy(file.uploaded_until),
        is_private: is_private(file.is_public),
        album_id: file.album().map(String::from),
    }
}
