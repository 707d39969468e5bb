use serde::{Deserialize, Serialize};

use super::Expiry;

/// Full file record, for standalone files and album founders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    pub id: String,
    pub display_name: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub uploaded_at: i64,
    pub expires_at: Expiry,
    pub is_private: bool,
}

/// Minimal file record joining an album that already exists
///
/// Timestamps and visibility are inherited from the album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinFile {
    pub album_id: String,
    pub id: String,
    pub display_name: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_by: String,
}

/// Payload of the metadata store's `add_file` operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRecord {
    Full(NewFile),
    Join(JoinFile),
}

impl FileRecord {
    pub fn id(&self) -> &str {
        match self {
            FileRecord::Full(file) => &file.id,
            FileRecord::Join(file) => &file.id,
        }
    }

    /// Album referenced by the record. Only join records reference one.
    pub fn album_id(&self) -> Option<&str> {
        match self {
            FileRecord::Full(_) => None,
            FileRecord::Join(file) => Some(&file.album_id),
        }
    }
}

impl From<NewFile> for FileRecord {
    fn from(file: NewFile) -> Self {
        FileRecord::Full(file)
    }
}

impl From<JoinFile> for FileRecord {
    fn from(file: JoinFile) -> Self {
        FileRecord::Join(file)
    }
}
