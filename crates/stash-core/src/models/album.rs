use serde::{Deserialize, Serialize};

use super::Expiry;

/// Album written to the new metadata store
///
/// Created once, seeded from the first file of the album in traversal order
/// (the donor): `file_ids` holds only the donor's id, and the uploader,
/// timestamps and visibility are the donor's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub id: String,
    pub file_ids: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: i64,
    pub expires_at: Expiry,
    pub is_private: bool,
}
