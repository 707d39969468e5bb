use serde::{Deserialize, Serialize};

/// Account written to the new metadata store
///
/// The legacy store has no stable account id, so `id` is always freshly minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
