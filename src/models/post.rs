//! The post record served by the `/posts` collection.

use serde::{Deserialize, Serialize};

/// A single post as returned by the API.
///
/// Field names follow the wire format (`userId` is camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier, unique within the collection.
    pub id: i64,

    /// Owning user. Many posts share one user.
    pub user_id: i64,

    pub title: String,

    /// Multi-line text.
    pub body: String,
}

impl Post {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }
}
