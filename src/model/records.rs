//! Reference records: thin documents returned by page fetches.
//!
//! A reference record only carries foreign keys. It lives until its page is
//! hydrated and is then folded into the hydrated item.

use serde::{Deserialize, Serialize};

/// Accepted friend edge, stored under `"{owner_id}_{friend_id}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRef {
    /// Edge id.
    pub id: String,
    /// User whose friends list this edge belongs to.
    pub owner_id: String,
    /// The friend.
    pub friend_id: String,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl FriendRef {
    /// Document id of the edge `owner -> friend`.
    pub fn edge_id(owner_id: &str, friend_id: &str) -> String {
        format!("{owner_id}_{friend_id}")
    }
}

/// Pending friend request, stored under `"{from_id}_{to_id}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestRef {
    /// Request id.
    pub id: String,
    /// Receiver.
    pub to_id: String,
    /// Sender.
    pub from_id: String,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl FriendRequestRef {
    /// Document id of the request `from -> to`.
    pub fn request_id(from_id: &str, to_id: &str) -> String {
        format!("{from_id}_{to_id}")
    }
}

/// Flat notification document.
///
/// Which optional keys are present decides the notification variant; see
/// [`NotificationShape::classify`](super::NotificationShape::classify).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Notification id.
    pub id: String,
    /// Receiver.
    pub to_id: String,
    /// User who caused the notification.
    #[serde(default)]
    pub sender_id: Option<String>,
    /// Post commented on.
    #[serde(default)]
    pub post_id: Option<String>,
    /// New comment.
    #[serde(default)]
    pub comment_id: Option<String>,
    /// Comment replied to.
    #[serde(default)]
    pub base_comment_id: Option<String>,
    /// New reply.
    #[serde(default)]
    pub reply_id: Option<String>,
    /// New message.
    #[serde(default)]
    pub message_id: Option<String>,
    /// Whether the receiver has opened it.
    #[serde(default)]
    pub seen: bool,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub created_at: i64,
}
