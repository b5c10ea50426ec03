//! Notification variants.
//!
//! Notifications are stored flat; the variant is recovered from which keys
//! are present, once, when the record is hydrated. Everything downstream
//! works with [`NotificationKind`] and never looks at the flat keys again.

use super::entities::{Comment, Message, Post, User};
use super::records::NotificationRecord;
use crate::core::Identified;

/// Required foreign keys of a notification, by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationShape {
    /// Someone commented on a post.
    Comment {
        /// Post commented on.
        post_id: String,
        /// New comment.
        comment_id: String,
    },
    /// Someone replied to a comment.
    Reply {
        /// Comment replied to.
        base_comment_id: String,
        /// New reply.
        reply_id: String,
    },
    /// Someone sent a message.
    Message {
        /// New message.
        message_id: String,
    },
    /// Someone sent a friend request.
    FriendRequest {
        /// Requesting user.
        sender_id: String,
    },
}

impl NotificationShape {
    /// Classify a flat record.
    ///
    /// Patterns are tried in order: comment (post + comment), reply (base
    /// comment + reply), message, and finally friend request, which needs a
    /// sender and no other content key. Returns `None` when nothing matches.
    pub fn classify(record: &NotificationRecord) -> Option<Self> {
        if let (Some(post_id), Some(comment_id)) =
            (present(&record.post_id), present(&record.comment_id))
        {
            return Some(Self::Comment {
                post_id: post_id.to_string(),
                comment_id: comment_id.to_string(),
            });
        }
        if let (Some(base), Some(reply)) =
            (present(&record.base_comment_id), present(&record.reply_id))
        {
            return Some(Self::Reply {
                base_comment_id: base.to_string(),
                reply_id: reply.to_string(),
            });
        }
        if let Some(message_id) = present(&record.message_id) {
            return Some(Self::Message {
                message_id: message_id.to_string(),
            });
        }

        let has_content_key = [
            &record.post_id,
            &record.comment_id,
            &record.base_comment_id,
            &record.reply_id,
        ]
        .into_iter()
        .any(|k| present(k).is_some());

        match present(&record.sender_id) {
            Some(sender_id) if !has_content_key => Some(Self::FriendRequest {
                sender_id: sender_id.to_string(),
            }),
            _ => None,
        }
    }
}

/// A key counts as present when it is set and non-empty.
fn present(key: &Option<String>) -> Option<&str> {
    key.as_deref().filter(|s| !s.is_empty())
}

/// Resolved notification payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    /// Comment on a post.
    Comment {
        /// Post commented on.
        post: Post,
        /// New comment.
        comment: Comment,
    },
    /// Reply to a comment.
    Reply {
        /// Comment replied to.
        base: Comment,
        /// New reply.
        reply: Comment,
    },
    /// Direct message.
    Message {
        /// New message.
        message: Message,
    },
    /// Friend request.
    FriendRequest {
        /// Requesting user.
        sender: User,
    },
}

/// A displayable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification id.
    pub id: String,
    /// Resolved payload.
    pub kind: NotificationKind,
    /// Who caused it. Always set for friend requests, best effort otherwise.
    pub sender: Option<User>,
    /// Whether the receiver has opened it.
    pub seen: bool,
    /// Milliseconds since epoch.
    pub created_at: i64,
}

impl Identified for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}
