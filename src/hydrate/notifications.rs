//! Notification hydration.

use async_trait::async_trait;
use tracing::warn;

use super::hydrator::{DiscardReason, Hydration, Hydrator, Lookup};
use crate::core::StoreError;
use crate::model::{
    Comment, Message, Notification, NotificationKind, NotificationRecord, NotificationShape, Post,
    User,
};

/// Resolves a flat notification into its variant.
///
/// The variant's required keys decide whether the notification is shown;
/// the sender profile is optional except for friend requests, where it is
/// the whole payload.
#[derive(Debug, Clone)]
pub struct NotificationHydrator {
    lookup: Lookup,
}

impl NotificationHydrator {
    /// Create a hydrator.
    pub fn new(lookup: Lookup) -> Self {
        Self { lookup }
    }

    async fn resolve(
        &self,
        shape: NotificationShape,
        sender_id: Option<&str>,
    ) -> Result<(NotificationKind, Option<User>), StoreError> {
        match shape {
            NotificationShape::Comment {
                post_id,
                comment_id,
            } => {
                let (post, comment, sender) = tokio::join!(
                    self.lookup.fetch::<Post>(&post_id),
                    self.lookup.fetch::<Comment>(&comment_id),
                    self.lookup.optional::<User>(sender_id),
                );
                let kind = NotificationKind::Comment {
                    post: post?,
                    comment: comment?,
                };
                Ok((kind, sender))
            }
            NotificationShape::Reply {
                base_comment_id,
                reply_id,
            } => {
                let (base, reply, sender) = tokio::join!(
                    self.lookup.fetch::<Comment>(&base_comment_id),
                    self.lookup.fetch::<Comment>(&reply_id),
                    self.lookup.optional::<User>(sender_id),
                );
                let kind = NotificationKind::Reply {
                    base: base?,
                    reply: reply?,
                };
                Ok((kind, sender))
            }
            NotificationShape::Message { message_id } => {
                let (message, sender) = tokio::join!(
                    self.lookup.fetch::<Message>(&message_id),
                    self.lookup.optional::<User>(sender_id),
                );
                let kind = NotificationKind::Message { message: message? };
                Ok((kind, sender))
            }
            NotificationShape::FriendRequest { sender_id } => {
                let sender = self.lookup.fetch::<User>(&sender_id).await?;
                let kind = NotificationKind::FriendRequest {
                    sender: sender.clone(),
                };
                Ok((kind, Some(sender)))
            }
        }
    }
}

#[async_trait]
impl Hydrator for NotificationHydrator {
    type Record = NotificationRecord;
    type Item = Notification;

    fn kind(&self) -> &'static str {
        "notification"
    }

    async fn hydrate(&self, record: NotificationRecord) -> Hydration<Notification> {
        let Some(shape) = NotificationShape::classify(&record) else {
            warn!(id = %record.id, "notification matches no known variant");
            return Hydration::Discarded(DiscardReason::TaxonomyViolation);
        };

        let resolved = self.resolve(shape, record.sender_id.as_deref()).await;
        Hydration::from_result(resolved.map(|(kind, sender)| Notification {
            id: record.id,
            kind,
            sender,
            seen: record.seen,
            created_at: record.created_at,
        }))
    }
}
