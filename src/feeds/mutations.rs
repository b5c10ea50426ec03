//! Entity mutations and their local list updates.
//!
//! Lists never re-fetch after a write. A successful mutation is mirrored by
//! removing or inserting the affected item in the open list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::constants::collections;
use crate::core::{MutationError, StoreError};
use crate::hydrate::{
    FeedPost, Friend, FriendHydrator, FriendRequestHydrator, PendingFriend, PostHydrator,
};
use crate::model::{
    Comment, FriendRef, FriendRequestRef, NotificationRecord, Post, Trick, User,
};
use crate::paging::Pager;
use crate::store::{Document, MemoryStore};

/// A post to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    /// Author's user id.
    pub author_id: String,
    /// Tagged trick.
    pub trick_id: Option<String>,
    /// Caption text.
    pub caption: String,
    /// Uploaded video location.
    pub video_url: Option<String>,
}

/// A comment or reply to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    /// Post commented on.
    pub post_id: String,
    /// Author's user id.
    pub author_id: String,
    /// Comment text.
    pub body: String,
    /// Comment replied to, for replies.
    pub base_comment_id: Option<String>,
}

/// Create and delete operations on friend edges, posts and comments.
#[async_trait]
pub trait MutationService: Send + Sync {
    /// Make `owner_id` and `friend_id` friends, consuming any pending
    /// request between them. Returns the owner's edge.
    async fn add_friend(&self, owner_id: &str, friend_id: &str) -> Result<FriendRef, MutationError>;

    /// Remove the friendship in both directions.
    async fn remove_friend(&self, owner_id: &str, friend_id: &str) -> Result<(), MutationError>;

    /// Publish a post.
    async fn create_post(&self, post: NewPost) -> Result<Post, MutationError>;

    /// Delete a post.
    async fn delete_post(&self, post_id: &str) -> Result<(), MutationError>;

    /// Publish a comment or reply and notify the author it responds to.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, MutationError>;

    /// Delete a comment.
    async fn delete_comment(&self, comment_id: &str) -> Result<(), MutationError>;
}

/// [`MutationService`] writing straight into a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryMutations {
    store: Arc<MemoryStore>,
    next_id: AtomicU64,
}

impl MemoryMutations {
    /// Write into `store`.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn require(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.store
            .peek(collection, id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    fn notify(&self, record: NotificationRecord) -> Result<(), StoreError> {
        let id = record.id.clone();
        self.store
            .insert_serialized(collections::NOTIFICATIONS, &id, &record)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn non_empty(value: &str, what: &str) -> Result<(), MutationError> {
    if value.trim().is_empty() {
        return Err(MutationError::Invalid(format!("{what} is empty")));
    }
    Ok(())
}

#[async_trait]
impl MutationService for MemoryMutations {
    async fn add_friend(&self, owner_id: &str, friend_id: &str) -> Result<FriendRef, MutationError> {
        if owner_id == friend_id {
            return Err(MutationError::Invalid("cannot befriend yourself".into()));
        }
        self.require(collections::USERS, owner_id)?;
        self.require(collections::USERS, friend_id)?;

        let created_at = now_millis();
        let edge = FriendRef {
            id: FriendRef::edge_id(owner_id, friend_id),
            owner_id: owner_id.to_string(),
            friend_id: friend_id.to_string(),
            created_at,
        };
        let reverse = FriendRef {
            id: FriendRef::edge_id(friend_id, owner_id),
            owner_id: friend_id.to_string(),
            friend_id: owner_id.to_string(),
            created_at,
        };
        self.store
            .insert_serialized(collections::FRIENDS, &edge.id, &edge)?;
        self.store
            .insert_serialized(collections::FRIENDS, &reverse.id, &reverse)?;

        for request_id in [
            FriendRequestRef::request_id(friend_id, owner_id),
            FriendRequestRef::request_id(owner_id, friend_id),
        ] {
            self.store.remove(collections::FRIEND_REQUESTS, &request_id);
        }

        info!(owner_id, friend_id, "friend added");
        Ok(edge)
    }

    async fn remove_friend(&self, owner_id: &str, friend_id: &str) -> Result<(), MutationError> {
        let edge_id = FriendRef::edge_id(owner_id, friend_id);
        let forward = self.store.remove(collections::FRIENDS, &edge_id);
        let reverse = self
            .store
            .remove(collections::FRIENDS, &FriendRef::edge_id(friend_id, owner_id));
        if forward.is_none() && reverse.is_none() {
            return Err(StoreError::not_found(collections::FRIENDS, &edge_id).into());
        }
        info!(owner_id, friend_id, "friend removed");
        Ok(())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, MutationError> {
        self.require(collections::USERS, &post.author_id)?;
        if let Some(trick_id) = &post.trick_id {
            self.require(collections::TRICKS, trick_id)?;
        }

        let post = Post {
            id: self.next_id("post"),
            author_id: post.author_id,
            trick_id: post.trick_id,
            caption: post.caption,
            video_url: post.video_url,
            created_at: now_millis(),
        };
        self.store
            .insert_serialized(collections::POSTS, &post.id, &post)?;
        info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), MutationError> {
        self.store
            .remove(collections::POSTS, post_id)
            .ok_or_else(|| StoreError::not_found(collections::POSTS, post_id))?;
        info!(post_id, "post deleted");
        Ok(())
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, MutationError> {
        non_empty(&comment.body, "comment body")?;
        let post: Post = self.require(collections::POSTS, &comment.post_id)?.decode()?;
        let base: Option<Comment> = match &comment.base_comment_id {
            Some(base_id) => Some(self.require(collections::COMMENTS, base_id)?.decode()?),
            None => None,
        };

        let created = Comment {
            id: self.next_id("comment"),
            post_id: comment.post_id,
            author_id: comment.author_id,
            body: comment.body,
            base_comment_id: comment.base_comment_id,
            created_at: now_millis(),
        };
        self.store
            .insert_serialized(collections::COMMENTS, &created.id, &created)?;

        let mut record = NotificationRecord {
            id: self.next_id("notification"),
            sender_id: Some(created.author_id.clone()),
            created_at: created.created_at,
            ..NotificationRecord::default()
        };
        match base {
            Some(base) => {
                record.to_id = base.author_id;
                record.base_comment_id = Some(base.id);
                record.reply_id = Some(created.id.clone());
            }
            None => {
                record.to_id = post.author_id;
                record.post_id = Some(post.id);
                record.comment_id = Some(created.id.clone());
            }
        }
        if record.to_id == created.author_id {
            debug!(comment_id = %created.id, "own content, no notification");
        } else {
            self.notify(record)?;
        }

        info!(comment_id = %created.id, post_id = %created.post_id, "comment created");
        Ok(created)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), MutationError> {
        self.store
            .remove(collections::COMMENTS, comment_id)
            .ok_or_else(|| StoreError::not_found(collections::COMMENTS, comment_id))?;
        info!(comment_id, "comment deleted");
        Ok(())
    }
}

/// Unfriend and drop the friend from the open friends list.
pub async fn unfriend(
    service: &dyn MutationService,
    friends: &Pager<FriendHydrator>,
    owner_id: &str,
    friend_id: &str,
) -> Result<(), MutationError> {
    service.remove_friend(owner_id, friend_id).await?;
    friends.remove(friend_id).await;
    Ok(())
}

/// Accept a pending request: the request leaves the requests list and the
/// sender joins the end of the friends list.
pub async fn accept_request(
    service: &dyn MutationService,
    requests: &Pager<FriendRequestHydrator>,
    friends: &Pager<FriendHydrator>,
    request: &PendingFriend,
) -> Result<(), MutationError> {
    let edge = service
        .add_friend(&request.request.to_id, &request.request.from_id)
        .await?;
    requests.remove(&request.request.id).await;
    friends
        .append(Friend {
            edge,
            user: request.sender.clone(),
        })
        .await;
    Ok(())
}

/// Publish a post and show it at the top of the open feed.
pub async fn publish_post(
    service: &dyn MutationService,
    feed: &Pager<PostHydrator>,
    author: User,
    trick: Option<Trick>,
    post: NewPost,
) -> Result<FeedPost, MutationError> {
    let post = service.create_post(post).await?;
    let item = FeedPost {
        post,
        author,
        trick,
    };
    feed.prepend(item.clone()).await;
    Ok(item)
}

/// Delete a post and drop it from the open feed.
pub async fn retract_post(
    service: &dyn MutationService,
    feed: &Pager<PostHydrator>,
    post_id: &str,
) -> Result<(), MutationError> {
    service.delete_post(post_id).await?;
    feed.remove(post_id).await;
    Ok(())
}
