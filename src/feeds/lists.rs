//! Screen-level lists.
//!
//! Each constructor pairs a query shape with its hydrator and page size.

use std::sync::Arc;

use tracing::debug;

use crate::core::PagedStore;
use crate::core::constants::{POST_FEED_PAGE_SIZE, SEARCH_PAGE_SIZE, collections, fields};
use crate::hydrate::{
    FriendHydrator, FriendRequestHydrator, Lookup, NotificationHydrator, PostHydrator,
    UserSearchHydrator,
};
use crate::paging::{Pager, PagerConfig};
use crate::store::Query;

/// Factory for the app's paginated lists over one store.
#[derive(Clone)]
pub struct Feeds {
    store: Arc<dyn PagedStore>,
    config: PagerConfig,
}

impl Feeds {
    /// Lists over `store` with the default pager configuration.
    pub fn new(store: Arc<dyn PagedStore>) -> Self {
        Self {
            store,
            config: PagerConfig::default(),
        }
    }

    /// Base configuration for every list. Feeds with a fixed page size keep
    /// their own.
    pub fn with_config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    fn lookup(&self) -> Lookup {
        Lookup::new(Arc::clone(&self.store))
    }

    fn sized(&self, page_size: usize) -> PagerConfig {
        PagerConfig {
            page_size,
            ..self.config.clone()
        }
    }

    /// Friends of `owner_id`, oldest friendship first.
    pub fn friends_list(&self, owner_id: &str) -> Pager<FriendHydrator> {
        let query = Query::new(collections::FRIENDS)
            .filter_eq(fields::OWNER_ID, owner_id)
            .order_by(fields::CREATED_AT);
        debug!(owner_id, "friends list");
        Pager::new(
            Arc::clone(&self.store),
            FriendHydrator::new(self.lookup()),
            query,
            self.config.clone(),
        )
    }

    /// Friend requests sent to `to_id`, oldest first.
    pub fn pending_requests(&self, to_id: &str) -> Pager<FriendRequestHydrator> {
        let query = Query::new(collections::FRIEND_REQUESTS)
            .filter_eq(fields::TO_ID, to_id)
            .order_by(fields::CREATED_AT);
        Pager::new(
            Arc::clone(&self.store),
            FriendRequestHydrator::new(self.lookup()),
            query,
            self.config.clone(),
        )
    }

    /// Notifications for `to_id`, newest first.
    pub fn notifications(&self, to_id: &str) -> Pager<NotificationHydrator> {
        let query = Query::new(collections::NOTIFICATIONS)
            .filter_eq(fields::TO_ID, to_id)
            .order_by_desc(fields::CREATED_AT);
        Pager::new(
            Arc::clone(&self.store),
            NotificationHydrator::new(self.lookup()),
            query,
            self.config.clone(),
        )
    }

    /// Community video feed, newest first.
    pub fn community_posts(&self) -> Pager<PostHydrator> {
        let query = Query::new(collections::POSTS).order_by_desc(fields::CREATED_AT);
        Pager::new(
            Arc::clone(&self.store),
            PostHydrator::new(self.lookup()),
            query,
            self.sized(POST_FEED_PAGE_SIZE),
        )
    }

    /// Users whose username starts with `prefix`, case-insensitively.
    ///
    /// The viewer is never listed; every other result carries the viewer's
    /// relation to that user.
    pub fn user_search(&self, viewer_id: &str, prefix: &str) -> Pager<UserSearchHydrator> {
        let prefix = prefix.trim().to_lowercase();
        debug!(viewer_id, %prefix, "user search");
        let query = Query::new(collections::USERS)
            .filter_prefix(fields::USERNAME_LOWER, prefix)
            .order_by(fields::USERNAME_LOWER);
        Pager::new(
            Arc::clone(&self.store),
            UserSearchHydrator::new(self.lookup(), viewer_id),
            query,
            self.sized(SEARCH_PAGE_SIZE),
        )
    }
}

impl std::fmt::Debug for Feeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feeds")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Identified;
    use crate::hydrate::Relation;
    use crate::model::{FriendRef, FriendRequestRef};
    use crate::paging::PageOutcome;
    use crate::store::{Document, MemoryStore};

    fn add_user(store: &MemoryStore, id: &str, username: &str) {
        store.insert(
            collections::USERS,
            Document::new(id)
                .with_field("username", username)
                .with_field(fields::USERNAME_LOWER, username.to_lowercase()),
        );
    }

    fn setup() -> (Arc<MemoryStore>, Feeds) {
        let store = Arc::new(MemoryStore::new());
        let feeds = Feeds::new(store.clone());
        (store, feeds)
    }

    fn ids<T: Identified>(items: &[T]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[tokio::test]
    async fn test_friends_list_only_owner_edges() {
        let (store, feeds) = setup();
        for (id, name) in [("me", "Me"), ("u1", "Tony"), ("u2", "Rodney")] {
            add_user(&store, id, name);
        }
        for (owner, friend, at) in [("me", "u1", 1), ("u2", "u1", 2), ("me", "u2", 3)] {
            store.insert(
                collections::FRIENDS,
                Document::new(FriendRef::edge_id(owner, friend))
                    .with_field("owner_id", owner)
                    .with_field("friend_id", friend)
                    .with_field("created_at", at),
            );
        }

        let pager = feeds.friends_list("me");
        pager.load_more().await.unwrap();
        assert_eq!(ids(&pager.items().await), vec!["u1", "u2"]);
        assert!(pager.is_exhausted().await);
    }

    #[tokio::test]
    async fn test_pending_requests() {
        let (store, feeds) = setup();
        add_user(&store, "u1", "Tony");
        store.insert(
            collections::FRIEND_REQUESTS,
            Document::new(FriendRequestRef::request_id("u1", "me"))
                .with_field("from_id", "u1")
                .with_field("to_id", "me"),
        );

        let pager = feeds.pending_requests("me");
        pager.load_more().await.unwrap();
        let items = pager.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sender.username, "Tony");
    }

    #[tokio::test]
    async fn test_notifications_newest_first() {
        let (store, feeds) = setup();
        add_user(&store, "u1", "Tony");
        store.insert(
            collections::MESSAGES,
            Document::new("m1")
                .with_field("sender_id", "u1")
                .with_field("body", "yo"),
        );
        for (id, at) in [("n1", 10), ("n2", 30), ("n3", 20)] {
            store.insert(
                collections::NOTIFICATIONS,
                Document::new(id)
                    .with_field("to_id", "me")
                    .with_field("sender_id", "u1")
                    .with_field("message_id", "m1")
                    .with_field("created_at", at),
            );
        }

        let pager = feeds.notifications("me");
        pager.load_more().await.unwrap();
        assert_eq!(ids(&pager.items().await), vec!["n2", "n3", "n1"]);
    }

    #[tokio::test]
    async fn test_community_posts_page_size() {
        let (store, feeds) = setup();
        add_user(&store, "u1", "Tony");
        for i in 0..25 {
            store.insert(
                collections::POSTS,
                Document::new(format!("p{i:02}"))
                    .with_field("author_id", "u1")
                    .with_field("created_at", i),
            );
        }

        let pager = feeds.community_posts();
        assert_eq!(pager.config().page_size, POST_FEED_PAGE_SIZE);
        pager.load_more().await.unwrap();
        let items = pager.items().await;
        assert_eq!(items.len(), POST_FEED_PAGE_SIZE);
        assert_eq!(items[0].post.id, "p24");

        assert!(matches!(
            pager.load_more().await.unwrap(),
            PageOutcome::Loaded { added: 5, exhausted: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_user_search_prefix_and_relations() {
        let (store, feeds) = setup();
        for (id, name) in [("me", "Tonya"), ("u1", "Tony"), ("u2", "tOnI"), ("u3", "Rodney")] {
            add_user(&store, id, name);
        }
        store.insert(
            collections::FRIENDS,
            Document::new(FriendRef::edge_id("me", "u1"))
                .with_field("owner_id", "me")
                .with_field("friend_id", "u1"),
        );

        let pager = feeds.user_search("me", " TON ");
        pager.load_more().await.unwrap();
        let items = pager.items().await;

        assert_eq!(ids(&items), vec!["u2", "u1"]);
        assert_eq!(items[0].relation, Relation::None);
        assert_eq!(items[1].relation, Relation::Friend);
    }
}
