//! Community feed posts.

use async_trait::async_trait;

use super::hydrator::{Hydration, Hydrator, Lookup};
use crate::core::Identified;
use crate::model::{Post, Trick, User};

/// A post ready for the community feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPost {
    /// The post read from the page.
    pub post: Post,
    /// Post author.
    pub author: User,
    /// Tagged trick, when tagged and resolvable.
    pub trick: Option<Trick>,
}

impl Identified for FeedPost {
    fn id(&self) -> &str {
        &self.post.id
    }
}

/// Resolves the author (required) and the tagged trick (optional).
#[derive(Debug, Clone)]
pub struct PostHydrator {
    lookup: Lookup,
}

impl PostHydrator {
    /// Create a hydrator.
    pub fn new(lookup: Lookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Hydrator for PostHydrator {
    type Record = Post;
    type Item = FeedPost;

    fn kind(&self) -> &'static str {
        "post"
    }

    async fn hydrate(&self, post: Post) -> Hydration<FeedPost> {
        let (author, trick) = tokio::join!(
            self.lookup.fetch::<User>(&post.author_id),
            self.lookup.optional::<Trick>(post.trick_id.as_deref()),
        );
        Hydration::from_result(author.map(|author| FeedPost {
            post,
            author,
            trick,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StoreError;
    use crate::core::constants::collections;
    use crate::store::{Document, MemoryStore};
    use std::sync::Arc;

    fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert(
            collections::USERS,
            Document::new("u1").with_field("username", "tony"),
        );
        store.insert(
            collections::TRICKS,
            Document::new("1001").with_field("name", "Kickflip"),
        );
        store
    }

    fn post(author: &str, trick: Option<&str>) -> Post {
        Post {
            id: "p1".into(),
            author_id: author.into(),
            trick_id: trick.map(str::to_string),
            caption: "first try".into(),
            video_url: None,
            created_at: 1,
        }
    }

    #[tokio::test]
    async fn test_full_hydration() {
        let hydrator = PostHydrator::new(Lookup::new(store()));
        let item = hydrator.hydrate(post("u1", Some("1001"))).await.ready().unwrap();
        assert_eq!(item.author.username, "tony");
        assert_eq!(item.trick.unwrap().name, "Kickflip");
    }

    #[tokio::test]
    async fn test_missing_trick_keeps_post() {
        let hydrator = PostHydrator::new(Lookup::new(store()));
        let item = hydrator.hydrate(post("u1", Some("9999"))).await.ready().unwrap();
        assert!(item.trick.is_none());
    }

    #[tokio::test]
    async fn test_trick_fault_keeps_post() {
        let store = store();
        store.fail_lookup(
            collections::TRICKS,
            "1001",
            StoreError::StoreUnavailable("down".into()),
        );
        let hydrator = PostHydrator::new(Lookup::new(store));
        let item = hydrator.hydrate(post("u1", Some("1001"))).await.ready().unwrap();
        assert!(item.trick.is_none());
    }

    #[tokio::test]
    async fn test_untagged_post_skips_trick_lookup() {
        let store = store();
        let hydrator = PostHydrator::new(Lookup::new(store.clone()));
        hydrator.hydrate(post("u1", None)).await.ready().unwrap();
        assert_eq!(store.lookup_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_author_discards() {
        let hydrator = PostHydrator::new(Lookup::new(store()));
        let result = hydrator.hydrate(post("ghost", Some("1001"))).await;
        assert!(matches!(result, Hydration::Discarded(_)));
    }
}
