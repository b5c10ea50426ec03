//! Friends, friend requests and user search.

use async_trait::async_trait;

use super::hydrator::{DiscardReason, Hydration, Hydrator, Lookup};
use crate::core::constants::collections;
use crate::core::{Identified, StoreError};
use crate::model::{FriendRef, FriendRequestRef, User};

/// A friend on a friends list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    /// The edge read from the page.
    pub edge: FriendRef,
    /// The friend's profile.
    pub user: User,
}

/// Listed by the friend's user id, so unfriending removes by user id.
impl Identified for Friend {
    fn id(&self) -> &str {
        &self.user.id
    }
}

/// Resolves the friend's profile (required).
#[derive(Debug, Clone)]
pub struct FriendHydrator {
    lookup: Lookup,
}

impl FriendHydrator {
    /// Create a hydrator.
    pub fn new(lookup: Lookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Hydrator for FriendHydrator {
    type Record = FriendRef;
    type Item = Friend;

    fn kind(&self) -> &'static str {
        "friend"
    }

    async fn hydrate(&self, edge: FriendRef) -> Hydration<Friend> {
        Hydration::from_result(
            self.lookup
                .fetch::<User>(&edge.friend_id)
                .await
                .map(|user| Friend { edge, user }),
        )
    }
}

/// A pending friend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFriend {
    /// The request read from the page.
    pub request: FriendRequestRef,
    /// The requesting user.
    pub sender: User,
}

impl Identified for PendingFriend {
    fn id(&self) -> &str {
        &self.request.id
    }
}

/// Resolves the requesting user (required).
#[derive(Debug, Clone)]
pub struct FriendRequestHydrator {
    lookup: Lookup,
}

impl FriendRequestHydrator {
    /// Create a hydrator.
    pub fn new(lookup: Lookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Hydrator for FriendRequestHydrator {
    type Record = FriendRequestRef;
    type Item = PendingFriend;

    fn kind(&self) -> &'static str {
        "friend_request"
    }

    async fn hydrate(&self, request: FriendRequestRef) -> Hydration<PendingFriend> {
        Hydration::from_result(
            self.lookup
                .fetch::<User>(&request.from_id)
                .await
                .map(|sender| PendingFriend { request, sender }),
        )
    }
}

/// Relationship between the viewer and a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Not connected.
    None,
    /// Already friends.
    Friend,
    /// Viewer has a pending request to this user.
    RequestSent,
    /// Could not be determined.
    Unknown,
}

/// A user search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Matching user.
    pub user: User,
    /// How the viewer relates to them.
    pub relation: Relation,
}

impl Identified for SearchResult {
    fn id(&self) -> &str {
        &self.user.id
    }
}

/// Enriches user search hits with the viewer's relation to them.
///
/// The page already holds full user documents; the relation is optional
/// enrichment and falls back to [`Relation::Unknown`]. The viewer never
/// appears in their own results.
#[derive(Debug, Clone)]
pub struct UserSearchHydrator {
    lookup: Lookup,
    viewer_id: String,
}

impl UserSearchHydrator {
    /// Create a hydrator for `viewer_id`'s searches.
    pub fn new(lookup: Lookup, viewer_id: impl Into<String>) -> Self {
        Self {
            lookup,
            viewer_id: viewer_id.into(),
        }
    }

    async fn relation(&self, user_id: &str) -> Result<Relation, StoreError> {
        let edge_id = FriendRef::edge_id(&self.viewer_id, user_id);
        let request_id = FriendRequestRef::request_id(&self.viewer_id, user_id);
        let (is_friend, requested) = tokio::join!(
            self.lookup.exists(collections::FRIENDS, &edge_id),
            self.lookup.exists(collections::FRIEND_REQUESTS, &request_id),
        );
        Ok(if is_friend? {
            Relation::Friend
        } else if requested? {
            Relation::RequestSent
        } else {
            Relation::None
        })
    }
}

#[async_trait]
impl Hydrator for UserSearchHydrator {
    type Record = User;
    type Item = SearchResult;

    fn kind(&self) -> &'static str {
        "user_search"
    }

    async fn hydrate(&self, user: User) -> Hydration<SearchResult> {
        if user.id == self.viewer_id {
            return Hydration::Discarded(DiscardReason::Excluded("viewer".to_string()));
        }
        let relation = self.relation(&user.id).await.unwrap_or(Relation::Unknown);
        Hydration::Ready(SearchResult { user, relation })
    }
}
