//! # trickfeed
//!
//! Paginated lists with cross-entity hydration for a social skateboarding
//! trick tracker.
//!
//! Every list screen of the app (friends, friend requests, notifications,
//! the community video feed, user search) follows the same pattern: fetch a
//! page of thin reference records by an opaque cursor, resolve each record's
//! foreign keys into full entities, and expose the hydrated items in store
//! order. This crate provides that engine:
//!
//! - **Single flight**: at most one fetch per list; extra calls are no-ops
//! - **Idempotent append**: items are unique by id, first arrival wins
//! - **Partial hydration**: undisplayable records are dropped, never fatal
//! - **Atomic commit**: a page is committed whole or not at all
//!
//! ## Feature Flags
//!
//! - `feeds` (default): Screen-level list constructors and mutations
//!
//! ## Modules
//!
//! - [`core`]: Store contract, constants, and error types
//! - [`store`]: Documents, queries, cursors, and the in-memory store
//! - [`model`]: Entities, reference records, and notification variants
//! - [`hydrate`]: Per-kind hydrators and concurrent page hydration
//! - [`paging`]: The pagination controller
//! - [`aggregate`]: Grouping of hydrated items into sections
//! - [`feeds`]: Configured lists and mutations (requires `feeds` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use trickfeed::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), PageError> {
//! let store = Arc::new(MemoryStore::new());
//! store.insert("users", Document::new("u1").with_field("username", "tony"));
//! store.insert(
//!     "posts",
//!     Document::new("p1")
//!         .with_field("author_id", "u1")
//!         .with_field("created_at", 1),
//! );
//!
//! let shared: Arc<dyn PagedStore> = store.clone();
//! let pager = Pager::new(
//!     shared.clone(),
//!     PostHydrator::new(Lookup::new(shared)),
//!     Query::new("posts").order_by_desc("created_at"),
//!     PagerConfig::default(),
//! );
//!
//! pager.load_more().await?;
//! let view = pager.view().await;
//! assert_eq!(view.items[0].author.username, "tony");
//! assert!(view.exhausted);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

pub mod aggregate;
pub mod hydrate;
pub mod model;
pub mod paging;
pub mod store;

// Feeds (feature-gated)
#[cfg(feature = "feeds")]
#[cfg_attr(docsrs, doc(cfg(feature = "feeds")))]
pub mod feeds;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core traits and types
    pub use crate::core::*;

    pub use crate::aggregate::{Group, GroupKey, NotificationTab, StarBucket, group, group_all};
    pub use crate::hydrate::{
        FeedPost, Friend, FriendHydrator, FriendRequestHydrator, Hydration, Hydrator, Lookup,
        NotificationHydrator, PendingFriend, PostHydrator, Relation, SearchResult,
        UserSearchHydrator,
    };
    pub use crate::model::*;
    pub use crate::paging::{
        ExhaustionPolicy, ListView, PageOutcome, Pager, PagerConfig, PagerConfigBuilder,
        SkipReason,
    };
    pub use crate::store::{Cursor, Document, MemoryStore, Page, Query};

    #[cfg(feature = "feeds")]
    pub use crate::feeds::{Feeds, MemoryMutations, MutationService, NewComment, NewPost};
}

// Re-export commonly used items at crate root
pub use crate::core::{ConfigError, MutationError, PageError, PagedStore, StoreError};
pub use paging::{PageOutcome, Pager, PagerConfig};
