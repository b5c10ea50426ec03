//! Collection names and paging defaults.

// =============================================================================
// PAGING
// =============================================================================

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a pager accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size of the community post feed.
pub const POST_FEED_PAGE_SIZE: usize = 20;

/// Page size of the user search screen.
pub const SEARCH_PAGE_SIZE: usize = 20;

// =============================================================================
// COLLECTIONS
// =============================================================================

/// Collection names in the remote document store.
pub mod collections {
    /// User profiles.
    pub const USERS: &str = "users";
    /// Community video posts.
    pub const POSTS: &str = "posts";
    /// Comments and replies.
    pub const COMMENTS: &str = "comments";
    /// Trick catalogue.
    pub const TRICKS: &str = "tricks";
    /// Direct messages.
    pub const MESSAGES: &str = "messages";
    /// Accepted friend edges (`owner_id` -> `friend_id`).
    pub const FRIENDS: &str = "friends";
    /// Pending friend requests (`to_id` <- `from_id`).
    pub const FRIEND_REQUESTS: &str = "friend_requests";
    /// Per-user notifications.
    pub const NOTIFICATIONS: &str = "notifications";
}

// =============================================================================
// FIELDS
// =============================================================================

/// Field names used by filters and orderings.
pub mod fields {
    /// Owner of a friend edge.
    pub const OWNER_ID: &str = "owner_id";
    /// Receiver of a friend request or notification.
    pub const TO_ID: &str = "to_id";
    /// Creation timestamp (milliseconds since epoch).
    pub const CREATED_AT: &str = "created_at";
    /// Lower-cased username used for prefix search.
    pub const USERNAME_LOWER: &str = "username_lower";
}

// =============================================================================
// TRICK RATINGS
// =============================================================================

/// Highest score a single trick attempt can record.
pub const MAX_TRICK_SCORE: u8 = 3;
