//! Error types for trickfeed.

use thiserror::Error;

/// Errors reported by a document store.
///
/// `RecordNotFound`, `PermissionDenied` and `DecodingFailed` are per-item
/// errors: during hydration they turn into a discarded record and never reach
/// the UI. `StoreUnavailable` and `Unknown` are faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// No document with this id exists in the collection.
    #[error("record not found: {collection}/{id}")]
    RecordNotFound {
        /// Collection that was queried.
        collection: String,
        /// Requested document id.
        id: String,
    },

    /// The caller may not read this document or collection.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The document exists but does not decode into the expected shape.
    #[error("decoding failed: {0}")]
    DecodingFailed(String),

    /// A cursor was presented to a query shape it was not issued for.
    #[error("cursor issued for query shape {issued_for:?} used with {used_with:?}")]
    CursorMismatch {
        /// Shape the cursor belongs to.
        issued_for: String,
        /// Shape of the query it was passed to.
        used_with: String,
    },

    /// Anything else.
    #[error("unknown store error: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Whether this error only concerns a single record.
    ///
    /// Per-item errors discard the record being hydrated; everything else
    /// counts as a lookup fault.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::PermissionDenied(_) | Self::DecodingFailed(_)
        )
    }
}

/// Errors surfaced by a `Pager` to its screen.
///
/// When one of these is returned the list and cursor are exactly what they
/// were before the attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The page fetch itself failed.
    #[error("page fetch failed: {0}")]
    Store(#[from] StoreError),

    /// Most records of the page could not be hydrated.
    #[error("hydration failed for {failed} of {total} records")]
    HydrationFailed {
        /// Records whose lookups faulted.
        failed: usize,
        /// Records returned by the page.
        total: usize,
    },

    /// The stored cursor does not belong to the pager's query shape.
    #[error("cursor does not belong to query shape {0:?}")]
    CursorMismatch(String),
}

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    ZeroPageSize,

    /// Page size above the supported maximum.
    #[error("page size {requested} exceeds maximum {max}")]
    PageSizeTooLarge {
        /// Requested page size.
        requested: usize,
        /// Largest accepted page size.
        max: usize,
    },

    /// Concurrent lookup bound must be at least one.
    #[error("concurrent lookup bound must be at least 1")]
    ZeroConcurrency,
}

/// Mutation service errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The store rejected or failed the write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The write was refused because of its content.
    #[error("invalid mutation: {0}")]
    Invalid(String),
}
