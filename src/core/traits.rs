//! Core traits for trickfeed.
//!
//! These traits define the seams between the paging engine and the outside
//! world: the remote store, the typed entities read from it, and the items a
//! list exposes.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::StoreError;
use crate::store::{Cursor, Document, Page, Query};

/// Remote document store queried one page at a time.
///
/// Implementations must keep a stable order per query shape and only accept
/// cursors they issued for the same shape.
///
/// # Example
///
/// ```ignore
/// let page = store.fetch_page(&query, 10, None).await?;
/// let next = store.fetch_page(&query, 10, page.next_cursor.as_ref()).await?;
/// ```
#[async_trait]
pub trait PagedStore: Send + Sync + 'static {
    /// Fetch up to `page_size` documents matching `query`, continuing after
    /// `cursor` when given.
    async fn fetch_page(
        &self,
        query: &Query,
        page_size: usize,
        cursor: Option<&Cursor>,
    ) -> Result<Page, StoreError>;

    /// Point lookup of one document.
    ///
    /// Returns `StoreError::RecordNotFound` when the document does not exist.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Document, StoreError>;
}

/// A typed view over documents of one collection.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Collection the entity is stored in.
    const COLLECTION: &'static str;
}

/// Anything a list can deduplicate by id.
pub trait Identified {
    /// Stable identifier, unique within one list.
    fn id(&self) -> &str;
}
