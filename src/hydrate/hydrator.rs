//! Hydrator contract
//!
//! A hydrator turns one reference record into a displayable item by resolving
//! its foreign keys with point lookups. Keys are either *required* (a missing
//! entity discards the record) or *optional* enrichment (a missing entity
//! leaves the field empty).

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::{Entity, Identified, PagedStore, StoreError};
use crate::store::Document;

/// Why a record was dropped instead of displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// A required lookup (or the record itself) was missing, denied or
    /// malformed.
    Lookup(StoreError),
    /// The record's keys match no known variant.
    TaxonomyViolation,
    /// The record is valid but must not be shown on this list.
    Excluded(String),
}

/// Result of hydrating one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration<T> {
    /// Every required key resolved.
    Ready(T),
    /// The record is dropped for good.
    Discarded(DiscardReason),
    /// A lookup faulted (store unavailable, unknown error).
    Failed(StoreError),
}

impl<T> Hydration<T> {
    /// Classify the result of resolving required keys.
    ///
    /// Per-item errors discard the record; other errors are faults.
    pub fn from_result(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(item) => Self::Ready(item),
            Err(err) if err.is_per_item() => Self::Discarded(DiscardReason::Lookup(err)),
            Err(err) => Self::Failed(err),
        }
    }

    /// Whether the item is displayable.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Take the item, if ready.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(item) => Some(item),
            _ => None,
        }
    }
}

/// Per record kind hydration logic.
///
/// `decode` turns a page document into the reference record; the default
/// decodes with serde. `hydrate` performs the lookups. Lookups for one record
/// should run concurrently; the pager already runs records concurrently.
#[async_trait]
pub trait Hydrator: Send + Sync + 'static {
    /// Reference record read from a page.
    type Record: DeserializeOwned + Send + 'static;

    /// Displayable item.
    type Item: Identified + Clone + Send + Sync + 'static;

    /// Short name used in logs.
    fn kind(&self) -> &'static str;

    /// Decode a page document into a record.
    fn decode(&self, doc: &Document) -> Result<Self::Record, StoreError> {
        doc.decode()
    }

    /// Resolve the record's foreign keys.
    async fn hydrate(&self, record: Self::Record) -> Hydration<Self::Item>;
}

/// Typed point lookups against a store.
#[derive(Clone)]
pub struct Lookup {
    store: Arc<dyn PagedStore>,
}

impl Lookup {
    /// Wrap a store.
    pub fn new(store: Arc<dyn PagedStore>) -> Self {
        Self { store }
    }

    /// Fetch and decode an entity. Decoding failures surface as
    /// `StoreError::DecodingFailed`.
    pub async fn fetch<T: Entity>(&self, id: &str) -> Result<T, StoreError> {
        self.store.get_by_id(T::COLLECTION, id).await?.decode_entity()
    }

    /// Fetch an optional enrichment.
    ///
    /// Any failure, fault or not, yields `None`.
    pub async fn optional<T: Entity>(&self, id: Option<&str>) -> Option<T> {
        let id = id.filter(|id| !id.is_empty())?;
        match self.fetch::<T>(id).await {
            Ok(entity) => Some(entity),
            Err(err) => {
                debug!(collection = T::COLLECTION, id, error = %err, "optional lookup empty");
                None
            }
        }
    }

    /// Check whether a document exists.
    ///
    /// Not-found is `Ok(false)`; other errors propagate.
    pub async fn exists(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        match self.store.get_by_id(collection, id).await {
            Ok(_) => Ok(true),
            Err(StoreError::RecordNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup").finish_non_exhaustive()
    }
}
