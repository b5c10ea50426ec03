//! In-memory document store.
//!
//! `MemoryStore` implements [`PagedStore`] over plain maps. Cursors are
//! offsets into the filtered, ordered result set, bound to the query shape
//! that produced them. The store also carries fault injection hooks so each
//! test can build its own fake instead of sharing global state.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::document::Document;
use super::query::{Cursor, Page, Query};
use crate::core::{PagedStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, Document>>,
    page_faults: VecDeque<StoreError>,
    denied_collections: Vec<String>,
    lookup_faults: HashMap<(String, String), StoreError>,
}

/// In-memory [`PagedStore`].
///
/// # Example
///
/// ```ignore
/// let store = MemoryStore::new();
/// store.insert("users", Document::new("u1").with_field("username", "tony"));
/// let doc = store.get_by_id("users", "u1").await?;
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    gate: watch::Sender<bool>,
    page_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            inner: Mutex::new(Inner::default()),
            gate,
            page_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a document.
    pub fn insert(&self, collection: &str, doc: Document) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id.clone(), doc);
    }

    /// Serialize a value and store it under `id`.
    pub fn insert_serialized<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let doc = Document::from_serialize(id, value)?;
        self.insert(collection, doc);
        Ok(())
    }

    /// Remove a document, returning it if it existed.
    pub fn remove(&self, collection: &str, id: &str) -> Option<Document> {
        self.lock()
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
    }

    /// Read a document without going through the async store API.
    pub fn peek(&self, collection: &str, id: &str) -> Option<Document> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.lock().collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Make the next page fetch fail with `err`. Faults queue up.
    pub fn fail_next_page(&self, err: StoreError) {
        self.lock().page_faults.push_back(err);
    }

    /// Refuse every page fetch against a collection.
    pub fn deny_collection(&self, collection: &str) {
        self.lock().denied_collections.push(collection.to_string());
    }

    /// Make every lookup of one document fail with `err`.
    pub fn fail_lookup(&self, collection: &str, id: &str, err: StoreError) {
        self.lock()
            .lookup_faults
            .insert((collection.to_string(), id.to_string()), err);
    }

    /// Refuse lookups of one document.
    pub fn deny_lookup(&self, collection: &str, id: &str) {
        self.fail_lookup(
            collection,
            id,
            StoreError::PermissionDenied(format!("{collection}/{id}")),
        );
    }

    /// Hold every page fetch until [`resume_pages`](Self::resume_pages).
    pub fn pause_pages(&self) {
        self.gate.send_replace(false);
    }

    /// Release held page fetches.
    pub fn resume_pages(&self) {
        self.gate.send_replace(true);
    }

    /// Page fetches started so far.
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Point lookups started so far.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    fn read_page(
        &self,
        query: &Query,
        page_size: usize,
        cursor: Option<&Cursor>,
    ) -> Result<Page, StoreError> {
        let mut inner = self.lock();

        if let Some(err) = inner.page_faults.pop_front() {
            return Err(err);
        }
        if inner.denied_collections.iter().any(|c| c == query.collection()) {
            return Err(StoreError::PermissionDenied(query.collection().to_string()));
        }

        let shape = query.shape(page_size);
        let offset = match cursor {
            Some(cursor) if !cursor.belongs_to(&shape) => {
                return Err(StoreError::CursorMismatch {
                    issued_for: cursor.shape().to_string(),
                    used_with: shape,
                });
            }
            Some(cursor) => cursor.token().parse::<usize>().map_err(|_| {
                StoreError::DecodingFailed(format!("bad cursor token {:?}", cursor.token()))
            })?,
            None => 0,
        };

        let mut matching: Vec<&Document> = inner
            .collections
            .get(query.collection())
            .map(|docs| docs.values().filter(|d| query.matches(d)).collect())
            .unwrap_or_default();
        matching.sort_by(|a, b| query.compare(a, b));

        let records: Vec<Document> = matching
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        let next_cursor = if records.is_empty() {
            None
        } else {
            Some(Cursor::new(shape, (offset + records.len()).to_string()))
        };

        Ok(Page {
            records,
            next_cursor,
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PagedStore for MemoryStore {
    async fn fetch_page(
        &self,
        query: &Query,
        page_size: usize,
        cursor: Option<&Cursor>,
    ) -> Result<Page, StoreError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        let mut gate = self.gate.subscribe();
        gate.wait_for(|open| *open)
            .await
            .map_err(|e| StoreError::Unknown(e.to_string()))?;

        self.read_page(query, page_size, cursor)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        let inner = self.lock();
        if let Some(err) = inner
            .lookup_faults
            .get(&(collection.to_string(), id.to_string()))
        {
            return Err(err.clone());
        }
        inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..n {
            store.insert(
                "posts",
                Document::new(format!("p{i:02}")).with_field("created_at", i as i64),
            );
        }
        store
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.records.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_pages_follow_cursor() {
        let store = seeded(5);
        let q = Query::new("posts").order_by_desc("created_at");

        let first = store.fetch_page(&q, 2, None).await.unwrap();
        assert_eq!(ids(&first), vec!["p04", "p03"]);

        let second = store
            .fetch_page(&q, 2, first.next_cursor.as_ref())
            .await
            .unwrap();
        assert_eq!(ids(&second), vec!["p02", "p01"]);

        let third = store
            .fetch_page(&q, 2, second.next_cursor.as_ref())
            .await
            .unwrap();
        assert_eq!(ids(&third), vec!["p00"]);
        assert!(third.next_cursor.is_some());

        let fourth = store
            .fetch_page(&q, 2, third.next_cursor.as_ref())
            .await
            .unwrap();
        assert!(fourth.is_empty());
        assert!(fourth.next_cursor.is_none());
        assert_eq!(store.page_calls(), 4);
    }

    #[tokio::test]
    async fn test_cursor_rejected_for_other_shape() {
        let store = seeded(3);
        let a = Query::new("posts").order_by_desc("created_at");
        let b = Query::new("posts").order_by("created_at");

        let page = store.fetch_page(&a, 2, None).await.unwrap();
        let result = store.fetch_page(&b, 2, page.next_cursor.as_ref()).await;
        assert!(matches!(result, Err(StoreError::CursorMismatch { .. })));

        // Same query, different page size is a different shape too.
        let result = store.fetch_page(&a, 3, page.next_cursor.as_ref()).await;
        assert!(matches!(result, Err(StoreError::CursorMismatch { .. })));
    }

    #[tokio::test]
    async fn test_page_faults_are_consumed_in_order() {
        let store = seeded(1);
        let q = Query::new("posts");
        store.fail_next_page(StoreError::StoreUnavailable("offline".into()));

        let result = store.fetch_page(&q, 10, None).await;
        assert!(matches!(result, Err(StoreError::StoreUnavailable(_))));

        let page = store.fetch_page(&q, 10, None).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_denied_collection() {
        let store = seeded(1);
        store.deny_collection("posts");
        let result = store.fetch_page(&Query::new("posts"), 10, None).await;
        assert!(matches!(result, Err(StoreError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_lookup() {
        let store = seeded(2);

        let doc = store.get_by_id("posts", "p01").await.unwrap();
        assert_eq!(doc.id, "p01");

        let missing = store.get_by_id("posts", "nope").await;
        assert!(matches!(missing, Err(StoreError::RecordNotFound { .. })));

        store.deny_lookup("posts", "p00");
        let denied = store.get_by_id("posts", "p00").await;
        assert!(matches!(denied, Err(StoreError::PermissionDenied(_))));

        assert_eq!(store.lookup_calls(), 3);
    }

    #[tokio::test]
    async fn test_remove_and_count() {
        let store = seeded(3);
        assert_eq!(store.count("posts"), 3);
        assert!(store.remove("posts", "p01").is_some());
        assert!(store.remove("posts", "p01").is_none());
        assert_eq!(store.count("posts"), 2);
        assert_eq!(store.count("nothing"), 0);
    }

    #[tokio::test]
    async fn test_paused_pages_wait_for_resume() {
        let store = std::sync::Arc::new(seeded(1));
        store.pause_pages();

        let task_store = store.clone();
        let handle = tokio::spawn(async move {
            task_store
                .fetch_page(&Query::new("posts"), 10, None)
                .await
        });

        while store.page_calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!handle.is_finished());

        store.resume_pages();
        let page = handle.await.unwrap().unwrap();
        assert_eq!(page.len(), 1);
    }
}
