//! Pagination controller
//!
//! A `Pager` owns one list: it fetches pages from the store, hydrates them,
//! and commits the displayable items. One pager per list-producing screen.
//!
//! At most one fetch runs per pager. A call made while a fetch is in flight,
//! or after the list is exhausted, returns [`PageOutcome::Skipped`] without
//! touching the store. A fetch gathers every hydration result first and then
//! commits under a single write lock, so a failed attempt leaves the list and
//! cursor exactly as they were.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::PagerConfig;
use super::state::{ListView, PaginationState};
use crate::core::{PageError, PagedStore};
use crate::hydrate::{Hydrator, hydrate_page};
use crate::store::{Cursor, Query};

/// Why a load was not performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is in flight.
    InFlight,
    /// The list is exhausted.
    Exhausted,
    /// The pager was dropped before the fetch committed.
    Dropped,
}

/// Result of a load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page was fetched and committed.
    Loaded {
        /// Items appended to the list.
        added: usize,
        /// Records dropped as undisplayable.
        discarded: usize,
        /// Whether this page ended the list.
        exhausted: bool,
    },
    /// Nothing was done.
    Skipped(SkipReason),
}

impl PageOutcome {
    /// Whether a page was committed.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    Next,
    Refresh,
}

/// Clears the in-flight flag when dropped.
struct FetchGuard {
    flag: Arc<AtomicBool>,
}

impl FetchGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Everything needed to fetch and hydrate a page, detached from the state.
struct Fetcher<H> {
    store: Arc<dyn PagedStore>,
    hydrator: Arc<H>,
    query: Query,
    config: PagerConfig,
    shape: String,
}

impl<H> Clone for Fetcher<H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hydrator: Arc::clone(&self.hydrator),
            query: self.query.clone(),
            config: self.config.clone(),
            shape: self.shape.clone(),
        }
    }
}

/// A hydrated page ready to commit.
struct Loaded<T> {
    items: Vec<T>,
    raw: usize,
    discarded: usize,
    next_cursor: Option<Cursor>,
}

impl<H: Hydrator> Fetcher<H> {
    async fn fetch(&self, cursor: Option<&Cursor>) -> Result<Loaded<H::Item>, PageError> {
        if let Some(cursor) = cursor {
            if !cursor.belongs_to(&self.shape) {
                return Err(PageError::CursorMismatch(self.shape.clone()));
            }
        }

        let page = self
            .store
            .fetch_page(&self.query, self.config.page_size, cursor)
            .await?;
        let next_cursor = page.next_cursor;

        let batch = hydrate_page(&self.hydrator, page.records, self.config.lookup_limit()).await;
        if batch.mostly_failed() {
            return Err(PageError::HydrationFailed {
                failed: batch.failed,
                total: batch.total,
            });
        }

        Ok(Loaded {
            raw: batch.total,
            discarded: batch.discarded,
            items: batch.items,
            next_cursor,
        })
    }
}

struct Shared<H: Hydrator> {
    fetcher: Fetcher<H>,
    fetching: Arc<AtomicBool>,
    state: RwLock<PaginationState<H::Item>>,
}

/// Pagination controller for one list.
///
/// Cloning yields another handle to the same list.
///
/// # Example
///
/// ```ignore
/// let pager = Pager::new(store, PostHydrator::new(lookup), query, PagerConfig::default());
/// pager.load_more().await?;
/// let view = pager.view().await;
/// ```
pub struct Pager<H: Hydrator> {
    shared: Arc<Shared<H>>,
}

impl<H: Hydrator> Clone for Pager<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<H: Hydrator> Pager<H> {
    /// Create a pager over `query`.
    ///
    /// The configuration is used as given; build it through
    /// [`PagerConfigBuilder`](super::PagerConfigBuilder) to validate it.
    pub fn new(store: Arc<dyn PagedStore>, hydrator: H, query: Query, config: PagerConfig) -> Self {
        let shape = query.shape(config.page_size);
        Self {
            shared: Arc::new(Shared {
                fetcher: Fetcher {
                    store,
                    hydrator: Arc::new(hydrator),
                    query,
                    config,
                    shape,
                },
                fetching: Arc::new(AtomicBool::new(false)),
                state: RwLock::new(PaginationState::new()),
            }),
        }
    }

    /// Fetch, hydrate and append the next page.
    ///
    /// Skipped while another fetch is in flight or once the list is
    /// exhausted. On error the list and cursor are unchanged and the error is
    /// also kept for [`last_error`](Self::last_error).
    pub async fn request_next_page(&self) -> Result<PageOutcome, PageError> {
        load(Arc::downgrade(&self.shared), LoadMode::Next).await
    }

    /// Alias of [`request_next_page`](Self::request_next_page) for screens.
    pub async fn load_more(&self) -> Result<PageOutcome, PageError> {
        self.request_next_page().await
    }

    /// Replace the list with a fresh first page.
    ///
    /// Skipped while another fetch (or refresh) is in flight. The old list
    /// stays visible until the first page has been hydrated, and stays
    /// untouched if the refresh fails.
    pub async fn refresh(&self) -> Result<PageOutcome, PageError> {
        load(Arc::downgrade(&self.shared), LoadMode::Refresh).await
    }

    /// Load the next page in the background.
    ///
    /// The task only holds a weak reference to the list; if every handle is
    /// dropped before the page arrives, the result is discarded.
    pub fn spawn_load_more(&self) -> JoinHandle<Result<PageOutcome, PageError>> {
        let shared = Arc::downgrade(&self.shared);
        tokio::spawn(load(shared, LoadMode::Next))
    }

    /// Snapshot for the presentation layer.
    pub async fn view(&self) -> ListView<H::Item> {
        let state = self.shared.state.read().await;
        ListView {
            items: state.items().to_vec(),
            is_fetching: self.is_fetching(),
            exhausted: state.is_exhausted(),
            error: state.last_error().cloned(),
        }
    }

    /// Current items.
    pub async fn items(&self) -> Vec<H::Item> {
        self.shared.state.read().await.items().to_vec()
    }

    /// Number of items.
    pub async fn len(&self) -> usize {
        self.shared.state.read().await.len()
    }

    /// Whether the list is empty.
    pub async fn is_empty(&self) -> bool {
        self.shared.state.read().await.is_empty()
    }

    /// Whether a fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.shared.fetching.load(Ordering::Acquire)
    }

    /// Whether the list is exhausted.
    pub async fn is_exhausted(&self) -> bool {
        self.shared.state.read().await.is_exhausted()
    }

    /// Whether a `load_more` call would fetch right now.
    pub async fn can_load_more(&self) -> bool {
        !self.is_fetching() && !self.is_exhausted().await
    }

    /// Current continuation cursor.
    pub async fn cursor(&self) -> Option<Cursor> {
        self.shared.state.read().await.cursor().cloned()
    }

    /// Error of the last failed attempt.
    pub async fn last_error(&self) -> Option<PageError> {
        self.shared.state.read().await.last_error().cloned()
    }

    /// Remove an item after a successful delete elsewhere.
    pub async fn remove(&self, id: &str) -> Option<H::Item> {
        self.shared.state.write().await.remove(id)
    }

    /// Append an item created elsewhere. Returns `false` if already listed.
    pub async fn append(&self, item: H::Item) -> bool {
        self.shared.state.write().await.append_unique([item]) == 1
    }

    /// Insert an item created elsewhere at the top. Returns `false` if
    /// already listed.
    pub async fn prepend(&self, item: H::Item) -> bool {
        self.shared.state.write().await.prepend(item)
    }

    /// The query this list pages through.
    pub fn query(&self) -> &Query {
        &self.shared.fetcher.query
    }

    /// The configuration in use.
    pub fn config(&self) -> &PagerConfig {
        &self.shared.fetcher.config
    }

    /// Shared hydrator.
    pub fn hydrator(&self) -> &H {
        &self.shared.fetcher.hydrator
    }
}

async fn load<H: Hydrator>(shared: Weak<Shared<H>>, mode: LoadMode) -> Result<PageOutcome, PageError> {
    let (fetcher, guard, cursor) = {
        let Some(strong) = shared.upgrade() else {
            return Ok(PageOutcome::Skipped(SkipReason::Dropped));
        };
        let Some(guard) = FetchGuard::acquire(&strong.fetching) else {
            debug!(kind = strong.fetcher.hydrator.kind(), "fetch already in flight");
            return Ok(PageOutcome::Skipped(SkipReason::InFlight));
        };
        let cursor = match mode {
            LoadMode::Refresh => None,
            LoadMode::Next => {
                let state = strong.state.read().await;
                if state.is_exhausted() {
                    return Ok(PageOutcome::Skipped(SkipReason::Exhausted));
                }
                state.cursor().cloned()
            }
        };
        (strong.fetcher.clone(), guard, cursor)
    };

    let kind = fetcher.hydrator.kind();
    debug!(kind, ?mode, has_cursor = cursor.is_some(), "fetching page");
    let result = fetcher.fetch(cursor.as_ref()).await;

    let Some(strong) = shared.upgrade() else {
        debug!(kind, "list dropped before commit");
        return Ok(PageOutcome::Skipped(SkipReason::Dropped));
    };
    let mut state = strong.state.write().await;

    let outcome = match result {
        Err(err) => {
            warn!(kind, error = %err, "page load failed");
            state.record_error(err.clone());
            Err(err)
        }
        Ok(loaded) => {
            let exhausted = fetcher.config.is_last_page(
                loaded.raw,
                loaded.items.len(),
                loaded.next_cursor.is_some(),
            );
            if mode == LoadMode::Refresh {
                state.reset();
                info!(kind, "list refreshed");
            }
            let added = state.append_unique(loaded.items);
            state.advance(loaded.next_cursor, exhausted);
            debug!(kind, added, discarded = loaded.discarded, exhausted, "page committed");
            Ok(PageOutcome::Loaded {
                added,
                discarded: loaded.discarded,
                exhausted,
            })
        }
    };

    drop(state);
    drop(guard);
    outcome
}
