//! Concurrent hydration of one page.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::hydrator::{DiscardReason, Hydration, Hydrator};
use crate::store::Document;

/// Hydration results of one page, in store order.
#[derive(Debug, Clone)]
pub struct HydratedBatch<T> {
    /// Displayable items, store order, discards removed.
    pub items: Vec<T>,
    /// Records returned by the store.
    pub total: usize,
    /// Records dropped as undisplayable.
    pub discarded: usize,
    /// Records whose lookups faulted.
    pub failed: usize,
}

impl<T> HydratedBatch<T> {
    /// Whether more than half of the records faulted.
    pub fn mostly_failed(&self) -> bool {
        self.total > 0 && self.failed * 2 > self.total
    }
}

/// Hydrate every document of a page concurrently.
///
/// At most `max_concurrent` records are hydrated at once. Results are
/// gathered before anything is returned, so callers commit a whole batch or
/// nothing. Documents that do not decode are discarded without a lookup.
pub async fn hydrate_page<H: Hydrator>(
    hydrator: &Arc<H>,
    docs: Vec<Document>,
    max_concurrent: usize,
) -> HydratedBatch<H::Item> {
    let total = docs.len();
    let mut slots: Vec<Option<Hydration<H::Item>>> = (0..total).map(|_| None).collect();
    let permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for (index, doc) in docs.into_iter().enumerate() {
        let record = match hydrator.decode(&doc) {
            Ok(record) => record,
            Err(err) => {
                slots[index] = Some(Hydration::Discarded(DiscardReason::Lookup(err)));
                continue;
            }
        };

        let hydrator = Arc::clone(hydrator);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = permits.acquire_owned().await.ok();
            (index, hydrator.hydrate(record).await)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, hydration)) => slots[index] = Some(hydration),
            Err(err) => warn!(kind = hydrator.kind(), error = %err, "hydration task aborted"),
        }
    }

    let mut items = Vec::with_capacity(total);
    let mut discarded = 0;
    let mut failed = 0;
    for slot in slots {
        match slot {
            Some(Hydration::Ready(item)) => items.push(item),
            Some(Hydration::Discarded(reason)) => {
                discarded += 1;
                debug!(kind = hydrator.kind(), ?reason, "record discarded");
            }
            Some(Hydration::Failed(err)) => {
                failed += 1;
                warn!(kind = hydrator.kind(), error = %err, "record lookup failed");
            }
            // Task panicked; already logged.
            None => failed += 1,
        }
    }

    HydratedBatch {
        items,
        total,
        discarded,
        failed,
    }
}
