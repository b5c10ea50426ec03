//! Pagination state
//!
//! The list a screen shows, the cursor to continue it, and whether it is
//! finished. Items are unique by id and kept in arrival order.

use std::collections::HashSet;

use crate::core::{Identified, PageError};
use crate::store::Cursor;

/// Committed state of one list.
#[derive(Debug, Clone)]
pub struct PaginationState<T> {
    items: Vec<T>,
    ids: HashSet<String>,
    cursor: Option<Cursor>,
    exhausted: bool,
    last_error: Option<PageError>,
}

impl<T> Default for PaginationState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            cursor: None,
            exhausted: false,
            last_error: None,
        }
    }
}

impl<T: Identified> PaginationState<T> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Continuation cursor.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether no further page will be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Error of the last failed attempt, cleared by the next success.
    pub fn last_error(&self) -> Option<&PageError> {
        self.last_error.as_ref()
    }

    /// Whether an item with this id is listed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Append items whose ids are not listed yet; returns how many were added.
    ///
    /// The first arrival of an id wins; later ones are ignored, not merged.
    pub fn append_unique(&mut self, batch: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        for item in batch {
            if self.ids.insert(item.id().to_string()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Insert at the front unless already listed.
    pub fn prepend(&mut self, item: T) -> bool {
        if !self.ids.insert(item.id().to_string()) {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    /// Remove an item by id. Cursor and exhaustion are untouched.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        if !self.ids.remove(id) {
            return None;
        }
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Record a successful page.
    pub fn advance(&mut self, cursor: Option<Cursor>, exhausted: bool) {
        self.cursor = cursor;
        self.exhausted = exhausted;
        self.last_error = None;
    }

    /// Record a failed attempt without touching items or cursor.
    pub fn record_error(&mut self, err: PageError) {
        self.last_error = Some(err);
    }

    /// Drop everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Snapshot exposed to the presentation layer.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    /// Displayable items in arrival order.
    pub items: Vec<T>,
    /// A fetch is in flight.
    pub is_fetching: bool,
    /// No further page will be fetched.
    pub exhausted: bool,
    /// Last failure, for a "try again" affordance.
    pub error: Option<PageError>,
}
