// SPDX-License-Identifier: LGPL-3.0-only
use super::algorithms::{fuzzy_search, scored_search, search_by_prefix};
use super::cache::{SearchCache, SearchMode, DEFAULT_CACHE_CAPACITY};
use crate::filesystem::entry::Named;
use std::cell::RefCell;
use std::time::Duration;
use strata_core::tasks::{Debouncer, DEFAULT_QUIET_PERIOD};

/// Searchable snapshot of the displayed items.
///
/// Results are cached per term and mode until the items change.
pub struct SearchIndex<T: Named + Clone> {
    items: Vec<T>,
    cache: RefCell<SearchCache<T>>,
    debouncer: Debouncer,
}

impl<T: Named + Clone> SearchIndex<T> {
    /// Index `items` with the default cache capacity and quiet period.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_settings(items, DEFAULT_CACHE_CAPACITY, DEFAULT_QUIET_PERIOD)
    }

    /// Index `items` with an explicit cache capacity and debounce quiet period.
    pub fn with_settings(items: Vec<T>, cache_capacity: usize, quiet: Duration) -> Self {
        Self {
            items,
            cache: RefCell::new(SearchCache::new(cache_capacity)),
            debouncer: Debouncer::new(quiet),
        }
    }

    /// The indexed items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the indexed items and drop cached results.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.cache.get_mut().clear();
    }

    /// Run a search, serving repeated terms from the cache.
    pub fn search(&self, term: &str, mode: SearchMode) -> Vec<T> {
        if term.is_empty() {
            return self.items.clone();
        }
        if let Some(hit) = self.cache.borrow().get(mode, term) {
            return hit.clone();
        }

        let results = match mode {
            SearchMode::Prefix => search_by_prefix(&self.items, term),
            SearchMode::Fuzzy => fuzzy_search(&self.items, term),
            SearchMode::Scored => scored_search(&self.items, term),
        };
        self.cache.borrow_mut().insert(mode, term, results.clone());
        results
    }

    /// Search after the quiet period, for live typing.
    ///
    /// Resolves to `None` when a newer call arrived within the quiet period.
    pub async fn search_debounced(&self, term: &str, mode: SearchMode) -> Option<Vec<T>> {
        let term = term.to_string();
        self.debouncer
            .run(move || async move { self.search(&term, mode) })
            .await
    }

    /// Supersede any pending debounced search.
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }

    /// Number of cached result sets.
    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<T: Named + Clone> Default for SearchIndex<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
