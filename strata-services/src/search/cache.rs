// SPDX-License-Identifier: LGPL-3.0-only
use indexmap::IndexMap;

/// Default number of cached result sets.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Matching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Names starting with the term.
    Prefix,
    /// Names containing the term's characters in order.
    Fuzzy,
    /// Every match, ranked by quality.
    #[default]
    Scored,
}

/// Bounded result cache evicting the oldest insertion first.
///
/// Lookups do not refresh an entry's position, so this is FIFO rather than LRU.
#[derive(Debug, Clone)]
pub struct SearchCache<T> {
    capacity: usize,
    entries: IndexMap<(SearchMode, String), Vec<T>>,
}

impl<T: Clone> SearchCache<T> {
    /// Create a cache holding at most `capacity` result sets.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Cached results for `term` in `mode`.
    pub fn get(&self, mode: SearchMode, term: &str) -> Option<&Vec<T>> {
        self.entries.get(&(mode, term.to_lowercase()))
    }

    /// Store results, evicting the oldest entry when full.
    ///
    /// Replacing an existing key keeps its position.
    pub fn insert(&mut self, mode: SearchMode, term: &str, results: Vec<T>) {
        if self.capacity == 0 {
            return;
        }
        let key = (mode, term.to_lowercase());
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = results;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, results);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached result sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of result sets.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> Default for SearchCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
