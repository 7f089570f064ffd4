// SPDX-License-Identifier: LGPL-3.0-only
//! Name search over the displayed items.
//!
//! Three strategies of decreasing precision: prefix, ordered-subsequence
//! (fuzzy) and scored. All of them are case-insensitive and return every
//! item for an empty term.

mod algorithms;
mod cache;
mod index;

pub use algorithms::{
    fuzzy_search, is_sorted_by_name, score_match, scored_search, search_by_prefix, EXACT_SCORE,
    FUZZY_BASE_SCORE, FUZZY_RUN_BONUS, PREFIX_SCORE, SUBSTRING_SCORE, WORD_BOUNDARY_BONUS,
};
pub use cache::{SearchCache, SearchMode, DEFAULT_CACHE_CAPACITY};
pub use index::SearchIndex;
