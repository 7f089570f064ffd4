// SPDX-License-Identifier: LGPL-3.0-only
use crate::filesystem::entry::Named;
use crate::filesystem::natural::case_insensitive_cmp;
use std::cmp::Ordering;

/// Score of a name equal to the term.
pub const EXACT_SCORE: u32 = 1000;
/// Score of a name starting with the term.
pub const PREFIX_SCORE: u32 = 500;
/// Score of a name containing the term.
pub const SUBSTRING_SCORE: u32 = 100;
/// Bonus when a word inside the name starts with the term.
pub const WORD_BOUNDARY_BONUS: u32 = 200;
/// Base score of an ordered-subsequence match.
pub const FUZZY_BASE_SCORE: u32 = 10;
/// Fuzzy bonus per character of the longest consecutive run.
pub const FUZZY_RUN_BONUS: u32 = 5;

/// Whether `items` are in ascending case-insensitive name order.
pub fn is_sorted_by_name<T: Named>(items: &[T]) -> bool {
    items
        .windows(2)
        .all(|pair| case_insensitive_cmp(pair[0].name(), pair[1].name()) != Ordering::Greater)
}

/// Items whose name starts with `term`.
///
/// Sorted input is searched with a binary search for the first match followed
/// by a scan of the contiguous run. Unsorted input degrades to a linear scan
/// for names containing `term`. Either way the original order is kept.
pub fn search_by_prefix<T: Named + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return items.to_vec();
    }
    let term = term.to_lowercase();

    if !is_sorted_by_name(items) {
        return items
            .iter()
            .filter(|item| item.name().to_lowercase().contains(&term))
            .cloned()
            .collect();
    }

    let start = lower_bound(items, &term, 0, items.len());
    items[start..]
        .iter()
        .take_while(|item| item.name().to_lowercase().starts_with(&term))
        .cloned()
        .collect()
}

/// First index in `items[low..high]` whose name is not less than `term`.
fn lower_bound<T: Named>(items: &[T], term: &str, low: usize, high: usize) -> usize {
    if low >= high {
        return low;
    }
    let mid = low + (high - low) / 2;
    if case_insensitive_cmp(items[mid].name(), term) == Ordering::Less {
        lower_bound(items, term, mid + 1, high)
    } else {
        lower_bound(items, term, low, mid)
    }
}

/// Items whose name contains every character of `term` in order.
pub fn fuzzy_search<T: Named + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return items.to_vec();
    }
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|item| longest_subsequence_run(&item.name().to_lowercase(), &term).is_some())
        .cloned()
        .collect()
}

/// Items ranked by match quality, best first.
///
/// Non-matching items are dropped. Equal scores keep their original order.
pub fn scored_search<T: Named + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return items.to_vec();
    }
    let term = term.to_lowercase();

    let mut scored: Vec<(u32, &T)> = items
        .iter()
        .map(|item| (score_lowercase(&item.name().to_lowercase(), &term), item))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Score `name` against `term`, case-insensitively. Zero means no match.
pub fn score_match(name: &str, term: &str) -> u32 {
    score_lowercase(&name.to_lowercase(), &term.to_lowercase())
}

fn score_lowercase(name: &str, term: &str) -> u32 {
    if term.is_empty() {
        return 0;
    }
    if name == term {
        return EXACT_SCORE;
    }
    if name.starts_with(term) {
        return PREFIX_SCORE;
    }
    if name.contains(term) {
        let bonus = if has_word_starting_with(name, term) {
            WORD_BOUNDARY_BONUS
        } else {
            0
        };
        return SUBSTRING_SCORE + bonus;
    }
    match longest_subsequence_run(name, term) {
        Some(run) => FUZZY_BASE_SCORE + FUZZY_RUN_BONUS * run as u32,
        None => 0,
    }
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

fn has_word_starting_with(name: &str, term: &str) -> bool {
    name.char_indices()
        .filter(|(_, c)| is_word_separator(*c))
        .any(|(i, c)| name[i + c.len_utf8()..].starts_with(term))
}

/// Greedy in-order match of `term` inside `name`. Returns the longest run of
/// adjacent matched characters, or `None` when `term` is not a subsequence.
fn longest_subsequence_run(name: &str, term: &str) -> Option<usize> {
    let mut wanted = term.chars().peekable();
    let mut last_match: Option<usize> = None;
    let mut run = 0;
    let mut longest = 0;

    for (index, c) in name.chars().enumerate() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if c != next {
            continue;
        }
        wanted.next();
        run = match last_match {
            Some(previous) if previous + 1 == index => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last_match = Some(index);
    }

    if wanted.peek().is_none() {
        Some(longest)
    } else {
        None
    }
}
