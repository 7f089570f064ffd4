// SPDX-License-Identifier: LGPL-3.0-only
//! Explorer-style name ordering.
//!
//! Names compare case-insensitively and embedded digit runs compare by
//! numeric value, so `file2` sorts before `file10` and `a` equals `A`.

use std::cmp::Ordering;

/// Compare two names the way a file explorer orders them.
///
/// Digit runs of any length are compared by value, so no numeric overflow is
/// possible. Names differing only in case compare `Equal`; equal values with
/// different leading zeros still get a stable order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase())
}

/// Alphabetical comparison ignoring case but not treating digits specially.
pub fn case_insensitive_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
