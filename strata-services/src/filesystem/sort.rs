// SPDX-License-Identifier: LGPL-3.0-only
//! Applying sort criteria to a directory listing.

use crate::filesystem::entry::FileSystemItem;
use crate::filesystem::natural::{case_insensitive_cmp, natural_cmp};
use crate::sort_preferences::{SortAlgorithm, SortCriteria, SortDirection, SortField, SortPreference};
use std::cmp::Ordering;

/// Compare two names using a sort algorithm.
pub fn compare_names(a: &str, b: &str, algorithm: SortAlgorithm) -> Ordering {
    match algorithm {
        SortAlgorithm::Natural => natural_cmp(a, b),
        SortAlgorithm::CaseInsensitive => case_insensitive_cmp(a, b),
        SortAlgorithm::CaseSensitive => a.cmp(b),
        // Case only breaks ties; lowercase sorts first, like `localeCompare`.
        SortAlgorithm::Alphabetical => case_insensitive_cmp(a, b).then_with(|| b.cmp(a)),
    }
}

/// Compare two items by a single criterion, honouring its direction.
pub fn compare_by(a: &FileSystemItem, b: &FileSystemItem, criteria: &SortCriteria) -> Ordering {
    let algorithm = criteria.algorithm.unwrap_or_default();
    let ordering = match criteria.field {
        SortField::Name => compare_names(&a.name, &b.name, algorithm),
        SortField::Size => a.size.cmp(&b.size),
        SortField::Modified => a.modified.cmp(&b.modified),
        SortField::Type => compare_names(a.type_key(), b.type_key(), algorithm),
    };
    match criteria.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort `items` in place by a primary and optional secondary criterion.
///
/// With `folders_first`, directories precede files regardless of direction.
/// The sort is stable: items equal under every criterion keep their order.
pub fn sort_items(
    items: &mut [FileSystemItem],
    primary: &SortCriteria,
    secondary: Option<&SortCriteria>,
    folders_first: bool,
) {
    items.sort_by(|a, b| {
        let folders = if folders_first {
            b.is_dir().cmp(&a.is_dir())
        } else {
            Ordering::Equal
        };
        folders
            .then_with(|| compare_by(a, b, primary))
            .then_with(|| secondary.map_or(Ordering::Equal, |s| compare_by(a, b, s)))
    });
}

/// Sort `items` in place with a stored preference.
pub fn sort_with_preference(items: &mut [FileSystemItem], preference: &SortPreference, folders_first: bool) {
    sort_items(items, &preference.primary, preference.secondary.as_ref(), folders_first);
}
