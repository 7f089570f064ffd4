// SPDX-License-Identifier: LGPL-3.0-only
//! Profiles shipped with the store.

use super::types::{SortAlgorithm, SortCriteria, SortDirection, SortField, SortProfile};

fn built_in(
    id: &str,
    name: &str,
    description: &str,
    primary: SortCriteria,
    secondary: Option<SortCriteria>,
) -> SortProfile {
    SortProfile {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        primary,
        secondary,
        is_built_in: true,
        date_created: 0,
    }
}

/// The immutable built-in profiles, in display order.
pub fn built_in_profiles() -> Vec<SortProfile> {
    let by_name = SortCriteria::new(SortField::Name, SortDirection::Asc)
        .with_algorithm(SortAlgorithm::Natural);

    vec![
        built_in("default", "Default", "Name, A to Z", by_name, None),
        built_in(
            "alphabetical",
            "Alphabetical",
            "Name, strictly alphabetical",
            SortCriteria::new(SortField::Name, SortDirection::Asc)
                .with_algorithm(SortAlgorithm::Alphabetical),
            None,
        ),
        built_in(
            "newest-first",
            "Newest first",
            "Most recently modified first",
            SortCriteria::new(SortField::Modified, SortDirection::Desc),
            Some(by_name),
        ),
        built_in(
            "oldest-first",
            "Oldest first",
            "Least recently modified first",
            SortCriteria::new(SortField::Modified, SortDirection::Asc),
            Some(by_name),
        ),
        built_in(
            "largest-first",
            "Largest first",
            "Biggest files first",
            SortCriteria::new(SortField::Size, SortDirection::Desc),
            Some(by_name),
        ),
        built_in(
            "smallest-first",
            "Smallest first",
            "Smallest files first",
            SortCriteria::new(SortField::Size, SortDirection::Asc),
            Some(by_name),
        ),
        built_in(
            "by-type",
            "By type",
            "Grouped by extension, then name",
            SortCriteria::new(SortField::Type, SortDirection::Asc),
            Some(by_name),
        ),
    ]
}

/// Whether `id` names a built-in profile.
pub fn is_built_in_id(id: &str) -> bool {
    built_in_profiles().iter().any(|p| p.id == id)
}
