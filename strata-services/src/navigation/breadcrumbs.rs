// SPDX-License-Identifier: LGPL-3.0-only
use serde::{Deserialize, Serialize};

/// One segment of a path bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Label shown for the segment.
    pub name: String,
    /// Path the segment navigates to.
    pub path: String,
}

impl Breadcrumb {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_drive(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}

/// Split `path` into segments from the root down.
///
/// A leading drive (`C:`) stays one segment whose path is the drive root, a
/// leading separator becomes its own root segment, and the separator style of
/// the input is kept in the generated paths.
pub fn generate_breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let separator = if path.contains('\\') { '\\' } else { '/' };
    let segments: Vec<&str> = path.split(is_separator).filter(|s| !s.is_empty()).collect();

    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    let mut current = String::new();
    let mut rest = segments.as_slice();

    if let Some((first, tail)) = segments.split_first().filter(|(first, _)| is_drive(first)) {
        current.push_str(first);
        current.push(separator);
        crumbs.push(Breadcrumb::new(first, &current));
        rest = tail;
    } else if path.starts_with(is_separator) {
        current.push(separator);
        crumbs.push(Breadcrumb::new(&current, &current));
    }

    for segment in rest {
        if !current.is_empty() && !current.ends_with(separator) {
            current.push(separator);
        }
        current.push_str(segment);
        crumbs.push(Breadcrumb::new(segment, &current));
    }

    crumbs
}
