// SPDX-License-Identifier: LGPL-3.0-only
//! Filesystem entry types and listing order.

pub mod entry;
pub mod natural;
pub mod sort;

pub use entry::{extension_of, FileSystemItem, ItemType, Named, Permissions};
pub use natural::{case_insensitive_cmp, natural_cmp};
pub use sort::{compare_by, compare_names, sort_items, sort_with_preference};
