// SPDX-License-Identifier: LGPL-3.0-only
//! Per-folder and global sort preferences with named profiles.
//!
//! Preferences are looked up by normalized folder path and fall back to the
//! single global default. Profiles bundle reusable criteria; the built-in
//! ones are immutable.

mod profiles;
mod store;
mod types;

pub use profiles::{built_in_profiles, is_built_in_id};
pub use store::{normalize_folder_path, SortPreferenceError, SortPreferenceStore, EXPORT_VERSION, STORAGE_KEY};
pub use types::{
    ProfileUpdate, SortAlgorithm, SortCriteria, SortDirection, SortField, SortPreference, SortProfile,
    SortStats,
};

pub(crate) use store::now_millis;
