// SPDX-License-Identifier: LGPL-3.0-only
use serde::{Deserialize, Serialize};

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Entry name.
    Name,
    /// Size in bytes.
    Size,
    /// Last modification time.
    Modified,
    /// File extension.
    Type,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// How names are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortAlgorithm {
    /// Case-insensitive with numeric runs compared by value.
    #[default]
    Natural,
    /// Case-insensitive, lowercase first on ties.
    Alphabetical,
    /// Ordinal comparison.
    CaseSensitive,
    /// Ordinal comparison of the lowercased names.
    CaseInsensitive,
}

/// One sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    /// Field compared.
    pub field: SortField,
    /// Ordering direction.
    pub direction: SortDirection,
    /// Name comparison; natural when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SortAlgorithm>,
}

impl SortCriteria {
    /// Criteria without an explicit algorithm.
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            field,
            direction,
            algorithm: None,
        }
    }

    /// Set the name comparison algorithm.
    pub const fn with_algorithm(mut self, algorithm: SortAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

impl Default for SortCriteria {
    fn default() -> Self {
        Self::new(SortField::Name, SortDirection::Asc).with_algorithm(SortAlgorithm::Natural)
    }
}

/// Criteria stored for a folder, or the global default when `is_global`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortPreference {
    /// Stable identifier.
    pub id: String,
    /// Normalized folder path; empty for the global default.
    pub folder_path: String,
    /// Primary criteria.
    pub primary: SortCriteria,
    /// Tie-breaking criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SortCriteria>,
    /// Whether this is the global default.
    #[serde(default)]
    pub is_global: bool,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub date_created: u64,
    /// Last change, epoch milliseconds.
    #[serde(default)]
    pub date_modified: u64,
}

/// A named, reusable pair of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortProfile {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary criteria.
    pub primary: SortCriteria,
    /// Tie-breaking criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SortCriteria>,
    /// Built-in profiles cannot be changed or deleted.
    #[serde(default)]
    pub is_built_in: bool,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub date_created: u64,
}

/// Changes applied by [crate::sort_preferences::SortPreferenceStore::update_profile].
///
/// `None` fields are left untouched. `secondary: Some(None)` removes the
/// secondary criteria.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New primary criteria.
    pub primary: Option<SortCriteria>,
    /// New secondary criteria.
    pub secondary: Option<Option<SortCriteria>>,
}

/// Usage figures over the stored preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStats {
    /// Folder-specific preferences (the global default is not counted).
    pub total_folder_preferences: usize,
    /// User-created profiles.
    pub custom_profiles: usize,
    /// Built-in profiles.
    pub built_in_profiles: usize,
    /// Primary field used by most folder preferences.
    pub most_used_field: Option<SortField>,
    /// Primary algorithm used by most folder preferences.
    pub most_used_algorithm: Option<SortAlgorithm>,
}
