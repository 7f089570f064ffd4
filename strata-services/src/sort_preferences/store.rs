// SPDX-License-Identifier: LGPL-3.0-only
use super::profiles::{built_in_profiles, is_built_in_id};
use super::types::{ProfileUpdate, SortCriteria, SortPreference, SortProfile, SortStats};
use crate::filesystem::entry::FileSystemItem;
use crate::filesystem::sort::sort_with_preference;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::hash::Hash;
use std::time::{SystemTime, UNIX_EPOCH};
use strata_core::signal::{ListenerSet, Subscription};
use strata_core::storage::{KeyValueStore, MemoryStore, StorageError};
use thiserror::Error;

/// Storage key holding the preference document.
pub const STORAGE_KEY: &str = "strata.sort_preferences";

/// Version written into export envelopes.
pub const EXPORT_VERSION: &str = "1.0";

/// Errors raised by the sort preference store.
#[derive(Error, Debug)]
pub enum SortPreferenceError {
    /// A profile needs a non-blank name.
    #[error("Profile name must not be empty")]
    EmptyProfileName,

    /// Error serializing the preference document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from the storage backend.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Normalize a folder path for lookup: lowercase, forward slashes and no
/// trailing slash. The root `/` is kept as is.
pub fn normalize_folder_path(path: &str) -> String {
    let normalized = path.trim().to_lowercase().replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() && normalized.starts_with('/') {
        String::from("/")
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    preferences: Vec<SortPreference>,
    #[serde(default)]
    custom_profiles: Vec<SortProfile>,
    #[serde(default)]
    last_saved: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'a str,
    export_date: u64,
    preferences: &'a [SortPreference],
    custom_profiles: &'a [SortProfile],
    stats: SortStats,
}

#[derive(Debug, Clone)]
struct Entries {
    global: SortPreference,
    folders: IndexMap<String, SortPreference>,
    custom_profiles: Vec<SortProfile>,
}

impl Entries {
    fn defaults() -> Self {
        Self {
            global: default_global(),
            folders: IndexMap::new(),
            custom_profiles: Vec::new(),
        }
    }

    /// Build entries from a document, keeping `fallback_global` when the
    /// document has no global entry.
    fn from_document(
        preferences: Vec<SortPreference>,
        custom_profiles: Vec<SortProfile>,
        fallback_global: SortPreference,
    ) -> Self {
        let mut global = fallback_global;
        let mut folders = IndexMap::new();

        for mut preference in preferences {
            let key = normalize_folder_path(&preference.folder_path);
            if preference.is_global || key.is_empty() {
                preference.folder_path = String::new();
                preference.is_global = true;
                global = preference;
            } else {
                preference.folder_path = key.clone();
                preference.is_global = false;
                folders.insert(key, preference);
            }
        }

        let custom_profiles = custom_profiles
            .into_iter()
            .filter(|p| !p.is_built_in && !is_built_in_id(&p.id))
            .collect();

        Self {
            global,
            folders,
            custom_profiles,
        }
    }

    fn all_preferences(&self) -> Vec<SortPreference> {
        std::iter::once(self.global.clone())
            .chain(self.folders.values().cloned())
            .collect()
    }
}

fn default_global() -> SortPreference {
    SortPreference {
        id: String::from("global"),
        folder_path: String::new(),
        primary: SortCriteria::default(),
        secondary: None,
        is_global: true,
        date_created: 0,
        date_modified: 0,
    }
}

/// Durable per-folder and global sort criteria plus named profiles.
///
/// Every mutation is persisted through the storage backend and then reported
/// to change listeners with the full preference list, global default first.
/// Save failures are logged; the in-memory state stays authoritative.
pub struct SortPreferenceStore {
    storage: Box<dyn KeyValueStore>,
    entries: RefCell<Entries>,
    listeners: ListenerSet<Vec<SortPreference>>,
    next_id: Cell<u64>,
}

impl SortPreferenceStore {
    /// Load the store from `storage`, falling back to built-in defaults when
    /// nothing is stored or the stored document is unreadable.
    pub fn load(storage: impl KeyValueStore + 'static) -> Self {
        let entries = match storage.get(STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<StoredDocument>(&json) {
                Ok(doc) => {
                    log::debug!(
                        "Loaded {} sort preferences (saved at {})",
                        doc.preferences.len(),
                        doc.last_saved
                    );
                    Entries::from_document(doc.preferences, doc.custom_profiles, default_global())
                },
                Err(e) => {
                    log::warn!("Stored sort preferences are corrupt, using defaults: {}", e);
                    Entries::defaults()
                },
            },
            Ok(None) => Entries::defaults(),
            Err(e) => {
                log::warn!("Failed to read sort preferences, using defaults: {}", e);
                Entries::defaults()
            },
        };

        Self {
            storage: Box::new(storage),
            entries: RefCell::new(entries),
            listeners: ListenerSet::new(),
            next_id: Cell::new(0),
        }
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }

    /// The preference for `folder_path`, or the global default if the folder
    /// has none.
    pub fn get_preference(&self, folder_path: &str) -> SortPreference {
        let key = normalize_folder_path(folder_path);
        let entries = self.entries.borrow();
        entries
            .folders
            .get(&key)
            .unwrap_or(&entries.global)
            .clone()
    }

    /// The global default preference.
    pub fn get_global_default(&self) -> SortPreference {
        self.entries.borrow().global.clone()
    }

    /// Every folder-specific preference, in insertion order.
    pub fn get_all_folder_preferences(&self) -> Vec<SortPreference> {
        self.entries.borrow().folders.values().cloned().collect()
    }

    /// Every preference, global default first.
    pub fn get_all_preferences(&self) -> Vec<SortPreference> {
        self.entries.borrow().all_preferences()
    }

    /// Create or update the preference of `folder_path`.
    ///
    /// An empty path addresses the global default.
    pub fn set_folder_preference(
        &self,
        folder_path: &str,
        primary: SortCriteria,
        secondary: Option<SortCriteria>,
    ) -> SortPreference {
        let key = normalize_folder_path(folder_path);
        if key.is_empty() {
            return self.set_global_default(primary, secondary);
        }

        let now = now_millis();
        let preference = {
            let mut entries = self.entries.borrow_mut();
            match entries.folders.get_mut(&key) {
                Some(existing) => {
                    existing.primary = primary;
                    existing.secondary = secondary;
                    existing.date_modified = now;
                    existing.clone()
                },
                None => {
                    let preference = SortPreference {
                        id: self.generate_id("pref"),
                        folder_path: key.clone(),
                        primary,
                        secondary,
                        is_global: false,
                        date_created: now,
                        date_modified: now,
                    };
                    entries.folders.insert(key, preference.clone());
                    preference
                },
            }
        };

        self.changed();
        preference
    }

    /// Replace the criteria of the global default.
    pub fn set_global_default(
        &self,
        primary: SortCriteria,
        secondary: Option<SortCriteria>,
    ) -> SortPreference {
        let preference = {
            let mut entries = self.entries.borrow_mut();
            entries.global.primary = primary;
            entries.global.secondary = secondary;
            entries.global.date_modified = now_millis();
            entries.global.clone()
        };
        self.changed();
        preference
    }

    /// Remove the preference of `folder_path`. Returns false for the global
    /// default or when nothing was stored.
    pub fn remove_folder_preference(&self, folder_path: &str) -> bool {
        let key = normalize_folder_path(folder_path);
        if key.is_empty() {
            return false;
        }
        let removed = self.entries.borrow_mut().folders.shift_remove(&key).is_some();
        if removed {
            self.changed();
        }
        removed
    }

    /// Built-in profiles followed by custom ones.
    pub fn get_profiles(&self) -> Vec<SortProfile> {
        let mut profiles = built_in_profiles();
        profiles.extend(self.entries.borrow().custom_profiles.iter().cloned());
        profiles
    }

    /// Look up a profile by id.
    pub fn get_profile(&self, id: &str) -> Option<SortProfile> {
        self.get_profiles().into_iter().find(|p| p.id == id)
    }

    /// Create a custom profile.
    pub fn create_profile(
        &self,
        name: &str,
        description: Option<String>,
        primary: SortCriteria,
        secondary: Option<SortCriteria>,
    ) -> Result<SortProfile, SortPreferenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SortPreferenceError::EmptyProfileName);
        }

        let profile = SortProfile {
            id: self.generate_id("profile"),
            name: name.to_string(),
            description,
            primary,
            secondary,
            is_built_in: false,
            date_created: now_millis(),
        };
        self.entries
            .borrow_mut()
            .custom_profiles
            .push(profile.clone());
        self.changed();
        Ok(profile)
    }

    /// Update a custom profile. Built-in and unknown profiles are left
    /// untouched and yield false, as does a blank new name.
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> bool {
        if is_built_in_id(id) {
            log::debug!("Refusing to modify built-in profile {}", id);
            return false;
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return false;
        }

        {
            let mut entries = self.entries.borrow_mut();
            let Some(profile) = entries.custom_profiles.iter_mut().find(|p| p.id == id) else {
                return false;
            };
            if let Some(name) = update.name {
                profile.name = name.trim().to_string();
            }
            if let Some(description) = update.description {
                profile.description = description;
            }
            if let Some(primary) = update.primary {
                profile.primary = primary;
            }
            if let Some(secondary) = update.secondary {
                profile.secondary = secondary;
            }
        }

        self.changed();
        true
    }

    /// Delete a custom profile. Built-in and unknown profiles yield false.
    pub fn delete_profile(&self, id: &str) -> bool {
        if is_built_in_id(id) {
            log::debug!("Refusing to delete built-in profile {}", id);
            return false;
        }
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let before = entries.custom_profiles.len();
            entries.custom_profiles.retain(|p| p.id != id);
            entries.custom_profiles.len() != before
        };
        if removed {
            self.changed();
        }
        removed
    }

    /// Copy a profile's criteria into the preference of `folder_path`.
    pub fn apply_profile_to_folder(&self, profile_id: &str, folder_path: &str) -> bool {
        match self.get_profile(profile_id) {
            Some(profile) => {
                self.set_folder_preference(folder_path, profile.primary, profile.secondary);
                true
            },
            None => false,
        }
    }

    /// Copy a profile's criteria into the global default.
    pub fn apply_profile_as_global(&self, profile_id: &str) -> bool {
        match self.get_profile(profile_id) {
            Some(profile) => {
                self.set_global_default(profile.primary, profile.secondary);
                true
            },
            None => false,
        }
    }

    /// Serialize preferences and custom profiles into an export envelope.
    pub fn export(&self) -> Result<String, SortPreferenceError> {
        let entries = self.entries.borrow();
        let preferences = entries.all_preferences();
        let document = ExportDocument {
            version: EXPORT_VERSION,
            export_date: now_millis(),
            preferences: &preferences,
            custom_profiles: &entries.custom_profiles,
            stats: self.stats_of(&entries),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Replace preferences and custom profiles with an exported document.
    ///
    /// Malformed input (invalid JSON, `preferences` not an array, invalid
    /// entries) is rejected as a whole and leaves the store untouched. A
    /// document without a global entry keeps the current global default.
    pub fn import(&self, json: &str) -> bool {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Rejected sort preference import: {}", e);
                return false;
            },
        };
        if !value.get("preferences").is_some_and(serde_json::Value::is_array) {
            log::warn!("Rejected sort preference import: preferences must be an array");
            return false;
        }
        let document: StoredDocument = match serde_json::from_value(value) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Rejected sort preference import: {}", e);
                return false;
            },
        };

        let fallback = self.get_global_default();
        let entries = Entries::from_document(document.preferences, document.custom_profiles, fallback);
        *self.entries.borrow_mut() = entries;
        self.changed();
        true
    }

    /// Register a listener called with every preference after each change.
    pub fn on_change(&self, listener: impl Fn(&Vec<SortPreference>) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    /// Usage statistics.
    pub fn stats(&self) -> SortStats {
        self.stats_of(&self.entries.borrow())
    }

    /// Sort a listing of `folder_path` with its effective preference.
    pub fn sort_listing(&self, folder_path: &str, items: &mut [FileSystemItem], folders_first: bool) {
        let preference = self.get_preference(folder_path);
        sort_with_preference(items, &preference, folders_first);
    }

    fn stats_of(&self, entries: &Entries) -> SortStats {
        let folders = || entries.folders.values();
        SortStats {
            total_folder_preferences: entries.folders.len(),
            custom_profiles: entries.custom_profiles.len(),
            built_in_profiles: built_in_profiles().len(),
            most_used_field: most_used(folders().map(|p| p.primary.field)),
            most_used_algorithm: most_used(folders().map(|p| p.primary.algorithm.unwrap_or_default())),
        }
    }

    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        format!("{}-{}-{}", prefix, now_millis(), n)
    }

    fn persist(&self) {
        let result = {
            let entries = self.entries.borrow();
            let document = StoredDocument {
                preferences: entries.all_preferences(),
                custom_profiles: entries.custom_profiles.clone(),
                last_saved: now_millis(),
            };
            serde_json::to_string(&document)
                .map_err(SortPreferenceError::from)
                .and_then(|json| Ok(self.storage.set(STORAGE_KEY, &json)?))
        };
        if let Err(e) = result {
            log::error!("Failed to save sort preferences: {}", e);
        }
    }

    fn changed(&self) {
        self.persist();
        let preferences = self.get_all_preferences();
        self.listeners.notify(&preferences);
    }
}

impl Default for SortPreferenceStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Most frequent value; ties go to the value seen first.
fn most_used<K: Hash + Eq + Copy>(values: impl Iterator<Item = K>) -> Option<K> {
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort_preferences::{SortAlgorithm, SortDirection, SortField};
    use std::rc::Rc;

    fn by_size() -> SortCriteria {
        SortCriteria::new(SortField::Size, SortDirection::Desc)
    }

    #[test]
    fn test_normalize_folder_path() {
        assert_eq!(normalize_folder_path("C:\\Users\\Me\\"), "c:/users/me");
        assert_eq!(normalize_folder_path("/Home/Docs/"), "/home/docs");
        assert_eq!(normalize_folder_path("/"), "/");
        assert_eq!(normalize_folder_path(""), "");
    }

    #[test]
    fn test_folder_lookup_is_normalized() {
        let store = SortPreferenceStore::in_memory();
        store.set_folder_preference("C:\\Data\\", by_size(), None);

        assert_eq!(store.get_preference("c:/data").primary, by_size());
        assert!(!store.get_preference("c:/data").is_global);
    }

    #[test]
    fn test_update_preserves_creation_date() {
        let store = SortPreferenceStore::in_memory();
        let first = store.set_folder_preference("/a", by_size(), None);
        let second = store.set_folder_preference("/a/", SortCriteria::default(), Some(by_size()));

        assert_eq!(first.id, second.id);
        assert_eq!(first.date_created, second.date_created);
        assert!(second.date_modified >= first.date_modified);
        assert_eq!(store.get_all_folder_preferences().len(), 1);
    }

    #[test]
    fn test_remove_global_is_rejected() {
        let store = SortPreferenceStore::in_memory();
        assert!(!store.remove_folder_preference(""));
        assert!(!store.remove_folder_preference("/missing"));

        store.set_folder_preference("/x", by_size(), None);
        assert!(store.remove_folder_preference("/X"));
        assert!(store.get_preference("/x").is_global);
    }

    #[test]
    fn test_built_in_profiles_are_immutable() {
        let store = SortPreferenceStore::in_memory();
        let update = ProfileUpdate {
            name: Some(String::from("Mine")),
            ..Default::default()
        };

        assert!(!store.update_profile("default", update));
        assert!(!store.delete_profile("by-type"));
        assert_eq!(store.get_profile("default").map(|p| p.name), Some(String::from("Default")));
    }

    #[test]
    fn test_custom_profile_crud() {
        let store = SortPreferenceStore::in_memory();
        assert!(matches!(
            store.create_profile("  ", None, by_size(), None),
            Err(SortPreferenceError::EmptyProfileName)
        ));

        let profile = store.create_profile("Big", None, by_size(), None).unwrap();
        assert!(!profile.is_built_in);

        let update = ProfileUpdate {
            name: Some(String::from("Huge")),
            secondary: Some(Some(SortCriteria::default())),
            ..Default::default()
        };
        assert!(store.update_profile(&profile.id, update));
        let updated = store.get_profile(&profile.id).unwrap();
        assert_eq!(updated.name, "Huge");
        assert_eq!(updated.secondary, Some(SortCriteria::default()));

        assert!(store.apply_profile_to_folder(&profile.id, "/media"));
        assert_eq!(store.get_preference("/media").primary, by_size());

        assert!(store.delete_profile(&profile.id));
        assert!(!store.delete_profile(&profile.id));
        assert!(!store.apply_profile_as_global(&profile.id));
    }

    #[test]
    fn test_stats_ties_go_to_first_seen() {
        let store = SortPreferenceStore::in_memory();
        store.set_folder_preference("/a", by_size(), None);
        store.set_folder_preference(
            "/b",
            SortCriteria::new(SortField::Name, SortDirection::Asc).with_algorithm(SortAlgorithm::CaseSensitive),
            None,
        );

        let stats = store.stats();
        assert_eq!(stats.total_folder_preferences, 2);
        assert_eq!(stats.most_used_field, Some(SortField::Size));
        assert_eq!(stats.most_used_algorithm, Some(SortAlgorithm::Natural));
        assert_eq!(stats.built_in_profiles, 7);

        store.set_folder_preference("/c", SortCriteria::default(), None);
        assert_eq!(store.stats().most_used_field, Some(SortField::Name));
    }

    #[test]
    fn test_empty_stats() {
        let stats = SortPreferenceStore::in_memory().stats();
        assert_eq!(stats.most_used_field, None);
        assert_eq!(stats.most_used_algorithm, None);
    }

    #[test]
    fn test_persists_and_reloads() {
        let storage = Rc::new(MemoryStore::new());
        let store = SortPreferenceStore::load(storage.clone());
        store.set_folder_preference("/music", by_size(), None);
        store.create_profile("Mine", Some(String::from("desc")), by_size(), None).unwrap();

        let reloaded = SortPreferenceStore::load(storage);
        assert_eq!(reloaded.get_preference("/music").primary, by_size());
        assert_eq!(reloaded.get_profiles().len(), 8);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_defaults() {
        let storage = MemoryStore::new();
        storage.set(STORAGE_KEY, "{not json").unwrap();

        let store = SortPreferenceStore::load(storage);
        assert_eq!(store.get_global_default().primary, SortCriteria::default());
        assert!(store.get_all_folder_preferences().is_empty());
    }

    #[test]
    fn test_listeners_run_after_persisting() {
        let storage = Rc::new(MemoryStore::new());
        let store = SortPreferenceStore::load(storage.clone());
        let observed = Rc::new(RefCell::new(Vec::new()));

        let o = observed.clone();
        let s = storage.clone();
        let _sub = store.on_change(move |prefs| {
            let saved = s.get(STORAGE_KEY).unwrap().unwrap_or_default();
            o.borrow_mut().push((prefs.len(), saved.contains("/docs")));
        });
        store.set_folder_preference("/docs", by_size(), None);

        assert_eq!(*observed.borrow(), vec![(2, true)]);
    }
}
