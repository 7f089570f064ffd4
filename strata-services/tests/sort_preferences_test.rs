// SPDX-License-Identifier: LGPL-3.0-only
use std::rc::Rc;
use strata_core::storage::{FileStore, KeyValueStore, MemoryStore};
use strata_services::filesystem::FileSystemItem;
use strata_services::sort_preferences::{
    SortAlgorithm, SortCriteria, SortDirection, SortField, SortPreferenceStore, STORAGE_KEY,
};

fn newest_first() -> SortCriteria {
    SortCriteria::new(SortField::Modified, SortDirection::Desc)
}

#[test]
fn test_untouched_folder_follows_global_default() {
    let store = SortPreferenceStore::in_memory();
    let before = store.get_preference("/some/untouched/folder");
    assert!(before.is_global);
    assert_eq!(before.primary, SortCriteria::default());

    store.set_global_default(newest_first(), None);
    let after = store.get_preference("/some/untouched/folder");
    assert!(after.is_global);
    assert_eq!(after.primary, newest_first());
    assert_eq!(store.get_all_preferences().iter().filter(|p| p.is_global).count(), 1);
}

#[test]
fn test_export_import_roundtrip() {
    let source = SortPreferenceStore::in_memory();
    source.set_global_default(SortCriteria::new(SortField::Size, SortDirection::Asc), None);
    source.set_folder_preference("/Photos", newest_first(), Some(SortCriteria::default()));
    source
        .create_profile("Camera", Some(String::from("Newest shots first")), newest_first(), None)
        .unwrap();
    let exported = source.export().unwrap();

    let document: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(document["version"], "1.0");
    assert!(document["exportDate"].is_u64());
    assert_eq!(document["stats"]["totalFolderPreferences"], 1);

    let target = SortPreferenceStore::in_memory();
    assert!(target.import(&exported));
    assert_eq!(target.get_all_preferences(), source.get_all_preferences());
    assert_eq!(target.get_preference("/photos").primary, newest_first());
    assert_eq!(target.get_profiles().len(), 8);
    assert!(target.get_profiles().iter().any(|p| p.name == "Camera"));
}

#[test]
fn test_malformed_import_changes_nothing() {
    let store = SortPreferenceStore::in_memory();
    store.set_folder_preference("/music", newest_first(), None);
    let before = store.get_all_preferences();

    let changes = Rc::new(std::cell::Cell::new(0));
    let counter = changes.clone();
    let _sub = store.on_change(move |_| counter.set(counter.get() + 1));

    assert!(!store.import("not json at all"));
    assert!(!store.import(r#"{"preferences": {"folderPath": "/x"}}"#));
    assert!(!store.import(r#"{"customProfiles": []}"#));
    assert!(!store.import(r#"{"preferences": [{"folderPath": "/x"}]}"#));

    assert_eq!(store.get_all_preferences(), before);
    assert_eq!(changes.get(), 0);
}

#[test]
fn test_import_without_global_keeps_current_default() {
    let store = SortPreferenceStore::in_memory();
    let by_size = SortCriteria::new(SortField::Size, SortDirection::Desc);
    store.set_global_default(by_size, None);
    store.set_folder_preference("/old", newest_first(), None);

    let source = SortPreferenceStore::in_memory();
    source.set_folder_preference("/new", newest_first(), None);
    let mut document: serde_json::Value = serde_json::from_str(&source.export().unwrap()).unwrap();
    document["preferences"]
        .as_array_mut()
        .unwrap()
        .retain(|p| p["isGlobal"] == false);

    assert!(store.import(&document.to_string()));
    assert_eq!(store.get_global_default().primary, by_size);
    assert!(store.get_preference("/old").is_global);
    assert!(!store.get_preference("/new").is_global);
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = SortPreferenceStore::load(FileStore::new(dir.path()));
        store.set_folder_preference("/downloads", newest_first(), None);
    }
    assert!(dir.path().join(format!("{}.json", STORAGE_KEY)).exists());

    let store = SortPreferenceStore::load(FileStore::new(dir.path()));
    assert_eq!(store.get_preference("/Downloads/").primary, newest_first());
}

#[test]
fn test_unwritable_storage_keeps_memory_state() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let store = SortPreferenceStore::load(FileStore::new(&blocker));
    store.set_folder_preference("/music", newest_first(), None);
    assert_eq!(store.get_preference("/music").primary, newest_first());

    assert!(FileStore::new(&blocker).get(STORAGE_KEY).is_err());
}

#[test]
fn test_unreadable_document_is_replaced_on_next_save() {
    let storage = Rc::new(MemoryStore::new());
    storage.set(STORAGE_KEY, r#"{"preferences": 42}"#).unwrap();

    let store = SortPreferenceStore::load(storage.clone());
    assert!(store.get_all_folder_preferences().is_empty());

    store.set_folder_preference("/a", newest_first(), None);
    let saved = storage.get(STORAGE_KEY).unwrap().unwrap();
    let document: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(document["preferences"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_listing_follows_folder_preference() {
    let store = SortPreferenceStore::in_memory();
    let mut items = vec![
        FileSystemItem::file("File10.txt", "/d/File10.txt"),
        FileSystemItem::directory("zeta", "/d/zeta"),
        FileSystemItem::file("file2.txt", "/d/file2.txt"),
    ];

    store.sort_listing("/d", &mut items, true);
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "file2.txt", "File10.txt"]);

    let case_sensitive = SortCriteria::new(SortField::Name, SortDirection::Asc)
        .with_algorithm(SortAlgorithm::CaseSensitive);
    store.set_folder_preference("/d", case_sensitive, None);
    store.sort_listing("/d", &mut items, false);
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["File10.txt", "file2.txt", "zeta"]);
}
