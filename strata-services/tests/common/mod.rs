// SPDX-License-Identifier: LGPL-3.0-only
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use strata_services::clipboard::{ClipboardOperation, ClipboardState};
use strata_services::filesystem::FileSystemItem;
use strata_services::host::{
    ClipboardHost, FileSystemHost, HostError, HostResult, ListOptions, MutationHost, SettingsHost, ShellHost,
};
use strata_services::places::KnownFolder;

/// In-memory host. Directories map to their entries; every call is logged
/// by name and any call can be made to fail.
#[derive(Default)]
pub struct MockHost {
    dirs: RefCell<HashMap<String, Vec<FileSystemItem>>>,
    clipboard: RefCell<ClipboardState>,
    settings: RefCell<Map<String, Value>>,
    failing: RefCell<HashSet<&'static str>>,
    calls: RefCell<Vec<String>>,
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn parent_of(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) if trimmed.len() > 1 => Some(String::from("/")),
        Some(0) | None => None,
        Some(index) => Some(trimmed[..index].to_string()),
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with `/home`, `/home/docs` and `/home/docs/2024`.
    pub fn with_tree() -> Self {
        let host = Self::new();
        host.add_dir("/");
        host.add_dir("/home");
        host.add_dir("/home/docs");
        host.add_dir("/home/docs/2024");
        host.add_file("/home/notes.txt");
        host.add_file("/home/docs/report10.pdf");
        host.add_file("/home/docs/report2.pdf");
        host
    }

    /// Register an empty directory, linked into its parent when the parent exists.
    pub fn add_dir(&self, path: &str) {
        let mut dirs = self.dirs.borrow_mut();
        dirs.entry(path.to_string()).or_default();
        if let Some(parent) = parent_of(path) {
            if let Some(entries) = dirs.get_mut(&parent) {
                entries.push(FileSystemItem::directory(basename(path), path));
            }
        }
    }

    /// Register a file in its (existing) parent directory.
    pub fn add_file(&self, path: &str) {
        if let Some(parent) = parent_of(path) {
            if let Some(entries) = self.dirs.borrow_mut().get_mut(&parent) {
                entries.push(FileSystemItem::file(basename(path), path));
            }
        }
    }

    /// Names listed in `dir`.
    pub fn names_in(&self, dir: &str) -> Vec<String> {
        self.dirs
            .borrow()
            .get(dir)
            .map(|entries| entries.iter().map(|item| item.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Make every call of `operation` fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    /// Let `operation` succeed again.
    pub fn recover(&self, operation: &'static str) {
        self.failing.borrow_mut().remove(operation);
    }

    /// Names of the calls made so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of calls of `operation`.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.as_str() == operation).count()
    }

    /// Current host clipboard.
    pub fn clipboard(&self) -> ClipboardState {
        self.clipboard.borrow().clone()
    }

    /// Current host settings.
    pub fn settings(&self) -> Map<String, Value> {
        self.settings.borrow().clone()
    }

    fn call(&self, operation: &'static str) -> HostResult<()> {
        self.calls.borrow_mut().push(operation.to_string());
        if self.failing.borrow().contains(operation) {
            return Err(HostError::Rejected(format!("{} refused", operation)));
        }
        Ok(())
    }

    fn remove_entry(&self, path: &str) {
        let mut dirs = self.dirs.borrow_mut();
        if let Some(parent) = parent_of(path) {
            if let Some(entries) = dirs.get_mut(&parent) {
                entries.retain(|item| item.path != path);
            }
        }
        dirs.retain(|dir, _| dir != path && !dir.starts_with(&format!("{}/", path)));
    }
}

#[async_trait(?Send)]
impl FileSystemHost for MockHost {
    async fn list_directory(&self, path: &str, options: &ListOptions) -> HostResult<Vec<FileSystemItem>> {
        self.call("list_directory")?;
        let mut entries = self
            .dirs
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::NotFound(path.to_string()))?;
        if !options.show_hidden {
            entries.retain(|item| !item.is_hidden);
        }
        if let Some(max) = options.max_items {
            entries.truncate(max);
        }
        Ok(entries)
    }

    async fn parent_directory(&self, path: &str) -> HostResult<Option<String>> {
        self.call("parent_directory")?;
        Ok(parent_of(path))
    }

    async fn path_exists(&self, path: &str) -> HostResult<bool> {
        self.call("path_exists")?;
        Ok(self.dirs.borrow().contains_key(path))
    }

    async fn resolve_known_folder(&self, folder: KnownFolder) -> HostResult<String> {
        self.call("resolve_known_folder")?;
        match folder {
            KnownFolder::Home => Ok(String::from("/home")),
            KnownFolder::Documents => Ok(String::from("/home/docs")),
            other => Err(HostError::UnknownFolder(other.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl ClipboardHost for MockHost {
    async fn copy(&self, paths: &[String]) -> HostResult<()> {
        self.call("copy")?;
        *self.clipboard.borrow_mut() = ClipboardState::copy(paths.to_vec());
        Ok(())
    }

    async fn cut(&self, paths: &[String]) -> HostResult<()> {
        self.call("cut")?;
        *self.clipboard.borrow_mut() = ClipboardState::cut(paths.to_vec());
        Ok(())
    }

    async fn paste(&self, destination: &str) -> HostResult<Vec<String>> {
        self.call("paste")?;
        if !self.dirs.borrow().contains_key(destination) {
            return Err(HostError::NotADirectory(destination.to_string()));
        }
        let state = self.clipboard.replace(ClipboardState::empty());
        let mut pasted = Vec::with_capacity(state.files.len());
        for source in &state.files {
            let target = join(destination, basename(source));
            if state.operation == Some(ClipboardOperation::Cut) {
                self.remove_entry(source);
            }
            self.add_file(&target);
            pasted.push(target);
        }
        Ok(pasted)
    }

    async fn clear(&self) -> HostResult<()> {
        self.call("clear")?;
        *self.clipboard.borrow_mut() = ClipboardState::empty();
        Ok(())
    }

    async fn state(&self) -> HostResult<ClipboardState> {
        self.call("state")?;
        Ok(self.clipboard())
    }
}

#[async_trait(?Send)]
impl MutationHost for MockHost {
    async fn delete(&self, paths: &[String]) -> HostResult<()> {
        self.call("delete")?;
        for path in paths {
            self.remove_entry(path);
        }
        Ok(())
    }

    async fn rename(&self, path: &str, new_name: &str) -> HostResult<String> {
        self.call("rename")?;
        let parent = parent_of(path).ok_or_else(|| HostError::NotFound(path.to_string()))?;
        let target = join(&parent, new_name);
        let mut dirs = self.dirs.borrow_mut();
        let entries = dirs
            .get_mut(&parent)
            .ok_or_else(|| HostError::NotFound(parent.clone()))?;
        if entries.iter().any(|item| item.path == target) {
            return Err(HostError::AlreadyExists(target));
        }
        let item = entries
            .iter_mut()
            .find(|item| item.path == path)
            .ok_or_else(|| HostError::NotFound(path.to_string()))?;
        item.name = new_name.to_string();
        item.path = target.clone();
        Ok(target)
    }

    async fn create_folder(&self, parent: &str, name: &str) -> HostResult<String> {
        self.call("create_folder")?;
        let path = join(parent, name);
        if self.dirs.borrow().contains_key(&path) {
            return Err(HostError::AlreadyExists(path));
        }
        self.add_dir(&path);
        Ok(path)
    }
}

#[async_trait(?Send)]
impl ShellHost for MockHost {
    async fn open_file(&self, _path: &str) -> HostResult<()> {
        self.call("open_file")
    }

    fn open_file_fast(&self, _path: &str) {
        let _ = self.call("open_file_fast");
    }

    async fn show_properties(&self, _path: &str) -> HostResult<()> {
        self.call("show_properties")
    }

    async fn show_in_explorer(&self, _path: &str) -> HostResult<()> {
        self.call("show_in_explorer")
    }
}

#[async_trait(?Send)]
impl SettingsHost for MockHost {
    async fn get_known_folder(&self, folder: KnownFolder) -> HostResult<String> {
        self.call("get_known_folder")?;
        self.resolve_known_folder(folder).await
    }

    async fn get_all(&self) -> HostResult<Map<String, Value>> {
        self.call("get_all")?;
        Ok(self.settings())
    }

    async fn update(&self, key: &str, value: Value) -> HostResult<()> {
        self.call("update")?;
        self.settings.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
