// SPDX-License-Identifier: LGPL-3.0-only
//! Host capabilities served from the local machine.

use super::{
    ClipboardHost, FileSystemHost, HostError, HostResult, ListOptions, MutationHost, SettingsHost, ShellHost,
};
use crate::clipboard::{ClipboardOperation, ClipboardState};
use crate::filesystem::entry::{extension_of, FileSystemItem, ItemType, Permissions};
use crate::filesystem::sort::sort_items;
use crate::places::{self, KnownFolder};
use async_trait::async_trait;
use serde_json::{Map, Value};
use smol::fs;
use smol::stream::StreamExt;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Serves the host capabilities from the local filesystem and platform shell.
///
/// The clipboard is kept in process. Settings live in memory, or in a JSON
/// file when created with [LocalHost::with_settings_file].
#[derive(Debug, Default)]
pub struct LocalHost {
    clipboard: RefCell<ClipboardState>,
    settings: RefCell<Option<Map<String, Value>>>,
    settings_path: Option<PathBuf>,
}

impl LocalHost {
    /// Create a host with in-memory settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host persisting settings to `path`.
    pub fn with_settings_file(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: Some(path.into()),
            ..Self::default()
        }
    }

    async fn load_settings(&self) -> Map<String, Value> {
        if let Some(settings) = self.settings.borrow().as_ref() {
            return settings.clone();
        }

        let loaded = match &self.settings_path {
            Some(path) => match fs::read_to_string(path).await {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                    Map::new()
                }),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
                Err(e) => {
                    log::warn!("Failed to read settings file {:?}: {}", path, e);
                    Map::new()
                },
            },
            None => Map::new(),
        };
        *self.settings.borrow_mut() = Some(loaded.clone());
        loaded
    }
}

fn millis(time: io::Result<SystemTime>) -> u64 {
    time.ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn item_from_metadata(name: String, path: &Path, metadata: &std::fs::Metadata) -> FileSystemItem {
    let is_dir = metadata.is_dir();
    #[cfg(unix)]
    let executable = {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    };
    #[cfg(not(unix))]
    let executable = is_dir;

    FileSystemItem {
        extension: if is_dir { None } else { extension_of(&name) },
        is_hidden: name.starts_with('.'),
        name,
        path: path.to_string_lossy().to_string(),
        item_type: if is_dir {
            ItemType::Directory
        } else {
            ItemType::File
        },
        size: if is_dir { 0 } else { metadata.len() },
        modified: millis(metadata.modified()),
        created: millis(metadata.created()),
        is_system: false,
        permissions: Permissions {
            readable: true,
            writable: !metadata.permissions().readonly(),
            executable,
        },
    }
}

async fn require_directory(path: &str) -> HostResult<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(HostError::NotADirectory(path.to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(HostError::NotFound(path.to_string())),
        Err(e) => Err(e.into()),
    }
}

fn copy_recursively(source: &Path, target: &Path) -> io::Result<()> {
    if source.is_dir() {
        std::fs::create_dir(target)?;
        for entry in std::fs::read_dir(source)? {
            let entry = entry?;
            copy_recursively(&entry.path(), &target.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        std::fs::copy(source, target).map(|_| ())
    }
}

/// Pair every source with its target in `destination`, rejecting the whole
/// paste before anything changes.
async fn plan_paste(files: &[String], destination: &Path) -> HostResult<Vec<(PathBuf, PathBuf)>> {
    let mut plan: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for source in files.iter().map(PathBuf::from) {
        let Some(file_name) = source.file_name() else {
            return Err(HostError::Rejected(format!("Cannot paste {:?}", source)));
        };
        if fs::symlink_metadata(&source).await.is_err() {
            return Err(HostError::NotFound(source.to_string_lossy().to_string()));
        }
        if destination.starts_with(&source) {
            return Err(HostError::Rejected(format!("Cannot paste {:?} into itself", source)));
        }
        let target = destination.join(file_name);
        if fs::symlink_metadata(&target).await.is_ok() || plan.iter().any(|(_, t)| *t == target) {
            return Err(HostError::AlreadyExists(target.to_string_lossy().to_string()));
        }
        plan.push((source, target));
    }
    Ok(plan)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Copy `source` to `target`. A failed copy leaves no partial target behind.
async fn copy_entry(source: PathBuf, target: PathBuf) -> io::Result<()> {
    smol::unblock(move || {
        copy_recursively(&source, &target).inspect_err(|_| {
            if target.exists() {
                let _ = remove_entry(&target);
            }
        })
    })
    .await
}

/// Move `source` to `target`, copying then removing across filesystems.
async fn move_entry(source: PathBuf, target: PathBuf) -> io::Result<()> {
    match fs::rename(&source, &target).await {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("Moving {:?} across devices", source);
            copy_entry(source.clone(), target).await?;
            smol::unblock(move || remove_entry(&source)).await
        },
        result => result,
    }
}

fn launch(program: &str, args: &[&str]) -> HostResult<()> {
    Command::new(program)
        .args(args)
        .spawn()
        .map(|_| ())
        .map_err(|e| HostError::Rejected(format!("Failed to launch {}: {}", program, e)))
}

fn open_with_default_app(path: &str) -> HostResult<()> {
    if cfg!(target_os = "windows") {
        launch("cmd", &["/C", "start", "", path])
    } else if cfg!(target_os = "macos") {
        launch("open", &[path])
    } else {
        launch("xdg-open", &[path])
    }
}

#[async_trait(?Send)]
impl FileSystemHost for LocalHost {
    async fn list_directory(&self, path: &str, options: &ListOptions) -> HostResult<Vec<FileSystemItem>> {
        require_directory(path).await?;

        let mut entries = fs::read_dir(path).await?;
        let mut items = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Error reading entry in {}: {}", path, e);
                    continue;
                },
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if !options.show_hidden && name.starts_with('.') {
                continue;
            }
            match entry.metadata().await {
                Ok(metadata) => items.push(item_from_metadata(name, &entry.path(), &metadata)),
                Err(e) => log::warn!("Failed to stat {:?}: {}", entry.path(), e),
            }
        }

        match &options.sort {
            Some(criteria) => sort_items(&mut items, criteria, None, options.folders_first),
            None => items.sort_by(|a, b| {
                let folders = if options.folders_first {
                    b.is_dir().cmp(&a.is_dir())
                } else {
                    std::cmp::Ordering::Equal
                };
                folders.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
        }
        if let Some(max) = options.max_items {
            items.truncate(max);
        }
        Ok(items)
    }

    async fn parent_directory(&self, path: &str) -> HostResult<Option<String>> {
        Ok(Path::new(path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !p.is_empty()))
    }

    async fn path_exists(&self, path: &str) -> HostResult<bool> {
        Ok(fs::metadata(path).await.is_ok())
    }

    async fn resolve_known_folder(&self, folder: KnownFolder) -> HostResult<String> {
        places::resolve_known_folder(folder)
            .await
            .map(|p| p.to_string_lossy().to_string())
            .ok_or_else(|| HostError::UnknownFolder(folder.to_string()))
    }

    async fn drives(&self) -> HostResult<Vec<String>> {
        Ok(places::drives())
    }
}

#[async_trait(?Send)]
impl ClipboardHost for LocalHost {
    async fn copy(&self, paths: &[String]) -> HostResult<()> {
        *self.clipboard.borrow_mut() = ClipboardState::copy(paths.to_vec());
        Ok(())
    }

    async fn cut(&self, paths: &[String]) -> HostResult<()> {
        *self.clipboard.borrow_mut() = ClipboardState::cut(paths.to_vec());
        Ok(())
    }

    async fn paste(&self, destination: &str) -> HostResult<Vec<String>> {
        let state = self.clipboard.borrow().clone();
        let Some(operation) = state.operation else {
            return Err(HostError::Rejected(String::from("Clipboard is empty")));
        };
        require_directory(destination).await?;

        let plan = plan_paste(&state.files, Path::new(destination)).await?;
        let mut pasted = Vec::with_capacity(plan.len());
        for (index, (source, target)) in plan.into_iter().enumerate() {
            let result = match operation {
                ClipboardOperation::Copy => copy_entry(source, target.clone()).await,
                ClipboardOperation::Cut => move_entry(source, target.clone()).await,
            };
            if let Err(e) = result {
                // Pasted entries leave the clipboard so a retry resumes with the rest.
                let remaining = state.files[index..].to_vec();
                *self.clipboard.borrow_mut() = ClipboardState {
                    operation: Some(operation),
                    files: remaining,
                };
                log::warn!("Paste stopped after {} of {} entries: {}", index, state.files.len(), e);
                return Err(e.into());
            }
            pasted.push(target.to_string_lossy().to_string());
        }

        *self.clipboard.borrow_mut() = ClipboardState::empty();
        Ok(pasted)
    }

    async fn clear(&self) -> HostResult<()> {
        *self.clipboard.borrow_mut() = ClipboardState::empty();
        Ok(())
    }

    async fn state(&self) -> HostResult<ClipboardState> {
        Ok(self.clipboard.borrow().clone())
    }
}

#[async_trait(?Send)]
impl MutationHost for LocalHost {
    async fn delete(&self, paths: &[String]) -> HostResult<()> {
        for path in paths {
            let metadata = fs::symlink_metadata(path).await.map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => HostError::NotFound(path.clone()),
                _ => e.into(),
            })?;
            if metadata.is_dir() {
                fs::remove_dir_all(path).await?;
            } else {
                fs::remove_file(path).await?;
            }
        }
        Ok(())
    }

    async fn rename(&self, path: &str, new_name: &str) -> HostResult<String> {
        let source = Path::new(path);
        let target = source
            .parent()
            .map(|parent| parent.join(new_name))
            .ok_or_else(|| HostError::Rejected(format!("Cannot rename {}", path)))?;
        if fs::metadata(&target).await.is_ok() {
            return Err(HostError::AlreadyExists(target.to_string_lossy().to_string()));
        }
        fs::rename(source, &target).await?;
        Ok(target.to_string_lossy().to_string())
    }

    async fn create_folder(&self, parent: &str, name: &str) -> HostResult<String> {
        require_directory(parent).await?;
        let target = Path::new(parent).join(name);
        fs::create_dir(&target).await.map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => HostError::AlreadyExists(target.to_string_lossy().to_string()),
            _ => e.into(),
        })?;
        Ok(target.to_string_lossy().to_string())
    }
}

#[async_trait(?Send)]
impl ShellHost for LocalHost {
    async fn open_file(&self, path: &str) -> HostResult<()> {
        if fs::metadata(path).await.is_err() {
            return Err(HostError::NotFound(path.to_string()));
        }
        open_with_default_app(path)
    }

    fn open_file_fast(&self, path: &str) {
        if let Err(e) = open_with_default_app(path) {
            log::warn!("Failed to open {}: {}", path, e);
        }
    }

    async fn show_properties(&self, path: &str) -> HostResult<()> {
        Err(HostError::Unsupported(format!("properties dialog for {}", path)))
    }

    async fn show_in_explorer(&self, path: &str) -> HostResult<()> {
        if cfg!(target_os = "windows") {
            launch("explorer", &["/select,", path])
        } else if cfg!(target_os = "macos") {
            launch("open", &["-R", path])
        } else {
            let parent = Path::new(path)
                .parent()
                .map(|p| p.to_string_lossy().to_string())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| String::from("/"));
            launch("xdg-open", &[parent.as_str()])
        }
    }
}

#[async_trait(?Send)]
impl SettingsHost for LocalHost {
    async fn get_known_folder(&self, folder: KnownFolder) -> HostResult<String> {
        let settings = self.load_settings().await;
        let key = format!("knownFolders.{}", folder);
        if let Some(Value::String(path)) = settings.get(&key) {
            return Ok(path.clone());
        }
        self.resolve_known_folder(folder).await
    }

    async fn get_all(&self) -> HostResult<Map<String, Value>> {
        Ok(self.load_settings().await)
    }

    async fn update(&self, key: &str, value: Value) -> HostResult<()> {
        let mut settings = self.load_settings().await;
        settings.insert(key.to_string(), value);

        if let Some(path) = &self.settings_path {
            let json = serde_json::to_string_pretty(&settings)
                .map_err(|e| HostError::Rejected(e.to_string()))?;
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).await?;
            }
            fs::write(path, json).await?;
        }
        *self.settings.borrow_mut() = Some(settings);
        Ok(())
    }
}
