// SPDX-License-Identifier: LGPL-3.0-only
//! Capabilities the explorer core needs from its host process.
//!
//! Every filesystem, OS clipboard, shell and settings operation goes through
//! these traits. Futures are not `Send`: the core runs on one event loop.

mod error;
#[cfg(feature = "local-host")]
mod local;

pub use error::HostError;
#[cfg(feature = "local-host")]
pub use local::LocalHost;

use crate::clipboard::ClipboardState;
use crate::filesystem::entry::FileSystemItem;
use crate::places::KnownFolder;
use crate::sort_preferences::SortCriteria;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Result of a host call.
pub type HostResult<T> = Result<T, HostError>;

/// Options for [FileSystemHost::list_directory].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Include hidden entries.
    pub show_hidden: bool,
    /// List directories before files.
    pub folders_first: bool,
    /// Order hint; hosts list by name when absent.
    pub sort: Option<SortCriteria>,
    /// Maximum number of entries returned.
    pub max_items: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            folders_first: true,
            sort: None,
            max_items: None,
        }
    }
}

/// Directory listing and path resolution.
#[async_trait(?Send)]
pub trait FileSystemHost {
    /// List the entries of `path`.
    async fn list_directory(&self, path: &str, options: &ListOptions) -> HostResult<Vec<FileSystemItem>>;

    /// The parent of `path`, or `None` at a root.
    async fn parent_directory(&self, path: &str) -> HostResult<Option<String>>;

    /// Whether `path` exists.
    async fn path_exists(&self, path: &str) -> HostResult<bool>;

    /// Absolute path of a known folder.
    async fn resolve_known_folder(&self, folder: KnownFolder) -> HostResult<String>;

    /// The user's home directory.
    async fn home_dir(&self) -> HostResult<String> {
        self.resolve_known_folder(KnownFolder::Home).await
    }

    /// Root paths of the available drives.
    async fn drives(&self) -> HostResult<Vec<String>> {
        Ok(vec![String::from("/")])
    }
}

/// The OS-level clipboard for files.
#[async_trait(?Send)]
pub trait ClipboardHost {
    /// Put `paths` on the clipboard for copying.
    async fn copy(&self, paths: &[String]) -> HostResult<()>;

    /// Put `paths` on the clipboard for moving.
    async fn cut(&self, paths: &[String]) -> HostResult<()>;

    /// Paste the clipboard into `destination`. Returns the created paths.
    async fn paste(&self, destination: &str) -> HostResult<Vec<String>>;

    /// Empty the clipboard.
    async fn clear(&self) -> HostResult<()>;

    /// Current clipboard contents.
    async fn state(&self) -> HostResult<ClipboardState>;
}

/// Changes to the filesystem.
#[async_trait(?Send)]
pub trait MutationHost {
    /// Delete `paths`.
    async fn delete(&self, paths: &[String]) -> HostResult<()>;

    /// Rename `path` to `new_name` within its directory. Returns the new path.
    async fn rename(&self, path: &str, new_name: &str) -> HostResult<String>;

    /// Create folder `name` inside `parent`. Returns its path.
    async fn create_folder(&self, parent: &str, name: &str) -> HostResult<String>;
}

/// Opening files and revealing them in the platform shell.
#[async_trait(?Send)]
pub trait ShellHost {
    /// Open `path` with its default application and report the outcome.
    async fn open_file(&self, path: &str) -> HostResult<()>;

    /// Open `path` without waiting for the outcome.
    fn open_file_fast(&self, path: &str);

    /// Show the properties dialog of `path`.
    async fn show_properties(&self, path: &str) -> HostResult<()>;

    /// Reveal `path` in the platform file manager.
    async fn show_in_explorer(&self, path: &str) -> HostResult<()>;
}

/// Durable settings owned by the host.
#[async_trait(?Send)]
pub trait SettingsHost {
    /// Path of a known folder as configured in the host settings.
    async fn get_known_folder(&self, folder: KnownFolder) -> HostResult<String>;

    /// Every stored setting.
    async fn get_all(&self) -> HostResult<Map<String, Value>>;

    /// Store one setting.
    async fn update(&self, key: &str, value: Value) -> HostResult<()>;
}

/// The full capability surface.
pub trait Host: FileSystemHost + ClipboardHost + MutationHost + ShellHost + SettingsHost {}

impl<T> Host for T where T: FileSystemHost + ClipboardHost + MutationHost + ShellHost + SettingsHost {}
