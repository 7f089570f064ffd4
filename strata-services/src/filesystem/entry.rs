// SPDX-License-Identifier: LGPL-3.0-only
//! File entry types exchanged with the host.

use serde::{Deserialize, Serialize};

/// Type of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Access rights of the current user on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Entry can be read.
    pub readable: bool,
    /// Entry can be written.
    pub writable: bool,
    /// Entry can be executed (files) or traversed (directories).
    pub executable: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
        }
    }
}

/// A filesystem entry (file or directory) as produced by the host.
///
/// Items are immutable per listing; `path` is the identity within a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemItem {
    /// Name of the entry (file or directory name).
    pub name: String,
    /// Full path to the entry.
    pub path: String,
    /// Type of the entry.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Size of the file in bytes (0 for directories).
    pub size: u64,
    /// Last modification time, epoch milliseconds.
    pub modified: u64,
    /// Creation time, epoch milliseconds.
    pub created: u64,
    /// Lowercased extension without the dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Whether the entry is hidden.
    #[serde(default)]
    pub is_hidden: bool,
    /// Whether the entry is an OS-protected system entry.
    #[serde(default)]
    pub is_system: bool,
    /// Access rights.
    #[serde(default)]
    pub permissions: Permissions,
}

impl FileSystemItem {
    /// Create a file item with default metadata. The extension is derived from `name`.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            is_hidden: name.starts_with('.'),
            name,
            path: path.into(),
            item_type: ItemType::File,
            size: 0,
            modified: 0,
            created: 0,
            extension,
            is_system: false,
            permissions: Permissions::default(),
        }
    }

    /// Create a directory item with default metadata.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            is_hidden: name.starts_with('.'),
            name,
            path: path.into(),
            item_type: ItemType::Directory,
            size: 0,
            modified: 0,
            created: 0,
            extension: None,
            is_system: false,
            permissions: Permissions {
                executable: true,
                ..Permissions::default()
            },
        }
    }

    /// Set the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the modification time (epoch milliseconds).
    pub fn with_modified(mut self, modified: u64) -> Self {
        self.modified = modified;
        self
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        self.item_type == ItemType::File
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.item_type == ItemType::Directory
    }

    /// Type label used when sorting by type: the extension for files,
    /// an empty string for directories.
    pub fn type_key(&self) -> &str {
        match self.item_type {
            ItemType::Directory => "",
            ItemType::File => self.extension.as_deref().unwrap_or(""),
        }
    }
}

/// Extract the lowercased extension from a file name.
///
/// Dotfiles without a second dot (`.bashrc`) have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let trimmed = name.strip_prefix('.').unwrap_or(name);
    let (_, ext) = trimmed.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Anything searchable or sortable by display name.
pub trait Named {
    /// The display name.
    fn name(&self) -> &str;
}

impl Named for FileSystemItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}
