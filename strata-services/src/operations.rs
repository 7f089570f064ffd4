// SPDX-License-Identifier: LGPL-3.0-only
//! Clipboard and file operations against the host.
//!
//! Each operation validates its input, calls exactly one host method and
//! reports the outcome as an [OperationResult]. Host rejections are logged
//! and returned, never panicked on.

use crate::clipboard::{ClipboardChannel, ClipboardState};
use crate::filesystem::entry::FileSystemItem;
use crate::host::{ClipboardHost, HostError, MutationHost, ShellHost};
use std::rc::Rc;
use thiserror::Error;

/// Why an operation did not happen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The operation needs at least one file.
    #[error("No files selected")]
    NothingSelected,

    /// A name was empty or blank.
    #[error("Name must not be empty")]
    EmptyName,

    /// A name contained a path separator or a reserved character.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// The operation needs a destination folder.
    #[error("No destination folder")]
    NoDestination,

    /// The host rejected the call.
    #[error("{operation} failed: {message}")]
    Host {
        /// Operation that failed.
        operation: &'static str,
        /// The host's message.
        message: String,
    },
}

/// Paths affected by a successful operation, or why it failed.
pub type OperationResult = Result<Vec<String>, OperationError>;

const RESERVED_CHARACTERS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*', '\0'];

/// Check a new file or folder name.
pub fn validate_name(name: &str) -> Result<&str, OperationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OperationError::EmptyName);
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(RESERVED_CHARACTERS) {
        return Err(OperationError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

fn host_failure(operation: &'static str, error: HostError) -> OperationError {
    log::warn!("{} failed: {}", operation, error);
    OperationError::Host {
        operation,
        message: error.to_string(),
    }
}

fn paths_of(items: &[FileSystemItem]) -> Result<Vec<String>, OperationError> {
    if items.is_empty() {
        return Err(OperationError::NothingSelected);
    }
    Ok(items.iter().map(|item| item.path.clone()).collect())
}

/// Orchestrates clipboard and file operations and keeps the shared
/// [ClipboardChannel] consistent with them.
pub struct FileOperations<H: ClipboardHost + MutationHost + ShellHost + ?Sized> {
    host: Rc<H>,
    clipboard: ClipboardChannel,
    on_refresh: Option<Box<dyn Fn()>>,
}

impl<H: ClipboardHost + MutationHost + ShellHost + ?Sized> FileOperations<H> {
    /// Create the orchestrator broadcasting on `clipboard`.
    pub fn new(host: Rc<H>, clipboard: ClipboardChannel) -> Self {
        Self {
            host,
            clipboard,
            on_refresh: None,
        }
    }

    /// Set the callback run after an operation changed the current directory.
    pub fn set_refresh_callback(&mut self, callback: impl Fn() + 'static) {
        self.on_refresh = Some(Box::new(callback));
    }

    /// The shared clipboard channel.
    pub fn clipboard(&self) -> &ClipboardChannel {
        &self.clipboard
    }

    fn refresh(&self) {
        if let Some(callback) = &self.on_refresh {
            callback();
        }
    }

    /// Stage `items` for copying. Replaces any pending cut.
    pub async fn copy_files(&self, items: &[FileSystemItem]) -> OperationResult {
        let paths = paths_of(items)?;
        self.host
            .copy(&paths)
            .await
            .map_err(|e| host_failure("copy", e))?;
        self.clipboard.broadcast(ClipboardState::copy(paths.clone()));
        Ok(paths)
    }

    /// Stage `items` for moving. Replaces any pending copy.
    pub async fn cut_files(&self, items: &[FileSystemItem]) -> OperationResult {
        let paths = paths_of(items)?;
        self.host
            .cut(&paths)
            .await
            .map_err(|e| host_failure("cut", e))?;
        self.clipboard.broadcast(ClipboardState::cut(paths.clone()));
        Ok(paths)
    }

    /// Paste the clipboard into `destination`.
    ///
    /// Success empties the clipboard. Failure leaves it as it was, so the
    /// paste can be retried.
    pub async fn paste_files(&self, destination: &str) -> OperationResult {
        if destination.trim().is_empty() {
            return Err(OperationError::NoDestination);
        }
        let pasted = self
            .host
            .paste(destination)
            .await
            .map_err(|e| host_failure("paste", e))?;
        self.clipboard.broadcast(ClipboardState::empty());
        self.refresh();
        Ok(pasted)
    }

    /// Empty the clipboard.
    pub async fn clear_clipboard(&self) -> Result<(), OperationError> {
        self.host
            .clear()
            .await
            .map_err(|e| host_failure("clear clipboard", e))?;
        self.clipboard.broadcast(ClipboardState::empty());
        Ok(())
    }

    /// Pull the host clipboard into the shared channel, for changes made
    /// outside the explorer.
    pub async fn sync_clipboard(&self) -> Result<ClipboardState, OperationError> {
        let state = self
            .host
            .state()
            .await
            .map_err(|e| host_failure("read clipboard", e))?;
        if state != self.clipboard.state() {
            self.clipboard.broadcast(state.clone());
        }
        Ok(state)
    }

    /// Delete `items`.
    pub async fn delete_files(&self, items: &[FileSystemItem]) -> OperationResult {
        let paths = paths_of(items)?;
        self.host
            .delete(&paths)
            .await
            .map_err(|e| host_failure("delete", e))?;
        self.refresh();
        Ok(paths)
    }

    /// Rename `item` within its directory.
    pub async fn rename_file(&self, item: &FileSystemItem, new_name: &str) -> OperationResult {
        let new_name = validate_name(new_name)?;
        let renamed = self
            .host
            .rename(&item.path, new_name)
            .await
            .map_err(|e| host_failure("rename", e))?;
        self.refresh();
        Ok(vec![renamed])
    }

    /// Create folder `name` inside `parent`.
    pub async fn create_folder(&self, parent: &str, name: &str) -> OperationResult {
        if parent.trim().is_empty() {
            return Err(OperationError::NoDestination);
        }
        let name = validate_name(name)?;
        let created = self
            .host
            .create_folder(parent, name)
            .await
            .map_err(|e| host_failure("create folder", e))?;
        self.refresh();
        Ok(vec![created])
    }

    /// Open `item` with its default application.
    ///
    /// With `fast`, the host is not waited on and failures are not reported.
    pub async fn open_file(&self, item: &FileSystemItem, fast: bool) -> OperationResult {
        if fast {
            self.host.open_file_fast(&item.path);
        } else {
            self.host
                .open_file(&item.path)
                .await
                .map_err(|e| host_failure("open", e))?;
        }
        Ok(vec![item.path.clone()])
    }

    /// Show the properties of `item`.
    pub async fn show_properties(&self, item: &FileSystemItem) -> OperationResult {
        self.host
            .show_properties(&item.path)
            .await
            .map_err(|e| host_failure("show properties", e))?;
        Ok(vec![item.path.clone()])
    }

    /// Reveal `item` in the platform file manager.
    pub async fn show_in_explorer(&self, item: &FileSystemItem) -> OperationResult {
        self.host
            .show_in_explorer(&item.path)
            .await
            .map_err(|e| host_failure("show in explorer", e))?;
        Ok(vec![item.path.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  report.txt "), Ok("report.txt"));
        assert_eq!(validate_name("   "), Err(OperationError::EmptyName));
        assert!(matches!(validate_name("a/b"), Err(OperationError::InvalidName(_))));
        assert!(matches!(validate_name(".."), Err(OperationError::InvalidName(_))));
        assert!(matches!(validate_name("what?"), Err(OperationError::InvalidName(_))));
    }

    #[test]
    fn test_host_error_message_is_kept() {
        let error = host_failure("paste", HostError::Rejected(String::from("disk full")));
        assert_eq!(error.to_string(), "paste failed: disk full");
    }
}
