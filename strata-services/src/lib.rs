// SPDX-License-Identifier: LGPL-3.0-only
pub mod clipboard;
pub mod config;
pub mod explorer;
pub mod filesystem;
pub mod host;
pub mod navigation;
pub mod operations;
pub mod places;
pub mod search;
pub mod selection;
pub mod settings;
pub mod sort_preferences;

// Re-export commonly used types
pub use clipboard::{ClipboardChannel, ClipboardOperation, ClipboardState};
pub use config::ExplorerConfig;
pub use explorer::{CommandOutcome, ExplorerCommand, ExplorerSession, Keymap};
pub use filesystem::{natural_cmp, FileSystemItem, ItemType};
pub use host::{Host, HostError, HostResult, ListOptions};
pub use navigation::{ExplorerView, NavigateOptions, Navigator};
pub use operations::{FileOperations, OperationError, OperationResult};
pub use places::{reload_known_folders, KnownFolder};
pub use search::{SearchIndex, SearchMode};
pub use selection::SelectionManager;
pub use settings::{SettingsError, SettingsSession};
pub use sort_preferences::{SortCriteria, SortPreference, SortPreferenceStore};
