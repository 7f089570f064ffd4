#![warn(missing_docs)]

//! The client-side core of a file explorer: navigation, listing order,
//! search, selection, clipboard and file operations.
//!
//! The host process provides the filesystem through the traits in
//! [services::host]; everything else runs on one event loop.

pub use strata_core as core;
pub use strata_services as services;

/// A "prelude" for users of strata.
///
/// Importing this module brings into scope the most common types
/// needed to drive an explorer session.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::focus::{FocusTarget, FocusTracker};
    pub use crate::core::keyboard::{KeyCode, ModifiersState, PhysicalKey};
    pub use crate::core::shortcut::Shortcut;
    pub use crate::core::signal::{Observable, Subscription};
    pub use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};

    // Host
    pub use crate::services::host::{
        ClipboardHost, FileSystemHost, Host, HostError, HostResult, ListOptions, MutationHost, SettingsHost,
        ShellHost,
    };
    #[cfg(feature = "local-host")]
    pub use crate::services::host::LocalHost;

    // Session
    pub use crate::services::clipboard::{ClipboardChannel, ClipboardOperation, ClipboardState};
    pub use crate::services::config::ExplorerConfig;
    pub use crate::services::explorer::{CommandOutcome, ExplorerCommand, ExplorerSession, Keymap};
    pub use crate::services::filesystem::{natural_cmp, FileSystemItem, ItemType};
    pub use crate::services::navigation::{Breadcrumb, ExplorerView, NavigateOptions};
    pub use crate::services::operations::{OperationError, OperationResult};
    pub use crate::services::places::KnownFolder;
    pub use crate::services::search::SearchMode;
    pub use crate::services::selection::SelectionManager;
    pub use crate::services::settings::SettingsSession;

    // Sorting
    pub use crate::services::sort_preferences::{
        SortAlgorithm, SortCriteria, SortDirection, SortField, SortPreferenceStore, SortProfile,
    };
}
