// SPDX-License-Identifier: LGPL-3.0-only
//! Process-wide clipboard state shared by every explorer surface.

use serde::{Deserialize, Serialize};
use strata_core::signal::{Observable, StateSignal, Subscription};

/// Pending clipboard intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardOperation {
    /// Paste duplicates the files.
    Copy,
    /// Paste moves the files.
    Cut,
}

/// What is on the clipboard. Copy and cut never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardState {
    /// Pending operation, `None` when empty.
    pub operation: Option<ClipboardOperation>,
    /// Source paths.
    pub files: Vec<String>,
}

impl ClipboardState {
    /// Files staged for copying.
    pub fn copy(files: Vec<String>) -> Self {
        Self {
            operation: Some(ClipboardOperation::Copy),
            files,
        }
    }

    /// Files staged for moving.
    pub fn cut(files: Vec<String>) -> Self {
        Self {
            operation: Some(ClipboardOperation::Cut),
            files,
        }
    }

    /// Nothing staged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.operation.is_none()
    }

    /// Whether `path` is staged for moving.
    pub fn is_cut(&self, path: &str) -> bool {
        self.operation == Some(ClipboardOperation::Cut) && self.files.iter().any(|f| f == path)
    }
}

/// Broadcast channel for [ClipboardState].
///
/// Clones share the same state. Only the file operations mutate it;
/// everything else observes. New subscribers receive the current state
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct ClipboardChannel {
    state: StateSignal<ClipboardState>,
}

impl ClipboardChannel {
    /// Create a channel holding an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current clipboard state.
    pub fn state(&self) -> ClipboardState {
        self.state.get_cloned()
    }

    /// Observe the clipboard. The listener is called right away with the
    /// current state, then after every change, in broadcast order.
    pub fn subscribe(&self, listener: impl Fn(&ClipboardState) + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.state.listener_count()
    }

    pub(crate) fn broadcast(&self, state: ClipboardState) {
        log::debug!(
            "Clipboard now {:?} with {} file(s)",
            state.operation,
            state.files.len()
        );
        self.state.set(state);
    }
}

impl Observable<ClipboardState> for ClipboardChannel {
    fn get_value(&self) -> ClipboardState {
        self.state()
    }

    fn subscribe_value(&self, listener: Box<dyn Fn(&ClipboardState)>) -> Subscription {
        self.subscribe(listener)
    }
}
