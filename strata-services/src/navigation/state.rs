// SPDX-License-Identifier: LGPL-3.0-only
use serde::{Deserialize, Serialize};

/// History length used unless configured otherwise.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// What the explorer is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerView {
    /// The drives and known folders overview.
    #[default]
    #[serde(rename = "thispc")]
    ThisPc,
    /// Recently used files.
    Recents,
    /// The contents of `current_path`.
    Folder,
}

/// Current location plus back/forward history.
///
/// History behaves like a browser's: moving to a new path while not at the
/// newest entry discards the forward entries, and the oldest entries are
/// evicted once `max_history` is exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_path: String,
    current_view: ExplorerView,
    history: Vec<String>,
    history_index: Option<usize>,
    max_history: usize,
}

impl NavigationState {
    /// Empty history holding at most `max_history` entries (at least one).
    pub fn new(max_history: usize) -> Self {
        Self {
            current_path: String::new(),
            current_view: ExplorerView::default(),
            history: Vec::new(),
            history_index: None,
            max_history: max_history.max(1),
        }
    }

    /// The current path. Kept while a non-folder view is shown.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The current view.
    pub fn current_view(&self) -> ExplorerView {
        self.current_view
    }

    /// Visited paths, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Position in [NavigationState::history]; `None` while empty.
    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    /// Maximum history length.
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Whether there is an older entry to go back to.
    pub fn can_go_back(&self) -> bool {
        self.history_index.is_some_and(|i| i > 0)
    }

    /// Whether there is a newer entry to go forward to.
    pub fn can_go_forward(&self) -> bool {
        self.history_index
            .is_some_and(|i| i + 1 < self.history.len())
    }

    /// Show the folder at `path` without touching history.
    pub fn set_location(&mut self, path: &str) {
        self.current_path = path.to_string();
        self.current_view = ExplorerView::Folder;
    }

    /// Show the folder at `path` and record it in history.
    pub fn push(&mut self, path: &str) {
        match self.history_index {
            Some(index) => self.history.truncate(index + 1),
            None => self.history.clear(),
        }
        self.history.push(path.to_string());

        if self.history.len() > self.max_history {
            let evicted = self.history.len() - self.max_history;
            self.history.drain(..evicted);
        }
        self.history_index = Some(self.history.len() - 1);
        self.set_location(path);
    }

    /// Move one entry back. Returns the new path, or `None` at the oldest entry.
    pub fn step_back(&mut self) -> Option<&str> {
        let index = self.history_index.filter(|i| *i > 0)? - 1;
        self.move_to(index)
    }

    /// Move one entry forward. Returns the new path, or `None` at the newest entry.
    pub fn step_forward(&mut self) -> Option<&str> {
        let index = self.history_index.filter(|i| i + 1 < self.history.len())? + 1;
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> Option<&str> {
        let path = self.history.get(index)?.clone();
        self.history_index = Some(index);
        self.set_location(&path);
        Some(&self.current_path)
    }

    /// Switch to a non-folder view. Path and history are left alone.
    pub fn show_view(&mut self, view: ExplorerView) {
        self.current_view = view;
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut state = NavigationState::default();
        state.push("A");
        state.push("B");
        state.push("C");
        assert_eq!(state.step_back(), Some("B"));

        state.push("D");
        assert_eq!(state.history(), ["A", "B", "D"]);
        assert_eq!(state.history_index(), Some(2));
        assert!(!state.can_go_forward());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut state = NavigationState::new(2);
        state.push("A");
        state.push("B");
        state.push("C");

        assert_eq!(state.history(), ["B", "C"]);
        assert_eq!(state.history_index(), Some(1));
        assert!(state.can_go_back());
        assert_eq!(state.step_back(), Some("B"));
        assert!(!state.can_go_back());
    }

    #[test]
    fn test_empty_history() {
        let mut state = NavigationState::default();
        assert_eq!(state.history_index(), None);
        assert!(!state.can_go_back());
        assert!(!state.can_go_forward());
        assert_eq!(state.step_back(), None);
        assert_eq!(state.step_forward(), None);
    }

    #[test]
    fn test_view_switch_keeps_history() {
        let mut state = NavigationState::default();
        state.push("/home");
        state.show_view(ExplorerView::Recents);

        assert_eq!(state.current_view(), ExplorerView::Recents);
        assert_eq!(state.current_path(), "/home");
        assert_eq!(state.history(), ["/home"]);
    }
}
