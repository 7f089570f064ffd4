// SPDX-License-Identifier: LGPL-3.0-only
//! Single, toggle and range selection over the displayed items.

use crate::filesystem::entry::FileSystemItem;
use std::collections::HashSet;

/// Ordered selection, unique by path.
///
/// Items may outlive the listing they were picked from; call
/// [SelectionManager::reconcile] after a refresh.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<FileSystemItem>,
    anchor: Option<String>,
}

impl SelectionManager {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected items in selection order.
    pub fn selected(&self) -> &[FileSystemItem] {
        &self.selected
    }

    /// Paths of the selected items.
    pub fn selected_paths(&self) -> Vec<String> {
        self.selected.iter().map(|item| item.path.clone()).collect()
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Path of the item range selection extends from.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Whether an item with the same path is selected.
    pub fn is_selected(&self, item: &FileSystemItem) -> bool {
        self.contains_path(&item.path)
    }

    fn contains_path(&self, path: &str) -> bool {
        self.selected.iter().any(|s| s.path == path)
    }

    /// Click on `item`: replace the selection, or with `multi_select` toggle
    /// the item and leave the rest alone.
    pub fn select_file(&mut self, item: &FileSystemItem, multi_select: bool) {
        if !multi_select {
            self.selected = vec![item.clone()];
        } else if let Some(index) = self.selected.iter().position(|s| s.path == item.path) {
            self.selected.remove(index);
        } else {
            self.selected.push(item.clone());
        }
        self.anchor = Some(item.path.clone());
    }

    /// Replace the selection. Duplicate paths are dropped.
    pub fn select_files(&mut self, items: &[FileSystemItem]) {
        let mut seen = HashSet::with_capacity(items.len());
        self.selected = items
            .iter()
            .filter(|item| seen.insert(item.path.as_str()))
            .cloned()
            .collect();
    }

    /// Select every displayed item.
    pub fn select_all(&mut self, displayed: &[FileSystemItem]) {
        self.select_files(displayed);
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Shift-click on `target`: add every displayed item between the anchor
    /// and `target`, inclusive, to the selection.
    ///
    /// Falls back to selecting only `target` when there is no anchor or
    /// either end is not displayed. The anchor stays where it was.
    pub fn select_range(&mut self, target: &FileSystemItem, displayed: &[FileSystemItem]) {
        let position = |path: &str| displayed.iter().position(|item| item.path == path);
        let bounds = self
            .anchor
            .as_deref()
            .and_then(position)
            .zip(position(&target.path));

        let Some((from, to)) = bounds else {
            log::debug!("Range end not displayed, selecting {} only", target.path);
            self.select_file(target, false);
            return;
        };

        let (low, high) = if from <= to { (from, to) } else { (to, from) };
        for item in &displayed[low..=high] {
            if !self.contains_path(&item.path) {
                self.selected.push(item.clone());
            }
        }
    }

    /// Drop selected items that are no longer displayed and pick up fresh
    /// metadata for the rest.
    pub fn reconcile(&mut self, displayed: &[FileSystemItem]) {
        self.selected = self
            .selected
            .iter()
            .filter_map(|s| displayed.iter().find(|item| item.path == s.path).cloned())
            .collect();
        if let Some(anchor) = &self.anchor {
            if !displayed.iter().any(|item| &item.path == anchor) {
                self.anchor = None;
            }
        }
    }
}
