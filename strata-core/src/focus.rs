// SPDX-License-Identifier: MIT OR Apache-2.0
//! Focus tracking shared between the view layer and keyboard dispatch.

use std::cell::Cell;
use std::rc::Rc;

/// What kind of element currently holds keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing is focused.
    #[default]
    None,
    /// A text-accepting element (search box, rename field, address bar).
    TextInput,
    /// The item list or grid.
    ItemList,
    /// Any other focusable element.
    Other,
}

impl FocusTarget {
    /// Whether this target consumes text-editing shortcuts itself.
    pub fn accepts_text(self) -> bool {
        matches!(self, FocusTarget::TextInput)
    }
}

/// Cloneable handle to the current focus target.
///
/// The view layer reports focus changes, keyboard dispatch reads them.
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    current: Rc<Cell<FocusTarget>>,
}

impl FocusTracker {
    /// Create a tracker with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that `target` gained focus.
    pub fn set_focus(&self, target: FocusTarget) {
        self.current.set(target);
    }

    /// Report that focus left the element; nothing is focused afterwards.
    pub fn clear(&self) {
        self.current.set(FocusTarget::None);
    }

    /// The element currently focused.
    pub fn current(&self) -> FocusTarget {
        self.current.get()
    }

    /// Whether a text input currently has focus.
    pub fn text_input_focused(&self) -> bool {
        self.current.get().accepts_text()
    }
}
