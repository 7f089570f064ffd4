// SPDX-License-Identifier: LGPL-3.0-only
use strata_core::focus::FocusTarget;
use strata_core::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use strata_core::shortcut::{Shortcut, ShortcutRegistry};

/// An action a keyboard shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplorerCommand {
    /// Copy the selection to the clipboard.
    Copy,
    /// Cut the selection to the clipboard.
    Cut,
    /// Paste into the current folder.
    Paste,
    /// Delete the selection.
    Delete,
    /// Select every displayed item.
    SelectAll,
    /// Empty the selection.
    ClearSelection,
    /// Go back in history.
    Back,
    /// Go forward in history.
    Forward,
    /// Go to the parent folder.
    Up,
    /// List the current folder again.
    Refresh,
    /// Rename the selected item.
    Rename,
    /// Create a folder in the current folder.
    NewFolder,
    /// Open the selection.
    OpenSelected,
}

impl ExplorerCommand {
    /// Commands whose shortcuts are also text-editing shortcuts.
    pub fn is_text_editing(self) -> bool {
        matches!(
            self,
            ExplorerCommand::Copy | ExplorerCommand::Cut | ExplorerCommand::Paste | ExplorerCommand::SelectAll
        )
    }
}

/// Unmodified keys a text field handles itself.
fn edits_text(shortcut: &Shortcut) -> bool {
    shortcut.modifiers.is_empty()
        && matches!(
            shortcut.key,
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Enter | KeyCode::Escape
        )
}

/// Maps key presses to [ExplorerCommand]s.
///
/// While a text input has focus, presses that would edit text resolve to
/// nothing so the input receives them.
#[derive(Debug, Clone)]
pub struct Keymap {
    registry: ShortcutRegistry<ExplorerCommand>,
    enabled: bool,
}

impl Keymap {
    /// An enabled keymap with no bindings.
    pub fn empty() -> Self {
        Self {
            registry: ShortcutRegistry::new(),
            enabled: true,
        }
    }

    /// The standard explorer bindings.
    pub fn with_defaults() -> Self {
        let mut keymap = Self::empty();
        let bindings = [
            (Shortcut::ctrl(KeyCode::KeyC), ExplorerCommand::Copy),
            (Shortcut::ctrl(KeyCode::KeyX), ExplorerCommand::Cut),
            (Shortcut::ctrl(KeyCode::KeyV), ExplorerCommand::Paste),
            (Shortcut::ctrl(KeyCode::KeyA), ExplorerCommand::SelectAll),
            (Shortcut::plain(KeyCode::Delete), ExplorerCommand::Delete),
            (Shortcut::plain(KeyCode::Escape), ExplorerCommand::ClearSelection),
            (Shortcut::alt(KeyCode::ArrowLeft), ExplorerCommand::Back),
            (Shortcut::alt(KeyCode::ArrowRight), ExplorerCommand::Forward),
            (Shortcut::alt(KeyCode::ArrowUp), ExplorerCommand::Up),
            (Shortcut::plain(KeyCode::Backspace), ExplorerCommand::Up),
            (Shortcut::plain(KeyCode::F5), ExplorerCommand::Refresh),
            (Shortcut::ctrl(KeyCode::KeyR), ExplorerCommand::Refresh),
            (Shortcut::plain(KeyCode::F2), ExplorerCommand::Rename),
            (Shortcut::ctrl_shift(KeyCode::KeyN), ExplorerCommand::NewFolder),
            (Shortcut::plain(KeyCode::Enter), ExplorerCommand::OpenSelected),
        ];
        for (shortcut, command) in bindings {
            keymap.bind(shortcut, command);
        }
        keymap
    }

    /// Bind `shortcut` to `command`, replacing any previous binding.
    pub fn bind(&mut self, shortcut: Shortcut, command: ExplorerCommand) {
        self.registry.register(shortcut, command);
    }

    /// Remove the binding of `shortcut`.
    pub fn unbind(&mut self, shortcut: &Shortcut) -> Option<ExplorerCommand> {
        self.registry.unregister(shortcut)
    }

    /// Turn dispatch on or off, e.g. for an inactive tab.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether dispatch is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A shortcut bound to `command`, for menu labels.
    pub fn shortcut_for(&self, command: ExplorerCommand) -> Option<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = self
            .registry
            .shortcuts()
            .into_iter()
            .filter(|s| self.registry.try_dispatch(&PhysicalKey::Code(s.key), s.modifiers) == Some(command))
            .collect();
        // Modified shortcuts first: "Ctrl+R" over "F5".
        shortcuts.sort_by_key(|s| (s.modifiers.is_empty(), s.to_string()));
        shortcuts.into_iter().next()
    }

    /// The command for a key press given the focused element.
    pub fn resolve(
        &self,
        key: &PhysicalKey,
        modifiers: ModifiersState,
        focus: FocusTarget,
    ) -> Option<ExplorerCommand> {
        if !self.enabled {
            return None;
        }
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let command = self.registry.try_dispatch(key, modifiers)?;

        if focus.accepts_text() && (command.is_text_editing() || edits_text(&Shortcut::new(*code, modifiers))) {
            log::trace!("{:?} left to the focused text input", command);
            return None;
        }
        Some(command)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
