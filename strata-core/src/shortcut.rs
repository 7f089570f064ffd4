// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyboard shortcut infrastructure for strata

use std::collections::HashMap;
use std::fmt;
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// A keyboard shortcut consisting of a key code and modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// The physical key code
    pub key: KeyCode,
    /// Modifier keys that must be pressed
    pub modifiers: ModifiersState,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(key: KeyCode, modifiers: ModifiersState) -> Self {
        Self {
            key,
            modifiers: normalize(modifiers),
        }
    }

    /// Create a shortcut without modifiers
    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, ModifiersState::empty())
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(key: KeyCode) -> Self {
        Self::new(key, ModifiersState::CONTROL)
    }

    /// Create a shortcut with Alt modifier
    pub fn alt(key: KeyCode) -> Self {
        Self::new(key, ModifiersState::ALT)
    }

    /// Create a shortcut with Shift modifier
    pub fn shift(key: KeyCode) -> Self {
        Self::new(key, ModifiersState::SHIFT)
    }

    /// Create a shortcut with Ctrl+Shift modifiers
    pub fn ctrl_shift(key: KeyCode) -> Self {
        Self::new(key, ModifiersState::CONTROL | ModifiersState::SHIFT)
    }

    /// Check if a physical key and current modifier state matches this shortcut.
    ///
    /// Modifiers must match exactly: Ctrl+Shift+C does not trigger Ctrl+C.
    pub fn matches(&self, physical_key: &PhysicalKey, current_modifiers: ModifiersState) -> bool {
        if let PhysicalKey::Code(key_code) = physical_key {
            *key_code == self.key && normalize(current_modifiers) == self.modifiers
        } else {
            false
        }
    }
}

/// Keep only the four modifiers shortcuts care about.
fn normalize(modifiers: ModifiersState) -> ModifiersState {
    modifiers
        & (ModifiersState::CONTROL
            | ModifiersState::ALT
            | ModifiersState::SHIFT
            | ModifiersState::SUPER)
}

impl fmt::Display for Shortcut {
    /// Format shortcut as a string (e.g., "Ctrl+N")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.control_key() {
            parts.push("Ctrl");
        }
        if self.modifiers.alt_key() {
            parts.push("Alt");
        }
        if self.modifiers.shift_key() {
            parts.push("Shift");
        }
        if self.modifiers.super_key() {
            parts.push("Super");
        }

        let key_str = key_code_to_string(self.key);
        parts.push(&key_str);

        write!(f, "{}", parts.join("+"))
    }
}

/// Convert a KeyCode to a display string
fn key_code_to_string(key: KeyCode) -> String {
    use KeyCode::*;
    let named = match key {
        Escape => "Esc",
        Enter => "Enter",
        Tab => "Tab",
        Backspace => "Backspace",
        Delete => "Delete",
        ArrowUp => "Up",
        ArrowDown => "Down",
        ArrowLeft => "Left",
        ArrowRight => "Right",
        Home => "Home",
        End => "End",
        PageUp => "PageUp",
        PageDown => "PageDown",
        Insert => "Insert",
        F1 => "F1",
        F2 => "F2",
        F3 => "F3",
        F4 => "F4",
        F5 => "F5",
        F6 => "F6",
        F7 => "F7",
        F8 => "F8",
        F9 => "F9",
        F10 => "F10",
        F11 => "F11",
        F12 => "F12",
        _ => "",
    };
    if !named.is_empty() {
        return named.to_string();
    }

    // KeyA..KeyZ and Digit0..Digit9 debug-format as "KeyA" / "Digit0".
    let debug = format!("{:?}", key);
    if let Some(letter) = debug.strip_prefix("Key") {
        return letter.to_string();
    }
    if let Some(digit) = debug.strip_prefix("Digit") {
        return digit.to_string();
    }
    String::from("?")
}

/// Registry mapping keyboard shortcuts to action values.
///
/// Actions are plain values (usually a command enum) rather than callbacks, so
/// the owner decides how and when to run them.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry<A: Clone> {
    shortcuts: HashMap<Shortcut, A>,
}

impl<A: Clone> Default for ShortcutRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> ShortcutRegistry<A> {
    /// Create a new shortcut registry
    pub fn new() -> Self {
        Self {
            shortcuts: HashMap::new(),
        }
    }

    /// Register a shortcut, replacing any action previously bound to it
    pub fn register(&mut self, shortcut: Shortcut, action: A) {
        self.shortcuts.insert(shortcut, action);
    }

    /// Unregister a shortcut
    pub fn unregister(&mut self, shortcut: &Shortcut) -> Option<A> {
        self.shortcuts.remove(shortcut)
    }

    /// Check if a shortcut is registered
    pub fn is_registered(&self, shortcut: &Shortcut) -> bool {
        self.shortcuts.contains_key(shortcut)
    }

    /// Look up the action for a physical key and modifier state
    pub fn try_dispatch(&self, physical_key: &PhysicalKey, modifiers: ModifiersState) -> Option<A> {
        let PhysicalKey::Code(key) = physical_key else {
            return None;
        };
        self.shortcuts.get(&Shortcut::new(*key, modifiers)).cloned()
    }

    /// Get all registered shortcuts
    pub fn shortcuts(&self) -> Vec<Shortcut> {
        self.shortcuts.keys().copied().collect()
    }
}
