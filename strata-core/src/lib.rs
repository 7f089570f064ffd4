// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Core library for strata => See `strata` crate.
//!
//! Contains the reactive, input and persistence primitives the explorer
//! services are built on.

/// Contains useful types for interacting with winit keyboard input.
pub mod keyboard {
    pub use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
}

/// Contains the signal system for observable state.
pub mod signal;

/// Contains the keyboard shortcut registry.
pub mod shortcut;

/// Contains focus tracking used to guard text-editing shortcuts.
pub mod focus;

/// Contains debouncing for live-typing entry points.
pub mod tasks;

/// Contains the snapshot/apply/commit-or-rollback helper.
pub mod transaction;

/// Contains durable key-value storage backends.
pub mod storage;
