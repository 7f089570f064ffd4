// SPDX-License-Identifier: LGPL-3.0-only
//! The explorer facade and its keyboard dispatch.

mod keymap;
mod session;

pub use keymap::{ExplorerCommand, Keymap};
pub use session::{CommandOutcome, ExplorerSession, ListingRequest};
