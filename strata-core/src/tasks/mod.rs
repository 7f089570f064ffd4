// SPDX-License-Identifier: MIT OR Apache-2.0
//! Utilities for running async work from UI event handlers.

mod debounce;

pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
