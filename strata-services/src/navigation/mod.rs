// SPDX-License-Identifier: LGPL-3.0-only
//! Location, view and back/forward history of an explorer session.

mod breadcrumbs;
mod navigator;
mod state;

pub use breadcrumbs::{generate_breadcrumbs, Breadcrumb};
pub use navigator::{NavigateOptions, NavigationToken, Navigator};
pub use state::{ExplorerView, NavigationState, DEFAULT_MAX_HISTORY};
