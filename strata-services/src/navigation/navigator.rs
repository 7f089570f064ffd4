// SPDX-License-Identifier: LGPL-3.0-only
use super::state::{ExplorerView, NavigationState};
use crate::host::FileSystemHost;
use crate::places::KnownFolder;
use std::rc::Rc;

/// Options for [Navigator::navigate_to_path].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Record the path in history.
    pub add_to_history: bool,
    /// Ask the host whether the path exists first.
    pub validate_path: bool,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            add_to_history: true,
            validate_path: false,
        }
    }
}

/// Identifies the location a request was made for.
///
/// The token changes on every committed path change. Asynchronous results
/// carrying an outdated token are stale and must be discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NavigationToken(u64);

/// Drives [NavigationState] against the host.
///
/// Every method reports success as a `bool`. Failures are logged, never
/// returned as errors.
pub struct Navigator<H: FileSystemHost + ?Sized> {
    host: Rc<H>,
    state: NavigationState,
    token: NavigationToken,
}

impl<H: FileSystemHost + ?Sized> Navigator<H> {
    /// Create a navigator keeping at most `max_history` entries.
    pub fn new(host: Rc<H>, max_history: usize) -> Self {
        Self {
            host,
            state: NavigationState::new(max_history),
            token: NavigationToken::default(),
        }
    }

    /// The navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The current path.
    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    /// The current view.
    pub fn current_view(&self) -> ExplorerView {
        self.state.current_view()
    }

    /// Whether [Navigator::navigate_back] would move.
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Whether [Navigator::navigate_forward] would move.
    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// Token of the current location.
    pub fn token(&self) -> NavigationToken {
        self.token
    }

    /// Whether `token` still identifies the current location.
    pub fn is_current(&self, token: NavigationToken) -> bool {
        self.token == token
    }

    fn committed(&mut self) {
        self.token = NavigationToken(self.token.0.wrapping_add(1));
        log::debug!("Navigated to {}", self.state.current_path());
    }

    /// Show the folder at `path`.
    pub async fn navigate_to_path(&mut self, path: &str, options: NavigateOptions) -> bool {
        if path.is_empty() {
            log::warn!("Refusing to navigate to an empty path");
            return false;
        }

        if options.validate_path {
            match self.host.path_exists(path).await {
                Ok(true) => {},
                Ok(false) => {
                    log::warn!("Cannot navigate to {}: path does not exist", path);
                    return false;
                },
                Err(e) => {
                    log::warn!("Cannot navigate to {}: {}", path, e);
                    return false;
                },
            }
        }

        if options.add_to_history {
            self.state.push(path);
        } else {
            self.state.set_location(path);
        }
        self.committed();
        true
    }

    /// Go to the previous history entry.
    pub fn navigate_back(&mut self) -> bool {
        if self.state.step_back().is_none() {
            return false;
        }
        self.committed();
        true
    }

    /// Go to the next history entry.
    pub fn navigate_forward(&mut self) -> bool {
        if self.state.step_forward().is_none() {
            return false;
        }
        self.committed();
        true
    }

    /// Go to the parent of the current path.
    pub async fn navigate_up(&mut self) -> bool {
        let current = self.state.current_path().to_string();
        if current.is_empty() {
            return false;
        }
        match self.host.parent_directory(&current).await {
            Ok(Some(parent)) if !parent.is_empty() => {
                self.navigate_to_path(&parent, NavigateOptions::default()).await
            },
            Ok(_) => {
                log::debug!("{} has no parent", current);
                false
            },
            Err(e) => {
                log::warn!("Failed to resolve the parent of {}: {}", current, e);
                false
            },
        }
    }

    /// Go to a known folder.
    pub async fn navigate_to_known_folder(&mut self, folder: KnownFolder) -> bool {
        match self.host.resolve_known_folder(folder).await {
            Ok(path) => self.navigate_to_path(&path, NavigateOptions::default()).await,
            Err(e) => {
                log::warn!("Failed to resolve {}: {}", folder, e);
                false
            },
        }
    }

    /// Show the drives overview. History is left alone.
    pub fn navigate_to_this_pc(&mut self) -> bool {
        self.state.show_view(ExplorerView::ThisPc);
        true
    }

    /// Show recent files. History is left alone.
    pub fn navigate_to_recents(&mut self) -> bool {
        self.state.show_view(ExplorerView::Recents);
        true
    }
}
