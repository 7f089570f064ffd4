// SPDX-License-Identifier: LGPL-3.0-only
use super::keymap::{ExplorerCommand, Keymap};
use crate::clipboard::ClipboardChannel;
use crate::config::ExplorerConfig;
use crate::filesystem::entry::FileSystemItem;
use crate::host::{Host, HostResult, ListOptions};
use crate::navigation::{generate_breadcrumbs, Breadcrumb, ExplorerView, NavigateOptions, NavigationToken, Navigator};
use crate::operations::{FileOperations, OperationError, OperationResult};
use crate::places::KnownFolder;
use crate::search::{SearchIndex, SearchMode};
use crate::selection::SelectionManager;
use crate::sort_preferences::{SortCriteria, SortPreferenceStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use strata_core::focus::FocusTracker;
use strata_core::keyboard::{ModifiersState, PhysicalKey};

/// What running an [ExplorerCommand] did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A file operation ran.
    Operation(OperationResult),
    /// A navigation ran; `false` when the location did not change.
    Navigated(bool),
    /// The selection changed.
    SelectionChanged,
    /// The listing was reloaded; `false` when it was not.
    Refreshed(bool),
    /// The view should ask for a new name for this item.
    RenameRequested(FileSystemItem),
    /// The view should ask for the name of a folder to create in this path.
    NewFolderRequested(String),
    /// Nothing applicable to act on.
    Ignored,
}

/// A directory listing requested for one location.
///
/// Obtained from [ExplorerSession::begin_listing]. Committing it after the
/// session moved elsewhere has no effect.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    token: NavigationToken,
    path: String,
    options: ListOptions,
}

impl ListingRequest {
    /// Folder being listed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Location the request was made for.
    pub fn token(&self) -> NavigationToken {
        self.token
    }
}

/// One explorer tab: navigation, listing, selection, search and file
/// operations behind a single object, plus keyboard dispatch.
pub struct ExplorerSession<H: Host + ?Sized> {
    host: Rc<H>,
    config: ExplorerConfig,
    navigator: Navigator<H>,
    selection: SelectionManager,
    operations: FileOperations<H>,
    search: SearchIndex<FileSystemItem>,
    search_term: RefCell<String>,
    search_mode: Cell<SearchMode>,
    sort_preferences: Option<Rc<SortPreferenceStore>>,
    keymap: Keymap,
    focus: FocusTracker,
    items: Vec<FileSystemItem>,
    needs_refresh: Rc<Cell<bool>>,
}

impl<H: Host + ?Sized> ExplorerSession<H> {
    /// Create a session sharing `clipboard` with the other sessions.
    pub fn new(host: Rc<H>, clipboard: ClipboardChannel, config: ExplorerConfig) -> Self {
        let needs_refresh = Rc::new(Cell::new(false));
        let mut operations = FileOperations::new(host.clone(), clipboard);
        let flag = needs_refresh.clone();
        operations.set_refresh_callback(move || flag.set(true));

        let mut keymap = Keymap::with_defaults();
        keymap.set_enabled(config.keyboard_enabled);

        Self {
            navigator: Navigator::new(host.clone(), config.max_history),
            search: SearchIndex::with_settings(Vec::new(), config.search_cache_capacity, config.search_debounce),
            host,
            config,
            selection: SelectionManager::new(),
            operations,
            search_term: RefCell::new(String::new()),
            search_mode: Cell::new(SearchMode::default()),
            sort_preferences: None,
            keymap,
            focus: FocusTracker::new(),
            items: Vec::new(),
            needs_refresh,
        }
    }

    /// Order listings with `store`.
    pub fn with_sort_preferences(mut self, store: Rc<SortPreferenceStore>) -> Self {
        self.sort_preferences = Some(store);
        self
    }

    /// Share focus state with the view layer.
    pub fn with_focus_tracker(mut self, focus: FocusTracker) -> Self {
        self.focus = focus;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Navigation state and history.
    pub fn navigator(&self) -> &Navigator<H> {
        &self.navigator
    }

    /// The current path.
    pub fn current_path(&self) -> &str {
        self.navigator.current_path()
    }

    /// The current view.
    pub fn current_view(&self) -> ExplorerView {
        self.navigator.current_view()
    }

    /// Path bar segments of the current path.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        generate_breadcrumbs(self.navigator.current_path())
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// The file operation orchestrator.
    pub fn operations(&self) -> &FileOperations<H> {
        &self.operations
    }

    /// The shared clipboard.
    pub fn clipboard(&self) -> &ClipboardChannel {
        self.operations.clipboard()
    }

    /// The keymap, for rebinding or disabling shortcuts.
    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Focus state consulted by keyboard dispatch.
    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    /// Every item of the current listing, in display order.
    pub fn items(&self) -> &[FileSystemItem] {
        &self.items
    }

    /// The items shown: the listing filtered by the search term.
    pub fn displayed_items(&self) -> Vec<FileSystemItem> {
        self.search.search(&self.search_term.borrow(), self.search_mode.get())
    }

    /// The active search term.
    pub fn search_term(&self) -> String {
        self.search_term.borrow().clone()
    }

    /// Filter the listing by `term`.
    pub fn set_search(&self, term: &str, mode: SearchMode) {
        self.search.cancel_pending();
        *self.search_term.borrow_mut() = term.to_string();
        self.search_mode.set(mode);
    }

    /// Filter the listing by `term` once typing pauses.
    ///
    /// Returns the displayed items, or `None` when a newer keystroke
    /// superseded this one.
    pub async fn search_as_you_type(&self, term: &str, mode: SearchMode) -> Option<Vec<FileSystemItem>> {
        let results = self.search.search_debounced(term, mode).await?;
        *self.search_term.borrow_mut() = term.to_string();
        self.search_mode.set(mode);
        Some(results)
    }

    // Navigation

    async fn after_navigation(&mut self, moved: bool) -> bool {
        if moved {
            self.selection.clear_selection();
            self.set_search("", self.search_mode.get());
            self.refresh().await;
        }
        moved
    }

    /// Show the folder at `path`.
    pub async fn navigate_to_path(&mut self, path: &str) -> bool {
        self.navigate_with(path, NavigateOptions::default()).await
    }

    /// Show the folder at `path` with explicit options.
    pub async fn navigate_with(&mut self, path: &str, options: NavigateOptions) -> bool {
        let moved = self.navigator.navigate_to_path(path, options).await;
        self.after_navigation(moved).await
    }

    /// Go back in history.
    pub async fn navigate_back(&mut self) -> bool {
        let moved = self.navigator.navigate_back();
        self.after_navigation(moved).await
    }

    /// Go forward in history.
    pub async fn navigate_forward(&mut self) -> bool {
        let moved = self.navigator.navigate_forward();
        self.after_navigation(moved).await
    }

    /// Go to the parent folder.
    pub async fn navigate_up(&mut self) -> bool {
        let moved = self.navigator.navigate_up().await;
        self.after_navigation(moved).await
    }

    /// Go to a known folder.
    pub async fn navigate_to_known_folder(&mut self, folder: KnownFolder) -> bool {
        let moved = self.navigator.navigate_to_known_folder(folder).await;
        self.after_navigation(moved).await
    }

    /// Show the drives overview.
    pub fn navigate_to_this_pc(&mut self) -> bool {
        self.selection.clear_selection();
        self.navigator.navigate_to_this_pc()
    }

    /// Show recent files.
    pub fn navigate_to_recents(&mut self) -> bool {
        self.selection.clear_selection();
        self.navigator.navigate_to_recents()
    }

    // Listing

    fn list_options(&self) -> ListOptions {
        ListOptions {
            show_hidden: self.config.show_hidden,
            folders_first: self.config.folders_first,
            sort: None,
            max_items: self.config.max_items,
        }
    }

    /// Start listing the current folder. `None` unless a folder is shown.
    pub fn begin_listing(&self) -> Option<ListingRequest> {
        if self.navigator.current_view() != ExplorerView::Folder {
            return None;
        }
        Some(ListingRequest {
            token: self.navigator.token(),
            path: self.navigator.current_path().to_string(),
            options: self.list_options(),
        })
    }

    /// Ask the host for the entries of a requested listing.
    pub async fn fetch_listing(&self, request: &ListingRequest) -> HostResult<Vec<FileSystemItem>> {
        self.host.list_directory(&request.path, &request.options).await
    }

    /// Show a fetched listing, unless the session has moved on since the
    /// request was made. Returns whether the listing was shown.
    pub fn commit_listing(&mut self, request: ListingRequest, result: HostResult<Vec<FileSystemItem>>) -> bool {
        if !self.navigator.is_current(request.token) {
            log::debug!("Discarding stale listing of {}", request.path);
            return false;
        }

        let mut items = match result {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Failed to list {}: {}", request.path, e);
                return false;
            },
        };
        if let Some(store) = &self.sort_preferences {
            store.sort_listing(&request.path, &mut items, self.config.folders_first);
        }

        self.selection.reconcile(&items);
        self.search.set_items(items.clone());
        self.items = items;
        true
    }

    /// List the current folder again.
    pub async fn refresh(&mut self) -> bool {
        self.needs_refresh.set(false);
        let Some(request) = self.begin_listing() else {
            return false;
        };
        let result = self.fetch_listing(&request).await;
        self.commit_listing(request, result)
    }

    async fn refresh_if_needed(&mut self) {
        if self.needs_refresh.get() {
            self.refresh().await;
        }
    }

    // Sorting

    /// Store sort criteria for the current folder and reorder the listing.
    /// Does nothing without a preference store.
    pub fn set_folder_sort(&mut self, primary: SortCriteria, secondary: Option<SortCriteria>) -> bool {
        let Some(store) = &self.sort_preferences else {
            return false;
        };
        store.set_folder_preference(self.navigator.current_path(), primary, secondary);
        self.resort();
        true
    }

    /// Reorder the listing with the effective preference of the current folder.
    pub fn resort(&mut self) {
        let Some(store) = &self.sort_preferences else {
            return;
        };
        let mut items = std::mem::take(&mut self.items);
        store.sort_listing(self.navigator.current_path(), &mut items, self.config.folders_first);
        self.search.set_items(items.clone());
        self.items = items;
    }

    // Selection

    /// Click on `item`.
    pub fn select_file(&mut self, item: &FileSystemItem, multi_select: bool) {
        self.selection.select_file(item, multi_select);
    }

    /// Shift-click on `item`, over the displayed items.
    pub fn select_range(&mut self, item: &FileSystemItem) {
        let displayed = self.displayed_items();
        self.selection.select_range(item, &displayed);
    }

    /// Select every displayed item.
    pub fn select_all(&mut self) {
        let displayed = self.displayed_items();
        self.selection.select_all(&displayed);
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    // File operations

    /// Copy the selection to the clipboard.
    pub async fn copy_selected(&mut self) -> OperationResult {
        self.operations.copy_files(self.selection.selected()).await
    }

    /// Cut the selection to the clipboard.
    pub async fn cut_selected(&mut self) -> OperationResult {
        self.operations.cut_files(self.selection.selected()).await
    }

    /// Paste the clipboard into the current folder.
    pub async fn paste(&mut self) -> OperationResult {
        if self.navigator.current_view() != ExplorerView::Folder {
            return Err(OperationError::NoDestination);
        }
        let destination = self.navigator.current_path().to_string();
        let result = self.operations.paste_files(&destination).await;
        self.refresh_if_needed().await;
        result
    }

    /// Delete the selection.
    pub async fn delete_selected(&mut self) -> OperationResult {
        let result = self.operations.delete_files(self.selection.selected()).await;
        if result.is_ok() {
            self.selection.clear_selection();
        }
        self.refresh_if_needed().await;
        result
    }

    /// Rename `item`.
    pub async fn rename(&mut self, item: &FileSystemItem, new_name: &str) -> OperationResult {
        let result = self.operations.rename_file(item, new_name).await;
        self.refresh_if_needed().await;
        result
    }

    /// Rename the single selected item.
    pub async fn rename_selected(&mut self, new_name: &str) -> OperationResult {
        let item = match self.selection.selected() {
            [item] => item.clone(),
            _ => return Err(OperationError::NothingSelected),
        };
        self.rename(&item, new_name).await
    }

    /// Create folder `name` in the current folder.
    pub async fn create_folder(&mut self, name: &str) -> OperationResult {
        if self.navigator.current_view() != ExplorerView::Folder {
            return Err(OperationError::NoDestination);
        }
        let parent = self.navigator.current_path().to_string();
        let result = self.operations.create_folder(&parent, name).await;
        self.refresh_if_needed().await;
        result
    }

    /// Open `item`: folders are navigated into, files are opened without
    /// waiting.
    pub async fn open(&mut self, item: &FileSystemItem) -> CommandOutcome {
        if item.is_dir() {
            CommandOutcome::Navigated(self.navigate_to_path(&item.path).await)
        } else {
            CommandOutcome::Operation(self.operations.open_file(item, true).await)
        }
    }

    /// Open the selection: a single folder is navigated into, files are
    /// opened each.
    pub async fn open_selected(&mut self) -> CommandOutcome {
        let selected = self.selection.selected().to_vec();
        match selected.as_slice() {
            [] => CommandOutcome::Ignored,
            [item] => self.open(item).await,
            items => {
                let mut opened = Vec::new();
                for item in items.iter().filter(|item| item.is_file()) {
                    match self.operations.open_file(item, true).await {
                        Ok(paths) => opened.extend(paths),
                        Err(e) => return CommandOutcome::Operation(Err(e)),
                    }
                }
                CommandOutcome::Operation(Ok(opened))
            },
        }
    }

    // Keyboard

    /// The command a key press maps to, given the current focus.
    pub fn resolve_key(&self, key: &PhysicalKey, modifiers: ModifiersState) -> Option<ExplorerCommand> {
        self.keymap.resolve(key, modifiers, self.focus.current())
    }

    /// Handle a key press. Returns `None` when no command applies.
    pub async fn handle_key(&mut self, key: &PhysicalKey, modifiers: ModifiersState) -> Option<CommandOutcome> {
        let command = self.resolve_key(key, modifiers)?;
        Some(self.execute(command).await)
    }

    /// Run a command.
    pub async fn execute(&mut self, command: ExplorerCommand) -> CommandOutcome {
        log::debug!("Executing {:?}", command);
        match command {
            ExplorerCommand::Copy => CommandOutcome::Operation(self.copy_selected().await),
            ExplorerCommand::Cut => CommandOutcome::Operation(self.cut_selected().await),
            ExplorerCommand::Paste => CommandOutcome::Operation(self.paste().await),
            ExplorerCommand::Delete => CommandOutcome::Operation(self.delete_selected().await),
            ExplorerCommand::SelectAll => {
                self.select_all();
                CommandOutcome::SelectionChanged
            },
            ExplorerCommand::ClearSelection => {
                self.clear_selection();
                CommandOutcome::SelectionChanged
            },
            ExplorerCommand::Back => CommandOutcome::Navigated(self.navigate_back().await),
            ExplorerCommand::Forward => CommandOutcome::Navigated(self.navigate_forward().await),
            ExplorerCommand::Up => CommandOutcome::Navigated(self.navigate_up().await),
            ExplorerCommand::Refresh => CommandOutcome::Refreshed(self.refresh().await),
            ExplorerCommand::Rename => match self.selection.selected() {
                [item] => CommandOutcome::RenameRequested(item.clone()),
                _ => CommandOutcome::Ignored,
            },
            ExplorerCommand::NewFolder => {
                if self.navigator.current_view() == ExplorerView::Folder {
                    CommandOutcome::NewFolderRequested(self.navigator.current_path().to_string())
                } else {
                    CommandOutcome::Ignored
                }
            },
            ExplorerCommand::OpenSelected => self.open_selected().await,
        }
    }
}
