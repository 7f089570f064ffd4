// SPDX-License-Identifier: LGPL-3.0-only
mod common;

use common::MockHost;
use std::rc::Rc;
use strata_core::focus::{FocusTarget, FocusTracker};
use strata_core::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use strata_services::clipboard::ClipboardChannel;
use strata_services::config::ExplorerConfig;
use strata_services::explorer::{CommandOutcome, ExplorerCommand, ExplorerSession};
use strata_services::filesystem::FileSystemItem;
use strata_services::navigation::ExplorerView;
use strata_services::operations::OperationError;
use strata_services::search::SearchMode;
use strata_services::sort_preferences::SortPreferenceStore;

fn session_with(host: Rc<MockHost>, config: ExplorerConfig) -> ExplorerSession<MockHost> {
    ExplorerSession::new(host, ClipboardChannel::new(), config)
        .with_sort_preferences(Rc::new(SortPreferenceStore::in_memory()))
}

fn session() -> (Rc<MockHost>, ExplorerSession<MockHost>) {
    let host = Rc::new(MockHost::with_tree());
    let session = session_with(host.clone(), ExplorerConfig::default());
    (host, session)
}

fn names(items: &[FileSystemItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

fn item(session: &ExplorerSession<MockHost>, name: &str) -> FileSystemItem {
    session
        .items()
        .iter()
        .find(|item| item.name == name)
        .cloned()
        .unwrap()
}

fn key(code: KeyCode) -> PhysicalKey {
    PhysicalKey::Code(code)
}

#[tokio::test]
async fn test_navigation_lists_in_preferred_order() {
    let (_host, mut session) = session();
    assert!(session.navigate_to_path("/home/docs").await);
    assert_eq!(names(session.items()), vec!["2024", "report2.pdf", "report10.pdf"]);

    let crumbs: Vec<String> = session.breadcrumbs().into_iter().map(|c| c.path).collect();
    assert_eq!(crumbs, vec!["/", "/home", "/home/docs"]);
}

#[tokio::test]
async fn test_stale_listing_is_discarded() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home").await;

    let stale = session.begin_listing().unwrap();
    assert_eq!(stale.path(), "/home");
    let result = session.fetch_listing(&stale).await;

    session.navigate_to_path("/home/docs").await;
    assert!(!session.commit_listing(stale, result));
    assert_eq!(names(session.items()), vec!["2024", "report2.pdf", "report10.pdf"]);
}

#[tokio::test]
async fn test_failed_listing_keeps_previous_items() {
    let (host, mut session) = session();
    session.navigate_to_path("/home").await;
    host.fail_on("list_directory");

    assert!(!session.refresh().await);
    assert_eq!(names(session.items()), vec!["docs", "notes.txt"]);
}

#[tokio::test]
async fn test_paste_refreshes_destination() {
    let (host, mut session) = session();
    session.navigate_to_path("/home").await;
    let notes = item(&session, "notes.txt");
    session.select_file(&notes, false);
    session.cut_selected().await.unwrap();
    assert!(session.clipboard().state().is_cut("/home/notes.txt"));

    session.navigate_to_path("/home/docs").await;
    assert!(session.selection().is_empty());
    let pasted = session.paste().await.unwrap();

    assert_eq!(pasted, vec![String::from("/home/docs/notes.txt")]);
    assert!(names(session.items()).contains(&"notes.txt"));
    assert!(session.clipboard().state().is_empty());
    assert!(!host.names_in("/home").contains(&String::from("notes.txt")));
}

#[tokio::test]
async fn test_delete_clears_selection_and_refreshes() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home/docs").await;
    let report = item(&session, "report10.pdf");
    session.select_file(&report, false);

    let outcome = session
        .handle_key(&key(KeyCode::Delete), ModifiersState::empty())
        .await;
    assert_eq!(
        outcome,
        Some(CommandOutcome::Operation(Ok(vec![String::from("/home/docs/report10.pdf")])))
    );
    assert!(session.selection().is_empty());
    assert_eq!(names(session.items()), vec!["2024", "report2.pdf"]);
}

#[tokio::test]
async fn test_text_input_swallows_editing_shortcuts() {
    let (host, session) = session();
    let focus = FocusTracker::new();
    let mut session = session.with_focus_tracker(focus.clone());
    session.navigate_to_path("/home").await;
    session.navigate_to_path("/home/docs").await;
    let report = item(&session, "report2.pdf");
    session.select_file(&report, false);

    focus.set_focus(FocusTarget::TextInput);
    let copy = key(KeyCode::KeyC);
    assert_eq!(session.handle_key(&copy, ModifiersState::CONTROL).await, None);
    assert_eq!(session.handle_key(&key(KeyCode::Backspace), ModifiersState::empty()).await, None);
    assert_eq!(host.call_count("copy"), 0);
    assert_eq!(session.current_path(), "/home/docs");

    assert_eq!(
        session.handle_key(&key(KeyCode::ArrowLeft), ModifiersState::ALT).await,
        Some(CommandOutcome::Navigated(true))
    );
    assert_eq!(session.current_path(), "/home");

    focus.set_focus(FocusTarget::ItemList);
    let notes = item(&session, "notes.txt");
    session.select_file(&notes, false);
    assert_eq!(
        session.handle_key(&copy, ModifiersState::CONTROL).await,
        Some(CommandOutcome::Operation(Ok(vec![String::from("/home/notes.txt")])))
    );
    assert_eq!(host.call_count("copy"), 1);
}

#[tokio::test]
async fn test_disabled_keyboard_ignores_shortcuts() {
    let host = Rc::new(MockHost::with_tree());
    let config = ExplorerConfig {
        keyboard_enabled: false,
        ..ExplorerConfig::default()
    };
    let mut session = session_with(host, config);
    session.navigate_to_path("/home").await;

    assert_eq!(session.handle_key(&key(KeyCode::F5), ModifiersState::empty()).await, None);
    session.keymap_mut().set_enabled(true);
    assert_eq!(
        session.handle_key(&key(KeyCode::F5), ModifiersState::empty()).await,
        Some(CommandOutcome::Refreshed(true))
    );
}

#[tokio::test]
async fn test_open_navigates_into_folders_and_launches_files() {
    let (host, mut session) = session();
    session.navigate_to_path("/home").await;

    let docs = item(&session, "docs");
    session.select_file(&docs, false);
    assert_eq!(
        session.execute(ExplorerCommand::OpenSelected).await,
        CommandOutcome::Navigated(true)
    );
    assert_eq!(session.current_path(), "/home/docs");

    let report = item(&session, "report2.pdf");
    assert_eq!(
        session.open(&report).await,
        CommandOutcome::Operation(Ok(vec![String::from("/home/docs/report2.pdf")]))
    );
    assert_eq!(host.call_count("open_file_fast"), 1);
}

#[tokio::test]
async fn test_rename_and_new_folder_requests() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home/docs").await;

    assert_eq!(session.execute(ExplorerCommand::Rename).await, CommandOutcome::Ignored);
    let report = item(&session, "report2.pdf");
    session.select_file(&report, false);
    assert_eq!(
        session.execute(ExplorerCommand::Rename).await,
        CommandOutcome::RenameRequested(report)
    );
    session.rename_selected("summary.pdf").await.unwrap();
    assert!(names(session.items()).contains(&"summary.pdf"));

    let shortcut = ModifiersState::CONTROL | ModifiersState::SHIFT;
    assert_eq!(
        session.handle_key(&key(KeyCode::KeyN), shortcut).await,
        Some(CommandOutcome::NewFolderRequested(String::from("/home/docs")))
    );
    session.create_folder("2025").await.unwrap();
    assert_eq!(names(session.items())[..2], ["2024", "2025"]);
}

#[tokio::test]
async fn test_views_without_folder() {
    let (host, mut session) = session();
    assert_eq!(session.current_view(), ExplorerView::ThisPc);
    assert!(session.begin_listing().is_none());
    assert!(!session.refresh().await);
    assert_eq!(session.paste().await, Err(OperationError::NoDestination));
    assert_eq!(session.execute(ExplorerCommand::NewFolder).await, CommandOutcome::Ignored);

    session.navigate_to_path("/home").await;
    assert!(session.navigate_to_recents());
    assert_eq!(session.current_path(), "/home");
    assert!(!session.refresh().await);
    assert_eq!(host.call_count("list_directory"), 1);
}

#[tokio::test]
async fn test_create_folder_needs_folder_view() {
    let (host, mut session) = session();
    session.navigate_to_path("/home").await;
    session.navigate_to_this_pc();
    assert_eq!(session.create_folder("x").await, Err(OperationError::NoDestination));

    assert!(session.navigate_to_recents());
    assert_eq!(session.create_folder("x").await, Err(OperationError::NoDestination));
    assert_eq!(host.call_count("create_folder"), 0);
    assert!(!host.names_in("/home").contains(&String::from("x")));
}

#[tokio::test]
async fn test_search_filters_displayed_items() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home/docs").await;

    session.set_search("report", SearchMode::Scored);
    let displayed = session.displayed_items();
    assert_eq!(displayed.len(), 2);
    assert!(displayed.iter().all(|item| item.name.starts_with("report")));

    session.execute(ExplorerCommand::SelectAll).await;
    assert_eq!(session.selection().len(), 2);

    session.navigate_to_path("/home").await;
    assert_eq!(session.search_term(), "");
    assert_eq!(session.displayed_items().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_live_search_only_runs_last_keystroke() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home/docs").await;

    let (first, second) = tokio::join!(
        session.search_as_you_type("r", SearchMode::Prefix),
        session.search_as_you_type("report1", SearchMode::Prefix),
    );
    assert_eq!(first, None);
    assert_eq!(second.as_deref().map(names), Some(vec!["report10.pdf"]));
    assert_eq!(session.search_term(), "report1");
}

#[tokio::test]
async fn test_range_selection_over_displayed_items() {
    let (_host, mut session) = session();
    session.navigate_to_path("/home/docs").await;
    let first = item(&session, "2024");
    let last = item(&session, "report10.pdf");

    session.select_file(&first, false);
    session.select_range(&last);
    assert_eq!(session.selection().len(), 3);

    session
        .handle_key(&key(KeyCode::Escape), ModifiersState::empty())
        .await;
    assert!(session.selection().is_empty());
}
