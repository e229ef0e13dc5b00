use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::ViewEffect;
pub(super) use crate::actions::FileAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::actions::ViewAction;
pub(super) use crate::actions::CONTEXT_MENU_ITEMS;
pub(super) use crate::state::ClipboardItem;
pub(super) use crate::state::ClipboardOp;
pub(super) use crate::state::FileEntry;
pub(super) use crate::state::FileKind;
pub(super) use crate::state::LogBuffer;
pub(super) use crate::state::LogEntry;
pub(super) use crate::state::LogLevel;
pub(super) use crate::state::LogSource;
pub(super) use crate::state::NamingPurpose;
pub(super) use crate::state::StoreMode;
pub(super) use crate::state::ViewOverlay;
pub(super) use crate::state::ViewState;

mod context_menu;
mod log_buffer;
mod navigation;
mod scenarios;
mod speech;

fn virtual_state(collection: Vec<FileEntry>) -> ViewState {
    let mut state = ViewState::new(StoreMode::Virtual);
    run_runtime(&mut state, RuntimeAction::LoadCollection(collection));
    state
}

fn remote_state() -> ViewState {
    ViewState::new(StoreMode::Remote)
}

fn text(name: &str, parent: &str) -> FileEntry {
    FileEntry::new(name, FileKind::Text, "1 KB", parent)
}

fn run_user(state: &mut ViewState, action: UserAction) -> Vec<ViewEffect> {
    reduce(state, ViewAction::User(action))
}

fn run_runtime(state: &mut ViewState, action: RuntimeAction) -> Vec<ViewEffect> {
    reduce(state, ViewAction::Runtime(action))
}

/// Picks a context menu command by label and submits it for `name`.
fn context_command(state: &mut ViewState, name: &str, label: &str) -> Vec<ViewEffect> {
    run_user(
        state,
        UserAction::ContextMenuFor {
            name: name.to_string(),
            x: 0,
            y: 0,
        },
    );
    let idx = CONTEXT_MENU_ITEMS
        .iter()
        .position(|item| item.label == label)
        .expect("menu item");
    for _ in 0..idx {
        run_user(state, UserAction::ContextMenuMoveDown);
    }
    run_user(state, UserAction::ContextMenuSubmit)
}

fn names(entries: &[FileEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}

fn assert_listing_matches_collection(state: &ViewState) {
    let expected: Vec<&FileEntry> = state
        .collection
        .iter()
        .filter(|entry| entry.parent_path == state.cwd)
        .collect();
    let actual: Vec<&FileEntry> = state.listing.iter().collect();
    assert_eq!(actual, expected);
}
