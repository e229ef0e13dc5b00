use super::actions::ContextCommand;
use super::actions::FileAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::actions::ViewAction;
use super::actions::CONTEXT_MENU_ITEMS;
use super::mutation::apply_file_action;
use super::mutation::delete_entries;
use super::mutation::rename_entry;
use super::mutation::transfer;
use super::state::visible_entries;
use super::state::ClipboardItem;
use super::state::ClipboardOp;
use super::state::FileEntry;
use super::state::LogEntry;
use super::state::LogLevel;
use super::state::LogSource;
use super::state::NamingDraft;
use super::state::NamingPurpose;
use super::state::StoreMode;
use super::state::ViewOverlay;
use super::state::ViewState;

/// Work the reducer cannot do itself. The store handles `PersistCollection`;
/// the session carries out gateway and intent effects; the front end handles
/// the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    RequestFrame,
    PersistCollection,
    ResolveIntent {
        utterance: String,
        context_path: String,
    },
    FetchListing {
        path: String,
    },
    Execute {
        action: FileAction,
        dir: String,
    },
    Rename {
        dir: String,
        old_name: String,
        new_name: String,
    },
    Transfer {
        operation: ClipboardOp,
        source: FileEntry,
        destination: String,
    },
    FetchRecycleBin,
    CopyToClipboard(String),
    StartListening,
    StopListening,
}

pub fn reduce(state: &mut ViewState, action: ViewAction) -> Vec<ViewEffect> {
    match action {
        ViewAction::User(user) => reduce_user(state, user),
        ViewAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut ViewState, action: UserAction) -> Vec<ViewEffect> {
    match action {
        UserAction::SelectionUp => {
            state.interaction.selected = state.interaction.selected.saturating_sub(1);
            vec![ViewEffect::RequestFrame]
        }
        UserAction::SelectionDown => {
            if state.interaction.selected + 1 < state.listing.len() {
                state.interaction.selected += 1;
            }
            vec![ViewEffect::RequestFrame]
        }
        UserAction::Select(idx) => {
            if idx < state.listing.len() {
                state.interaction.selected = idx;
                return vec![ViewEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::OpenSelected => match state.selected_entry().cloned() {
            Some(entry) => open_entry(state, entry),
            None => Vec::new(),
        },
        UserAction::Open { name } => match state.entry_named(&name).cloned() {
            Some(entry) => open_entry(state, entry),
            None => Vec::new(),
        },
        UserAction::NavigateUp => {
            if state.is_root() {
                return Vec::new();
            }
            let parent = state.path_style.parent_of(&state.cwd);
            navigate(state, parent)
        }
        UserAction::NavigateTo { path } => navigate(state, path),
        UserAction::OpenContextMenu { x, y } => match state.selected_entry().cloned() {
            Some(entry) => {
                state.interaction.overlay = ViewOverlay::ContextMenu {
                    x,
                    y,
                    entry,
                    selected: 0,
                };
                vec![ViewEffect::RequestFrame]
            }
            None => Vec::new(),
        },
        UserAction::ContextMenuFor { name, x, y } => {
            let Some(idx) = state.listing.iter().position(|entry| entry.name == name) else {
                return Vec::new();
            };
            state.interaction.selected = idx;
            state.interaction.overlay = ViewOverlay::ContextMenu {
                x,
                y,
                entry: state.listing[idx].clone(),
                selected: 0,
            };
            vec![ViewEffect::RequestFrame]
        }
        UserAction::ContextMenuMoveUp => {
            if let ViewOverlay::ContextMenu { selected, .. } = &mut state.interaction.overlay {
                if *selected == 0 {
                    *selected = CONTEXT_MENU_ITEMS.len() - 1;
                } else {
                    *selected -= 1;
                }
                return vec![ViewEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::ContextMenuMoveDown => {
            if let ViewOverlay::ContextMenu { selected, .. } = &mut state.interaction.overlay {
                *selected = (*selected + 1) % CONTEXT_MENU_ITEMS.len();
                return vec![ViewEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::ContextMenuSubmit => {
            let overlay = std::mem::replace(&mut state.interaction.overlay, ViewOverlay::None);
            let ViewOverlay::ContextMenu {
                entry, selected, ..
            } = overlay
            else {
                state.interaction.overlay = overlay;
                return Vec::new();
            };
            let Some(item) = CONTEXT_MENU_ITEMS.get(selected) else {
                return vec![ViewEffect::RequestFrame];
            };
            let mut effects = context_command(state, item.command, entry);
            effects.push(ViewEffect::RequestFrame);
            effects
        }
        UserAction::CloseOverlay => {
            state.interaction.overlay = ViewOverlay::None;
            vec![ViewEffect::RequestFrame]
        }
        UserAction::FocusPrompt(focused) => {
            state.interaction.prompt_focused = focused;
            vec![ViewEffect::RequestFrame]
        }
        UserAction::PromptInput(ch) => {
            state.interaction.prompt.push(ch);
            vec![ViewEffect::RequestFrame]
        }
        UserAction::PromptBackspace => {
            state.interaction.prompt.pop();
            vec![ViewEffect::RequestFrame]
        }
        UserAction::PromptPaste(text) => {
            state
                .interaction
                .prompt
                .push_str(text.replace(['\r', '\n'], " ").as_str());
            vec![ViewEffect::RequestFrame]
        }
        UserAction::PromptSubmit => submit_prompt(state),
        UserAction::NamingInput(ch) => {
            if let ViewOverlay::Naming(draft) = &mut state.interaction.overlay {
                draft.text.push(ch);
                return vec![ViewEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::NamingBackspace => {
            if let ViewOverlay::Naming(draft) = &mut state.interaction.overlay {
                draft.text.pop();
                return vec![ViewEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::NamingSubmit => {
            let overlay = std::mem::replace(&mut state.interaction.overlay, ViewOverlay::None);
            let ViewOverlay::Naming(draft) = overlay else {
                state.interaction.overlay = overlay;
                return Vec::new();
            };
            let mut effects = submit_naming(state, draft);
            effects.push(ViewEffect::RequestFrame);
            effects
        }
        UserAction::StartCreateFolder => {
            state.interaction.overlay = ViewOverlay::Naming(NamingDraft {
                purpose: NamingPurpose::CreateFolder,
                original: None,
                text: "New Folder".to_string(),
            });
            vec![ViewEffect::RequestFrame]
        }
        UserAction::Hover(name) => {
            if state.interaction.hovered == name {
                return Vec::new();
            }
            state.interaction.hovered = name;
            vec![ViewEffect::RequestFrame]
        }
        UserAction::Paste => {
            let mut effects = paste(state);
            effects.push(ViewEffect::RequestFrame);
            effects
        }
        UserAction::ToggleListening => {
            if state.interaction.speech_disabled {
                show_alert(state, "Speech recognition not supported");
                return vec![ViewEffect::RequestFrame];
            }
            // A second toggle stops the running session; nothing is queued.
            if state.interaction.listening {
                state.interaction.listening = false;
                vec![ViewEffect::StopListening, ViewEffect::RequestFrame]
            } else {
                state.interaction.listening = true;
                vec![ViewEffect::StartListening, ViewEffect::RequestFrame]
            }
        }
        UserAction::ShowRecycleBin => match state.mode {
            StoreMode::Remote => vec![ViewEffect::FetchRecycleBin],
            StoreMode::Virtual => {
                show_alert(state, "Recycle bin is only available with a remote gateway");
                vec![ViewEffect::RequestFrame]
            }
        },
        UserAction::Refresh => match state.mode {
            StoreMode::Remote => vec![ViewEffect::FetchListing {
                path: state.cwd.clone(),
            }],
            StoreMode::Virtual => {
                refresh_virtual_listing(state);
                vec![ViewEffect::RequestFrame]
            }
        },
    }
}

fn reduce_runtime(state: &mut ViewState, action: RuntimeAction) -> Vec<ViewEffect> {
    match action {
        RuntimeAction::Navigate(path) => navigate(state, path),
        RuntimeAction::ReplaceListing { path, entries } => {
            if path != state.cwd {
                log(
                    state,
                    LogLevel::Debug,
                    LogSource::Gateway,
                    format!("dropped stale listing for {path}"),
                );
                return Vec::new();
            }
            state.listing = entries;
            clamp_selection(state);
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::LoadCollection(entries) => {
            state.collection = entries;
            if state.mode == StoreMode::Virtual {
                refresh_virtual_listing(state);
            }
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::ApplyLocal { action, dir } => {
            let mut effects = apply_local(state, &action, &dir);
            effects.push(ViewEffect::RequestFrame);
            effects
        }
        RuntimeAction::RenameLocal {
            dir,
            old_name,
            new_name,
        } => {
            let mut effects = rename_local(state, &dir, &old_name, &new_name);
            effects.push(ViewEffect::RequestFrame);
            effects
        }
        RuntimeAction::SetClipboard(item) => {
            state.clipboard = item;
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::SetSpecialFolders(folders) => {
            state.special_folders = Some(folders);
            Vec::new()
        }
        RuntimeAction::ShowRecycleBin(entries) => {
            state.interaction.overlay = ViewOverlay::RecycleBin { entries };
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::ShowAlert(message) => {
            show_alert(state, &message);
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::AppendLog(entry) => {
            state.logs.append(entry);
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::SpeechTranscript(transcript) => {
            state.interaction.listening = false;
            state.interaction.prompt = transcript;
            submit_prompt(state)
        }
        RuntimeAction::SpeechFailed {
            message,
            unsupported,
        } => {
            state.interaction.listening = false;
            if unsupported {
                state.interaction.speech_disabled = true;
                show_alert(state, &message);
            } else {
                log(state, LogLevel::Warn, LogSource::Speech, message);
            }
            vec![ViewEffect::RequestFrame]
        }
        RuntimeAction::SetPrompt(prompt) => {
            state.interaction.prompt = prompt;
            vec![ViewEffect::RequestFrame]
        }
    }
}

fn navigate(state: &mut ViewState, path: String) -> Vec<ViewEffect> {
    state.cwd = path;
    state.interaction.selected = 0;
    state.interaction.hovered = None;
    state.interaction.overlay = ViewOverlay::None;
    match state.mode {
        StoreMode::Virtual => {
            refresh_virtual_listing(state);
            vec![ViewEffect::RequestFrame]
        }
        StoreMode::Remote => {
            state.listing.clear();
            vec![
                ViewEffect::FetchListing {
                    path: state.cwd.clone(),
                },
                ViewEffect::RequestFrame,
            ]
        }
    }
}

fn open_entry(state: &mut ViewState, entry: FileEntry) -> Vec<ViewEffect> {
    if entry.kind.is_container() {
        let path = state.path_style.child_dir(&state.cwd, &entry.name);
        return navigate(state, path);
    }
    state.interaction.overlay = ViewOverlay::Preview { entry };
    vec![ViewEffect::RequestFrame]
}

fn submit_prompt(state: &mut ViewState) -> Vec<ViewEffect> {
    let utterance = state.interaction.prompt.trim().to_string();
    state.interaction.prompt.clear();
    if utterance.is_empty() {
        return vec![ViewEffect::RequestFrame];
    }
    vec![
        ViewEffect::ResolveIntent {
            utterance,
            context_path: state.cwd.clone(),
        },
        ViewEffect::RequestFrame,
    ]
}

fn context_command(
    state: &mut ViewState,
    command: ContextCommand,
    entry: FileEntry,
) -> Vec<ViewEffect> {
    match command {
        ContextCommand::Open => open_entry(state, entry),
        ContextCommand::Preview => {
            state.interaction.overlay = ViewOverlay::Preview { entry };
            Vec::new()
        }
        ContextCommand::Rename => {
            state.interaction.overlay = ViewOverlay::Naming(NamingDraft {
                purpose: NamingPurpose::Rename,
                original: Some(entry.name.clone()),
                text: entry.name,
            });
            Vec::new()
        }
        ContextCommand::Cut | ContextCommand::Copy => {
            let operation = if command == ContextCommand::Cut {
                ClipboardOp::Move
            } else {
                ClipboardOp::Copy
            };
            log(
                state,
                LogLevel::Info,
                LogSource::App,
                format!("{} pending for {}", operation.label(), entry.name),
            );
            state.clipboard = Some(ClipboardItem { entry, operation });
            Vec::new()
        }
        ContextCommand::Duplicate => {
            let dir = entry.parent_path.clone();
            match state.mode {
                StoreMode::Virtual => {
                    let changed = transfer(
                        &mut state.collection,
                        ClipboardOp::Copy,
                        &dir,
                        &entry.name,
                        &dir,
                    );
                    collection_changed(state, changed)
                }
                StoreMode::Remote => vec![ViewEffect::Execute {
                    action: FileAction::CopyFile {
                        source: entry.name,
                        destination: dir.clone(),
                    },
                    dir,
                }],
            }
        }
        ContextCommand::Paste => paste(state),
        ContextCommand::CopyPath => vec![ViewEffect::CopyToClipboard(state.entry_path(&entry))],
        ContextCommand::Delete => {
            let dir = entry.parent_path.clone();
            match state.mode {
                StoreMode::Virtual => {
                    let changed = delete_entries(&mut state.collection, &dir, &entry.name);
                    collection_changed(state, changed)
                }
                StoreMode::Remote => vec![ViewEffect::Execute {
                    action: FileAction::DeleteFile { name: entry.name },
                    dir,
                }],
            }
        }
    }
}

fn submit_naming(state: &mut ViewState, draft: NamingDraft) -> Vec<ViewEffect> {
    let text = draft.text.trim().to_string();
    if text.is_empty() {
        return Vec::new();
    }
    let dir = state.cwd.clone();
    match (draft.purpose, state.mode) {
        (NamingPurpose::Rename, mode) => {
            let Some(old_name) = draft.original else {
                return Vec::new();
            };
            if old_name == text {
                return Vec::new();
            }
            match mode {
                StoreMode::Virtual => rename_local(state, &dir, &old_name, &text),
                StoreMode::Remote => vec![ViewEffect::Rename {
                    dir,
                    old_name,
                    new_name: text,
                }],
            }
        }
        (NamingPurpose::CreateFolder, StoreMode::Virtual) => apply_local(
            state,
            &FileAction::CreateFolder { name: Some(text) },
            &dir,
        ),
        (NamingPurpose::CreateFolder, StoreMode::Remote) => vec![ViewEffect::Execute {
            action: FileAction::CreateFolder { name: Some(text) },
            dir,
        }],
    }
}

/// Pastes the clipboard into the current directory. The slot is cleared only
/// once the transfer is known to have succeeded; remote transfers clear it
/// from the session after the gateway acknowledges.
fn paste(state: &mut ViewState) -> Vec<ViewEffect> {
    let Some(item) = state.clipboard.clone() else {
        log(state, LogLevel::Debug, LogSource::App, "nothing to paste");
        return Vec::new();
    };
    let destination = state.cwd.clone();
    match state.mode {
        StoreMode::Virtual => {
            let changed = transfer(
                &mut state.collection,
                item.operation,
                &item.entry.parent_path,
                &item.entry.name,
                &destination,
            );
            if changed {
                state.clipboard = None;
            } else {
                log(
                    state,
                    LogLevel::Warn,
                    LogSource::App,
                    format!("{} is no longer available to paste", item.entry.name),
                );
            }
            collection_changed(state, changed)
        }
        StoreMode::Remote => vec![ViewEffect::Transfer {
            operation: item.operation,
            source: item.entry,
            destination,
        }],
    }
}

fn apply_local(state: &mut ViewState, action: &FileAction, dir: &str) -> Vec<ViewEffect> {
    let changed = apply_file_action(&mut state.collection, action, dir, state.path_style);
    let outcome = if changed { "applied" } else { "no-op" };
    log(
        state,
        LogLevel::Info,
        LogSource::App,
        format!("{} {outcome}", action.label()),
    );
    collection_changed(state, changed)
}

fn rename_local(
    state: &mut ViewState,
    dir: &str,
    old_name: &str,
    new_name: &str,
) -> Vec<ViewEffect> {
    let changed = rename_entry(&mut state.collection, dir, old_name, new_name);
    if changed {
        log(
            state,
            LogLevel::Info,
            LogSource::App,
            format!("renamed {old_name} to {}", new_name.trim()),
        );
    }
    collection_changed(state, changed)
}

fn collection_changed(state: &mut ViewState, changed: bool) -> Vec<ViewEffect> {
    if !changed {
        return Vec::new();
    }
    refresh_virtual_listing(state);
    vec![ViewEffect::PersistCollection]
}

fn refresh_virtual_listing(state: &mut ViewState) {
    state.listing = visible_entries(&state.collection, &state.cwd);
    clamp_selection(state);
}

fn clamp_selection(state: &mut ViewState) {
    if state.interaction.selected >= state.listing.len() {
        state.interaction.selected = state.listing.len().saturating_sub(1);
    }
    if let Some(hovered) = state.interaction.hovered.as_deref() {
        if !state.listing.iter().any(|entry| entry.name == hovered) {
            state.interaction.hovered = None;
        }
    }
}

fn show_alert(state: &mut ViewState, message: &str) {
    log(state, LogLevel::Warn, LogSource::App, message.to_string());
    state.interaction.overlay = ViewOverlay::Alert {
        message: message.into(),
    };
}

fn log(state: &mut ViewState, level: LogLevel, source: LogSource, message: impl Into<String>) {
    state.logs.append(LogEntry::new(level, source, message));
}

#[cfg(test)]
mod tests;
