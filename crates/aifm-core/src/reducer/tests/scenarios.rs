use super::*;
use pretty_assertions::assert_eq;

#[test]
fn literal_pdf_on_empty_root_lists_one_entry() {
    let mut state = virtual_state(Vec::new());
    for ch in "report.pdf".chars() {
        run_user(&mut state, UserAction::PromptInput(ch));
    }

    let effects = run_user(&mut state, UserAction::PromptSubmit);
    assert_eq!(
        effects[0],
        ViewEffect::ResolveIntent {
            utterance: "report.pdf".to_string(),
            context_path: String::new(),
        }
    );

    run_runtime(
        &mut state,
        RuntimeAction::ApplyLocal {
            action: FileAction::CreatePdf {
                name: Some("report.pdf".to_string()),
            },
            dir: String::new(),
        },
    );

    assert_eq!(
        state.listing,
        vec![FileEntry::new("report.pdf", FileKind::Pdf, "1 KB", "")]
    );
}

#[test]
fn paste_copy_into_docs_adds_suffixed_entry_and_clears_clipboard() {
    let mut state = virtual_state(vec![text("a.txt", "")]);
    run_runtime(
        &mut state,
        RuntimeAction::SetClipboard(Some(ClipboardItem {
            entry: text("a.txt", ""),
            operation: ClipboardOp::Copy,
        })),
    );
    run_runtime(&mut state, RuntimeAction::Navigate("docs".to_string()));

    run_user(&mut state, UserAction::Paste);

    assert_eq!(state.listing, vec![text("a.txt copy", "docs")]);
    assert_eq!(state.clipboard, None);
    assert_eq!(state.collection.len(), 2);
    assert_eq!(state.collection[0], text("a.txt", ""));
}

#[test]
fn repeated_commands_after_move_are_no_ops() {
    let mut state = virtual_state(vec![text("a.txt", ""), FileEntry::folder("docs", "")]);
    let move_a = FileAction::MoveFile {
        source: "a.txt".to_string(),
        destination: "docs".to_string(),
    };

    let first = run_runtime(
        &mut state,
        RuntimeAction::ApplyLocal {
            action: move_a.clone(),
            dir: String::new(),
        },
    );
    let second = run_runtime(
        &mut state,
        RuntimeAction::ApplyLocal {
            action: move_a,
            dir: String::new(),
        },
    );

    assert!(first.contains(&ViewEffect::PersistCollection));
    assert_eq!(second, vec![ViewEffect::RequestFrame]);
    assert_eq!(
        state.collection,
        vec![text("a.txt", "docs/"), FileEntry::folder("docs", "")]
    );
    assert_eq!(names(&state.listing), vec!["docs"]);
}

#[test]
fn unknown_action_changes_nothing() {
    let mut state = virtual_state(vec![text("a.txt", "")]);
    let before = state.collection.clone();

    let effects = run_runtime(
        &mut state,
        RuntimeAction::ApplyLocal {
            action: FileAction::Unknown,
            dir: String::new(),
        },
    );

    assert_eq!(effects, vec![ViewEffect::RequestFrame]);
    assert_eq!(state.collection, before);
}

#[test]
fn recycle_bin_needs_remote_mode() {
    let mut state = virtual_state(Vec::new());
    run_user(&mut state, UserAction::ShowRecycleBin);
    assert!(matches!(state.interaction.overlay, ViewOverlay::Alert { .. }));

    let mut remote = remote_state();
    let effects = run_user(&mut remote, UserAction::ShowRecycleBin);
    assert_eq!(effects, vec![ViewEffect::FetchRecycleBin]);

    run_runtime(
        &mut remote,
        RuntimeAction::ShowRecycleBin(vec![text("old.txt", "C:\\$Recycle.Bin")]),
    );
    assert!(matches!(
        remote.interaction.overlay,
        ViewOverlay::RecycleBin { .. }
    ));
}
