use super::*;
use pretty_assertions::assert_eq;

#[test]
fn menu_opens_on_named_entry_and_wraps() {
    let mut state = virtual_state(vec![text("a.txt", ""), text("b.txt", "")]);
    run_user(
        &mut state,
        UserAction::ContextMenuFor {
            name: "b.txt".to_string(),
            x: 10,
            y: 2,
        },
    );
    assert_eq!(state.interaction.selected, 1);

    run_user(&mut state, UserAction::ContextMenuMoveUp);
    match &state.interaction.overlay {
        ViewOverlay::ContextMenu {
            entry, selected, ..
        } => {
            assert_eq!(entry.name, "b.txt");
            assert_eq!(*selected, CONTEXT_MENU_ITEMS.len() - 1);
        }
        other => panic!("expected context menu, got {other:?}"),
    }

    run_user(&mut state, UserAction::ContextMenuMoveDown);
    assert!(matches!(
        state.interaction.overlay,
        ViewOverlay::ContextMenu { selected: 0, .. }
    ));
}

#[test]
fn menu_for_missing_entry_is_ignored() {
    let mut state = virtual_state(vec![text("a.txt", "")]);
    let effects = run_user(
        &mut state,
        UserAction::ContextMenuFor {
            name: "ghost".to_string(),
            x: 0,
            y: 0,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.interaction.overlay, ViewOverlay::None);
}

#[test]
fn delete_removes_entry_and_persists() {
    let mut state = virtual_state(vec![text("a.txt", ""), text("b.txt", "")]);

    let effects = context_command(&mut state, "a.txt", "Delete");

    assert!(effects.contains(&ViewEffect::PersistCollection));
    assert_eq!(state.collection, vec![text("b.txt", "")]);
    assert_eq!(names(&state.listing), vec!["b.txt"]);
    assert_eq!(state.interaction.overlay, ViewOverlay::None);
}

#[test]
fn remote_delete_is_executed_by_the_session() {
    let mut state = remote_state();
    run_runtime(&mut state, RuntimeAction::Navigate("C:\\docs".to_string()));
    run_runtime(
        &mut state,
        RuntimeAction::ReplaceListing {
            path: "C:\\docs".to_string(),
            entries: vec![text("a.txt", "C:\\docs")],
        },
    );

    let effects = context_command(&mut state, "a.txt", "Delete");

    assert_eq!(
        effects,
        vec![
            ViewEffect::Execute {
                action: FileAction::DeleteFile {
                    name: "a.txt".to_string()
                },
                dir: "C:\\docs".to_string(),
            },
            ViewEffect::RequestFrame,
        ]
    );
    assert_eq!(names(&state.listing), vec!["a.txt"]);
}

#[test]
fn duplicate_copies_into_same_directory() {
    let mut state = virtual_state(vec![text("a.txt", "")]);

    context_command(&mut state, "a.txt", "Duplicate");

    assert_eq!(names(&state.listing), vec!["a.txt", "a.txt copy"]);
    assert_listing_matches_collection(&state);
}

#[test]
fn rename_edits_a_draft_then_applies() {
    let mut state = virtual_state(vec![text("a.txt", "")]);

    context_command(&mut state, "a.txt", "Rename");
    match &state.interaction.overlay {
        ViewOverlay::Naming(draft) => {
            assert_eq!(draft.purpose, NamingPurpose::Rename);
            assert_eq!(draft.text, "a.txt");
        }
        other => panic!("expected naming overlay, got {other:?}"),
    }

    for _ in 0..4 {
        run_user(&mut state, UserAction::NamingBackspace);
    }
    for ch in "b.md".chars() {
        run_user(&mut state, UserAction::NamingInput(ch));
    }
    let effects = run_user(&mut state, UserAction::NamingSubmit);

    assert!(effects.contains(&ViewEffect::PersistCollection));
    assert_eq!(state.collection, vec![text("b.md", "")]);
    assert_eq!(state.interaction.overlay, ViewOverlay::None);
}

#[test]
fn unchanged_rename_is_a_no_op() {
    let mut state = virtual_state(vec![text("a.txt", "")]);

    context_command(&mut state, "a.txt", "Rename");
    let effects = run_user(&mut state, UserAction::NamingSubmit);

    assert_eq!(effects, vec![ViewEffect::RequestFrame]);
    assert_eq!(state.collection, vec![text("a.txt", "")]);
}

#[test]
fn remote_rename_goes_to_the_gateway() {
    let mut state = remote_state();
    run_runtime(&mut state, RuntimeAction::Navigate("C:\\docs".to_string()));
    run_runtime(
        &mut state,
        RuntimeAction::ReplaceListing {
            path: "C:\\docs".to_string(),
            entries: vec![text("a.txt", "C:\\docs")],
        },
    );

    context_command(&mut state, "a.txt", "Rename");
    run_user(&mut state, UserAction::NamingInput('x'));
    let effects = run_user(&mut state, UserAction::NamingSubmit);

    assert_eq!(
        effects[0],
        ViewEffect::Rename {
            dir: "C:\\docs".to_string(),
            old_name: "a.txt".to_string(),
            new_name: "a.txtx".to_string(),
        }
    );
}

#[test]
fn create_folder_uses_draft_name() {
    let mut state = virtual_state(Vec::new());

    run_user(&mut state, UserAction::StartCreateFolder);
    run_user(&mut state, UserAction::NamingInput('2'));
    run_user(&mut state, UserAction::NamingSubmit);

    assert_eq!(state.collection, vec![FileEntry::folder("New Folder2", "")]);
}

#[test]
fn copy_path_hands_full_path_to_front_end() {
    let mut state = virtual_state(vec![
        FileEntry::folder("Projects", ""),
        text("a.txt", "Projects/"),
    ]);
    run_runtime(&mut state, RuntimeAction::Navigate("Projects/".to_string()));

    let effects = context_command(&mut state, "a.txt", "Copy path");

    assert_eq!(
        effects,
        vec![
            ViewEffect::CopyToClipboard("Projects/a.txt".to_string()),
            ViewEffect::RequestFrame,
        ]
    );
}

#[test]
fn open_from_menu_enters_folder() {
    let mut state = virtual_state(vec![FileEntry::folder("Projects", "")]);
    context_command(&mut state, "Projects", "Open");
    assert_eq!(state.cwd, "Projects/");
}
