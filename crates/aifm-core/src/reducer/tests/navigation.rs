use super::*;
use pretty_assertions::assert_eq;

#[test]
fn opening_a_folder_enters_it_with_trailing_separator() {
    let mut state = virtual_state(vec![
        FileEntry::folder("Projects", ""),
        text("plan.txt", "Projects/"),
        text("root.txt", ""),
    ]);

    let effects = run_user(
        &mut state,
        UserAction::Open {
            name: "Projects".to_string(),
        },
    );

    assert_eq!(effects, vec![ViewEffect::RequestFrame]);
    assert_eq!(state.cwd, "Projects/");
    assert_eq!(names(&state.listing), vec!["plan.txt"]);
    assert_listing_matches_collection(&state);
}

#[test]
fn opening_a_file_shows_preview() {
    let mut state = virtual_state(vec![text("a.txt", "")]);
    run_user(&mut state, UserAction::OpenSelected);

    assert_eq!(state.cwd, "");
    assert_eq!(
        state.interaction.overlay,
        ViewOverlay::Preview {
            entry: text("a.txt", "")
        }
    );
}

#[test]
fn navigate_up_returns_to_parent_and_stops_at_root() {
    let mut state = virtual_state(vec![
        FileEntry::folder("Projects", ""),
        FileEntry::folder("2024", "Projects/"),
    ]);
    run_runtime(&mut state, RuntimeAction::Navigate("Projects/2024/".to_string()));

    run_user(&mut state, UserAction::NavigateUp);
    assert_eq!(state.cwd, "Projects/");
    assert_eq!(names(&state.listing), vec!["2024"]);

    run_user(&mut state, UserAction::NavigateUp);
    assert_eq!(state.cwd, "");

    let effects = run_user(&mut state, UserAction::NavigateUp);
    assert!(effects.is_empty());
    assert_eq!(state.cwd, "");
}

#[test]
fn navigation_resets_selection_and_overlay() {
    let mut state = virtual_state(vec![
        text("a.txt", ""),
        text("b.txt", ""),
        FileEntry::folder("Projects", ""),
    ]);
    run_user(&mut state, UserAction::Select(2));
    run_user(&mut state, UserAction::OpenContextMenu { x: 3, y: 4 });
    assert!(matches!(
        state.interaction.overlay,
        ViewOverlay::ContextMenu { .. }
    ));

    run_user(
        &mut state,
        UserAction::NavigateTo {
            path: "Projects/".to_string(),
        },
    );

    assert_eq!(state.interaction.selected, 0);
    assert_eq!(state.interaction.overlay, ViewOverlay::None);
}

#[test]
fn remote_navigation_clears_listing_and_requests_fetch() {
    let mut state = remote_state();
    run_runtime(
        &mut state,
        RuntimeAction::ReplaceListing {
            path: String::new(),
            entries: vec![FileEntry::new("C:\\", FileKind::Drive, "10 GB free", "")],
        },
    );

    let effects = run_user(&mut state, UserAction::OpenSelected);

    assert_eq!(state.cwd, "C:\\");
    assert!(state.listing.is_empty());
    assert_eq!(
        effects,
        vec![
            ViewEffect::FetchListing {
                path: "C:\\".to_string()
            },
            ViewEffect::RequestFrame,
        ]
    );
}

#[test]
fn remote_navigate_up_from_drive_root_lists_drives() {
    let mut state = remote_state();
    run_runtime(&mut state, RuntimeAction::Navigate("C:\\Users".to_string()));

    run_user(&mut state, UserAction::NavigateUp);
    assert_eq!(state.cwd, "C:\\");

    let effects = run_user(&mut state, UserAction::NavigateUp);
    assert_eq!(state.cwd, "");
    assert_eq!(
        effects[0],
        ViewEffect::FetchListing {
            path: String::new()
        }
    );
}

#[test]
fn selection_is_bounded_by_listing() {
    let mut state = virtual_state(vec![text("a.txt", ""), text("b.txt", "")]);

    run_user(&mut state, UserAction::SelectionDown);
    run_user(&mut state, UserAction::SelectionDown);
    assert_eq!(state.interaction.selected, 1);

    run_user(&mut state, UserAction::SelectionUp);
    run_user(&mut state, UserAction::SelectionUp);
    assert_eq!(state.interaction.selected, 0);

    assert!(run_user(&mut state, UserAction::Select(9)).is_empty());
    assert_eq!(state.interaction.selected, 0);
}
