use super::*;
use pretty_assertions::assert_eq;

#[test]
fn toggle_starts_then_stops_listening() {
    let mut state = virtual_state(Vec::new());

    let effects = run_user(&mut state, UserAction::ToggleListening);
    assert_eq!(
        effects,
        vec![ViewEffect::StartListening, ViewEffect::RequestFrame]
    );
    assert!(state.interaction.listening);

    let effects = run_user(&mut state, UserAction::ToggleListening);
    assert_eq!(
        effects,
        vec![ViewEffect::StopListening, ViewEffect::RequestFrame]
    );
    assert!(!state.interaction.listening);
}

#[test]
fn transcript_fills_prompt_and_submits() {
    let mut state = virtual_state(vec![FileEntry::folder("Projects", "")]);
    run_user(
        &mut state,
        UserAction::Open {
            name: "Projects".to_string(),
        },
    );
    run_user(&mut state, UserAction::ToggleListening);

    let effects = run_runtime(
        &mut state,
        RuntimeAction::SpeechTranscript(" create a folder called drafts ".to_string()),
    );

    assert!(!state.interaction.listening);
    assert_eq!(state.interaction.prompt, "");
    assert_eq!(
        effects[0],
        ViewEffect::ResolveIntent {
            utterance: "create a folder called drafts".to_string(),
            context_path: "Projects/".to_string(),
        }
    );
}

#[test]
fn unsupported_speech_alerts_and_disables() {
    let mut state = virtual_state(Vec::new());
    run_user(&mut state, UserAction::ToggleListening);

    run_runtime(
        &mut state,
        RuntimeAction::SpeechFailed {
            message: "Speech recognition not supported".to_string(),
            unsupported: true,
        },
    );

    assert!(state.interaction.speech_disabled);
    assert!(!state.interaction.listening);
    assert!(matches!(state.interaction.overlay, ViewOverlay::Alert { .. }));

    run_user(&mut state, UserAction::CloseOverlay);
    let effects = run_user(&mut state, UserAction::ToggleListening);
    assert!(!effects.contains(&ViewEffect::StartListening));
    assert!(matches!(state.interaction.overlay, ViewOverlay::Alert { .. }));
}

#[test]
fn capture_failure_only_logs() {
    let mut state = virtual_state(Vec::new());
    run_user(&mut state, UserAction::ToggleListening);

    run_runtime(
        &mut state,
        RuntimeAction::SpeechFailed {
            message: "no speech detected".to_string(),
            unsupported: false,
        },
    );

    assert!(!state.interaction.speech_disabled);
    assert_eq!(state.interaction.overlay, ViewOverlay::None);
    let last = state.logs.last().expect("log entry");
    assert_eq!(last.source, LogSource::Speech);
}

#[test]
fn blank_prompt_submit_resolves_nothing() {
    let mut state = virtual_state(Vec::new());
    run_user(&mut state, UserAction::PromptInput(' '));

    let effects = run_user(&mut state, UserAction::PromptSubmit);

    assert_eq!(effects, vec![ViewEffect::RequestFrame]);
}

#[test]
fn pasted_prompt_text_is_flattened_to_one_line() {
    let mut state = virtual_state(Vec::new());
    run_user(&mut state, UserAction::PromptPaste("move a.txt\nto docs".to_string()));
    assert_eq!(state.interaction.prompt, "move a.txt to docs");
}
