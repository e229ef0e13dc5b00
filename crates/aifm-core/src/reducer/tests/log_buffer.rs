use super::*;
use pretty_assertions::assert_eq;

#[test]
fn appended_logs_get_monotonic_sequence() {
    let mut state = remote_state();
    for message in ["one", "two", "three"] {
        run_runtime(
            &mut state,
            RuntimeAction::AppendLog(LogEntry::new(LogLevel::Info, LogSource::App, message)),
        );
    }

    let seqs: Vec<u64> = state.logs.iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
}

#[test]
fn log_capacity_eviction_is_fifo() {
    let mut state = remote_state();
    state.logs = LogBuffer::new(3);

    for value in ["1", "2", "3", "4", "5"] {
        run_runtime(
            &mut state,
            RuntimeAction::AppendLog(LogEntry::new(LogLevel::Debug, LogSource::Gateway, value)),
        );
    }

    let messages: Vec<&str> = state.logs.iter().map(|entry| entry.message.as_str()).collect();
    assert_eq!(messages, vec!["3", "4", "5"]);
}

#[test]
fn alerts_are_also_logged_as_warnings() {
    let mut state = remote_state();
    run_runtime(&mut state, RuntimeAction::ShowAlert("gateway down".to_string()));

    let last = state.logs.last().expect("log entry");
    assert_eq!(last.level, LogLevel::Warn);
    assert_eq!(last.message, "gateway down");
    assert_eq!(
        state.interaction.overlay,
        ViewOverlay::Alert {
            message: "gateway down".into()
        }
    );
}
