use std::io::ErrorKind;
use std::io::Read;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use aifm_core::config::SpeechConfig;
use aifm_core::SpeechError;

#[derive(Debug)]
pub enum SpeechEvent {
    Transcript(String),
    Failed(SpeechError),
}

/// Single-shot capture: one session yields at most one event.
pub trait SpeechRecognizer {
    fn start(&self, events: Sender<SpeechEvent>) -> Result<ListeningSession, SpeechError>;
}

pub fn recognizer_from_config(config: &SpeechConfig) -> Box<dyn SpeechRecognizer> {
    match config.command.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => Box::new(CommandRecognizer {
            program: program.to_string(),
            args: config.args.clone(),
        }),
        _ => Box::new(UnsupportedRecognizer),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn start(&self, _events: Sender<SpeechEvent>) -> Result<ListeningSession, SpeechError> {
        Err(SpeechError::Unsupported(
            "no transcriber configured".to_string(),
        ))
    }
}

/// Runs a transcriber program that records one utterance and prints the
/// transcript on stdout.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    pub program: String,
    pub args: Vec<String>,
}

impl SpeechRecognizer for CommandRecognizer {
    fn start(&self, events: Sender<SpeechEvent>) -> Result<ListeningSession, SpeechError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => SpeechError::Unsupported(
                    format!("transcriber {} unavailable: {err}", self.program),
                ),
                _ => SpeechError::Capture(err.to_string()),
            })?;
        tracing::debug!(program = %self.program, "speech capture started");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let child = Arc::new(Mutex::new(child));
        let stopped = Arc::new(AtomicBool::new(false));

        let worker_child = Arc::clone(&child);
        let worker_stopped = Arc::clone(&stopped);
        thread::spawn(move || {
            let stderr_reader = thread::spawn(move || {
                let mut text = String::new();
                if let Some(mut stderr) = stderr {
                    let _ = stderr.read_to_string(&mut text);
                }
                text
            });
            let mut transcript = String::new();
            if let Some(mut stdout) = stdout {
                let _ = stdout.read_to_string(&mut transcript);
            }
            let stderr_text = stderr_reader.join().unwrap_or_default();
            let status = worker_child
                .lock()
                .ok()
                .and_then(|mut child| child.wait().ok());
            if worker_stopped.load(Ordering::SeqCst) {
                return;
            }

            let event = if !status.is_some_and(|status| status.success()) {
                let detail = stderr_text.trim();
                SpeechEvent::Failed(SpeechError::Capture(if detail.is_empty() {
                    "transcriber exited with a non-zero status".to_string()
                } else {
                    detail.to_string()
                }))
            } else if transcript.trim().is_empty() {
                SpeechEvent::Failed(SpeechError::Capture("no speech detected".to_string()))
            } else {
                SpeechEvent::Transcript(transcript.trim().to_string())
            };
            let _ = events.send(event);
        });

        Ok(ListeningSession { child, stopped })
    }
}

/// Handle on a running capture. Stopping discards whatever the transcriber
/// would have produced.
pub struct ListeningSession {
    child: Arc<Mutex<Child>>,
    stopped: Arc<AtomicBool>,
}

impl ListeningSession {
    pub fn stop(self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
        }
        tracing::debug!("speech capture stopped");
    }
}
