//! Utterance interpretation that needs no network: the literal-filename fast
//! path and decoding of interpretation-service replies into [`FileAction`].

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::actions::FileAction;
use crate::errors::IntentError;
use crate::state::FileEntry;

static LITERAL_FILENAME: OnceLock<Regex> = OnceLock::new();

/// Instructions sent ahead of every utterance to a chat-completion service.
pub const INTENT_SYSTEM_PROMPT: &str = "You are an AI file manager. Interpret the user's \
request and reply with exactly one JSON object and nothing else. Possible actions: \
create_pdf, create_txt, create_image, create_video, create_audio, create_folder, \
delete_file, move_file, copy_file. Create and delete actions carry \"name\" (the file name \
with extension, or the folder name). Move and copy actions carry \"source\" and \
\"destination\". A request that is only a file name with an extension creates that file. \
If the request is unclear reply {\"action\": \"unknown\"}. \
Example: {\"action\": \"move_file\", \"source\": \"a.txt\", \"destination\": \"docs\"}";

/// Outcome of resolving one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An action the caller still has to apply.
    Action(FileAction),
    /// The backend already applied the change and returned the resulting
    /// listing.
    Applied(Vec<FileEntry>),
}

impl Resolution {
    pub fn unknown() -> Self {
        Self::Action(FileAction::Unknown)
    }
}

fn literal_filename() -> &'static Regex {
    LITERAL_FILENAME.get_or_init(|| {
        Regex::new(r"(?i)^[A-Za-z0-9_]+\.(pdf|txt|jpg|png|mp4|mp3)$")
            .expect("literal filename pattern compiles")
    })
}

/// `report.pdf` style utterances map straight to a create action.
pub fn literal_filename_action(utterance: &str) -> Option<FileAction> {
    let captures = literal_filename().captures(utterance)?;
    let ext = captures.get(1)?.as_str().to_ascii_lowercase();
    let name = Some(utterance.to_string());
    let action = match ext.as_str() {
        "pdf" => FileAction::CreatePdf { name },
        "txt" => FileAction::CreateTxt { name },
        "jpg" | "png" => FileAction::CreateImage { name },
        "mp4" => FileAction::CreateVideo { name },
        "mp3" => FileAction::CreateAudio { name },
        _ => return None,
    };
    Some(action)
}

/// Decodes the text of a chat-completion reply. Models often wrap JSON in a
/// markdown fence; the fence is stripped before decoding.
pub fn parse_action_reply(text: &str) -> Result<FileAction, IntentError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(IntentError::Malformed("empty reply".to_string()));
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| IntentError::Malformed(err.to_string()))?;
    parse_action_value(value)
}

pub fn parse_action_value(value: serde_json::Value) -> Result<FileAction, IntentError> {
    if !value.is_object() {
        return Err(IntentError::Malformed("reply is not an object".to_string()));
    }
    match serde_json::from_value::<FileAction>(value) {
        Ok(FileAction::Unknown) => Err(IntentError::Unrecognized),
        Ok(action) => Ok(action),
        Err(_) => Err(IntentError::Unrecognized),
    }
}

/// Body of the gateway's `/process` reply: either the backend already ran
/// the command and lists the directory, or it hands an action back.
pub fn parse_process_reply(value: serde_json::Value) -> Result<Resolution, IntentError> {
    #[derive(Deserialize)]
    struct Applied {
        files: Vec<FileEntry>,
    }

    if value.get("files").is_some() {
        let applied = serde_json::from_value::<Applied>(value)
            .map_err(|err| IntentError::Malformed(err.to_string()))?;
        return Ok(Resolution::Applied(applied.files));
    }
    parse_action_value(value).map(Resolution::Action)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop an info string such as `json` on the opening fence line.
    match rest.find('\n') {
        Some(idx) if !rest[..idx].trim_start().starts_with('{') => rest[idx + 1..].trim(),
        _ => rest.trim(),
    }
}
