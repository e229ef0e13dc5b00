use serde::Deserialize;
use serde::Serialize;

use super::state::ClipboardItem;
use super::state::FileEntry;
use super::state::FileKind;
use super::state::LogEntry;
use super::state::SpecialFolders;
use super::state::FOLDER_SIZE;
use super::state::PLACEHOLDER_SIZE;

/// A requested file-system mutation, one variant per action kind.
///
/// The wire form is the object the interpretation service replies with:
/// `{"action": "move_file", "source": "a.txt", "destination": "docs"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileAction {
    CreatePdf {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CreateTxt {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CreateImage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CreateVideo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CreateAudio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CreateFolder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    DeleteFile {
        name: String,
    },
    MoveFile {
        source: String,
        destination: String,
    },
    CopyFile {
        source: String,
        destination: String,
    },
    Unknown,
}

impl FileAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatePdf { .. } => "create_pdf",
            Self::CreateTxt { .. } => "create_txt",
            Self::CreateImage { .. } => "create_image",
            Self::CreateVideo { .. } => "create_video",
            Self::CreateAudio { .. } => "create_audio",
            Self::CreateFolder { .. } => "create_folder",
            Self::DeleteFile { .. } => "delete_file",
            Self::MoveFile { .. } => "move_file",
            Self::CopyFile { .. } => "copy_file",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Kind, default name and placeholder size of the entry a create action
    /// produces. `None` for every other action.
    pub fn creation(&self) -> Option<Creation> {
        let (kind, name, default_name) = match self {
            Self::CreatePdf { name } => (FileKind::Pdf, name, "Unnamed.pdf"),
            Self::CreateTxt { name } => (FileKind::Text, name, "Unnamed.txt"),
            Self::CreateImage { name } => (FileKind::Image, name, "Unnamed.jpg"),
            Self::CreateVideo { name } => (FileKind::Video, name, "Unnamed.mp4"),
            Self::CreateAudio { name } => (FileKind::Audio, name, "Unnamed.mp3"),
            Self::CreateFolder { name } => (FileKind::Folder, name, "New Folder"),
            _ => return None,
        };
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default_name)
            .to_string();
        let size = if kind == FileKind::Folder {
            FOLDER_SIZE
        } else {
            PLACEHOLDER_SIZE
        };
        Some(Creation { kind, name, size })
    }

    /// Extensions that identify a created file's kind, default first.
    fn creation_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::CreatePdf { .. } => &["pdf"],
            Self::CreateTxt { .. } => &["txt"],
            Self::CreateImage { .. } => &["jpg", "png"],
            Self::CreateVideo { .. } => &["mp4"],
            Self::CreateAudio { .. } => &["mp3"],
            _ => &[],
        }
    }

    /// Canonical utterance for this action, used when a backend only accepts
    /// natural-language commands.
    pub fn canonical_prompt(&self) -> Option<String> {
        match self {
            Self::CreateFolder { .. } => self
                .creation()
                .map(|creation| format!("create folder {}", creation.name)),
            Self::CreatePdf { .. }
            | Self::CreateTxt { .. }
            | Self::CreateImage { .. }
            | Self::CreateVideo { .. }
            | Self::CreateAudio { .. } => self.creation().map(|creation| {
                let extensions = self.creation_extensions();
                let lower = creation.name.to_ascii_lowercase();
                let has_extension = extensions
                    .iter()
                    .any(|ext| lower.ends_with(&format!(".{ext}")));
                match extensions.first() {
                    Some(ext) if !has_extension => format!("{}.{ext}", creation.name),
                    _ => creation.name,
                }
            }),
            Self::DeleteFile { name } => Some(format!("delete {name}")),
            Self::MoveFile {
                source,
                destination,
            } => Some(format!("move {source} to {destination}")),
            Self::CopyFile {
                source,
                destination,
            } => Some(format!("copy {source} to {destination}")),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub kind: FileKind,
    pub name: String,
    pub size: &'static str,
}

impl Creation {
    pub fn into_entry(self, parent_path: &str) -> FileEntry {
        FileEntry::new(self.name, self.kind, self.size, parent_path)
    }
}

#[derive(Debug, Clone)]
pub enum ViewAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    SelectionUp,
    SelectionDown,
    Select(usize),
    OpenSelected,
    Open { name: String },
    NavigateUp,
    NavigateTo { path: String },
    OpenContextMenu { x: u16, y: u16 },
    ContextMenuFor { name: String, x: u16, y: u16 },
    ContextMenuMoveUp,
    ContextMenuMoveDown,
    ContextMenuSubmit,
    CloseOverlay,
    FocusPrompt(bool),
    PromptInput(char),
    PromptBackspace,
    PromptPaste(String),
    PromptSubmit,
    NamingInput(char),
    NamingBackspace,
    NamingSubmit,
    StartCreateFolder,
    Hover(Option<String>),
    Paste,
    ToggleListening,
    ShowRecycleBin,
    Refresh,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    /// Switches the working directory. Virtual mode refilters the collection
    /// immediately; remote mode asks for a fetch.
    Navigate(String),
    ReplaceListing {
        path: String,
        entries: Vec<FileEntry>,
    },
    LoadCollection(Vec<FileEntry>),
    ApplyLocal {
        action: FileAction,
        dir: String,
    },
    RenameLocal {
        dir: String,
        old_name: String,
        new_name: String,
    },
    SetClipboard(Option<ClipboardItem>),
    SetSpecialFolders(SpecialFolders),
    ShowRecycleBin(Vec<FileEntry>),
    ShowAlert(String),
    AppendLog(LogEntry),
    SpeechTranscript(String),
    SpeechFailed {
        message: String,
        unsupported: bool,
    },
    SetPrompt(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCommand {
    Open,
    Preview,
    Rename,
    Cut,
    Copy,
    Duplicate,
    Paste,
    CopyPath,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuItem {
    pub label: &'static str,
    pub command: ContextCommand,
}

pub const CONTEXT_MENU_ITEMS: [ContextMenuItem; 9] = [
    ContextMenuItem {
        label: "Open",
        command: ContextCommand::Open,
    },
    ContextMenuItem {
        label: "Preview",
        command: ContextCommand::Preview,
    },
    ContextMenuItem {
        label: "Rename",
        command: ContextCommand::Rename,
    },
    ContextMenuItem {
        label: "Cut",
        command: ContextCommand::Cut,
    },
    ContextMenuItem {
        label: "Copy",
        command: ContextCommand::Copy,
    },
    ContextMenuItem {
        label: "Duplicate",
        command: ContextCommand::Duplicate,
    },
    ContextMenuItem {
        label: "Paste here",
        command: ContextCommand::Paste,
    },
    ContextMenuItem {
        label: "Copy path",
        command: ContextCommand::CopyPath,
    },
    ContextMenuItem {
        label: "Delete",
        command: ContextCommand::Delete,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn actions_decode_from_service_replies() {
        let action: FileAction =
            serde_json::from_str(r#"{"action":"create_pdf","name":"report.pdf"}"#)
                .expect("decode");
        assert_eq!(
            action,
            FileAction::CreatePdf {
                name: Some("report.pdf".to_string())
            }
        );

        let action: FileAction = serde_json::from_str(
            r#"{"action":"move_file","source":"a.txt","destination":"docs"}"#,
        )
        .expect("decode");
        assert_eq!(
            action,
            FileAction::MoveFile {
                source: "a.txt".to_string(),
                destination: "docs".to_string()
            }
        );

        let action: FileAction =
            serde_json::from_str(r#"{"action":"create_folder"}"#).expect("decode");
        assert_eq!(action, FileAction::CreateFolder { name: None });
    }

    #[test]
    fn replies_missing_required_fields_are_rejected() {
        assert!(serde_json::from_str::<FileAction>(r#"{"action":"delete_file"}"#).is_err());
        assert!(
            serde_json::from_str::<FileAction>(r#"{"action":"copy_file","source":"a"}"#).is_err()
        );
        assert!(serde_json::from_str::<FileAction>(r#"{"action":"rename_all"}"#).is_err());
    }

    #[test]
    fn creation_defaults_follow_action_kind() {
        let pdf = FileAction::CreatePdf { name: None }.creation().expect("create");
        assert_eq!(pdf.name, "Unnamed.pdf");
        assert_eq!(pdf.size, "1 KB");

        let folder = FileAction::CreateFolder {
            name: Some("  ".to_string()),
        }
        .creation()
        .expect("create");
        assert_eq!(folder.name, "New Folder");
        assert_eq!(folder.kind, FileKind::Folder);
        assert_eq!(folder.size, "Folder");

        assert!(FileAction::DeleteFile {
            name: "x".to_string()
        }
        .creation()
        .is_none());
    }

    #[test]
    fn canonical_prompts_follow_action_shape() {
        assert_eq!(
            FileAction::CreateTxt {
                name: Some("notes.txt".to_string())
            }
            .canonical_prompt()
            .as_deref(),
            Some("notes.txt")
        );
        assert_eq!(
            FileAction::CreatePdf {
                name: Some("report".to_string())
            }
            .canonical_prompt()
            .as_deref(),
            Some("report.pdf")
        );
        assert_eq!(
            FileAction::CreateAudio {
                name: Some("song".to_string())
            }
            .canonical_prompt()
            .as_deref(),
            Some("song.mp3")
        );
        assert_eq!(
            FileAction::CreateImage {
                name: Some("Holiday.PNG".to_string())
            }
            .canonical_prompt()
            .as_deref(),
            Some("Holiday.PNG")
        );
        assert_eq!(
            FileAction::CreateFolder { name: None }
                .canonical_prompt()
                .as_deref(),
            Some("create folder New Folder")
        );
        assert_eq!(FileAction::Unknown.canonical_prompt(), None);
    }
}
