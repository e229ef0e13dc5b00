use std::collections::VecDeque;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Text,
    Image,
    Video,
    Audio,
    Folder,
    Drive,
    File,
}

// Unknown wire values fall back to `File` instead of failing the listing.
impl<'de> Deserialize<'de> for FileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Folder => "folder",
            Self::Drive => "drive",
            Self::File => "file",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "text" | "txt" => Self::Text,
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "folder" | "directory" => Self::Folder,
            "drive" => Self::Drive,
            _ => Self::File,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Folder | Self::Drive)
    }

    pub fn is_previewable(self) -> bool {
        matches!(
            self,
            Self::Pdf | Self::Text | Self::Image | Self::Video | Self::Audio
        )
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "md" | "log" => Self::Text,
            "jpg" | "jpeg" | "png" | "gif" => Self::Image,
            "mp4" | "mkv" | "mov" => Self::Video,
            "mp3" | "wav" | "flac" => Self::Audio,
            _ => Self::File,
        }
    }
}

pub const FOLDER_SIZE: &str = "Folder";
pub const PLACEHOLDER_SIZE: &str = "1 KB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default)]
    pub size: String,
    #[serde(rename = "path", alias = "parentPath", default)]
    pub parent_path: String,
}

impl FileEntry {
    pub fn new(
        name: impl Into<String>,
        kind: FileKind,
        size: impl Into<String>,
        parent_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            size: size.into(),
            parent_path: parent_path.into(),
        }
    }

    pub fn folder(name: impl Into<String>, parent_path: impl Into<String>) -> Self {
        Self::new(name, FileKind::Folder, FOLDER_SIZE, parent_path)
    }
}

pub fn default_collection() -> Vec<FileEntry> {
    vec![
        FileEntry::new("Report.pdf", FileKind::Pdf, "2.1 MB", ""),
        FileEntry::new("Vacation.jpg", FileKind::Image, "5.3 MB", ""),
        FileEntry::new("Tutorial.mp4", FileKind::Video, "120 MB", ""),
        FileEntry::folder("Projects", ""),
        FileEntry::new("Song.mp3", FileKind::Audio, "8.2 MB", ""),
        FileEntry::new("Notes.txt", FileKind::Text, "15 KB", ""),
    ]
}

pub fn visible_entries(collection: &[FileEntry], cwd: &str) -> Vec<FileEntry> {
    collection
        .iter()
        .filter(|entry| entry.parent_path == cwd)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    Virtual,
    Remote,
}

impl StoreMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Remote => "remote",
        }
    }

    pub fn path_style(self) -> PathStyle {
        match self {
            Self::Virtual => PathStyle::Virtual,
            Self::Remote => PathStyle::Windows,
        }
    }
}

/// Separator convention for working-directory paths. Paths are compared as
/// exact strings; nothing here normalizes case or `.`/`..` segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Virtual,
    Windows,
}

impl PathStyle {
    pub fn separator(self) -> char {
        match self {
            Self::Virtual => '/',
            Self::Windows => '\\',
        }
    }

    /// Path of `name` inside `dir`.
    ///
    /// Virtual directories carry their trailing separator (`Projects/`), so a
    /// child folder is `dir + name + "/"`. Windows paths are joined with a
    /// single `\` and no trailing one.
    pub fn child_dir(self, dir: &str, name: &str) -> String {
        match self {
            Self::Virtual => format!("{dir}{name}/"),
            Self::Windows => self.join(dir, name),
        }
    }

    pub fn join(self, dir: &str, name: &str) -> String {
        let sep = self.separator();
        if dir.is_empty() {
            name.to_string()
        } else if dir.ends_with(sep) {
            format!("{dir}{name}")
        } else {
            format!("{dir}{sep}{name}")
        }
    }

    pub fn with_trailing_separator(self, path: &str) -> String {
        let sep = self.separator();
        if path.is_empty() || path.ends_with(sep) {
            path.to_string()
        } else {
            format!("{path}{sep}")
        }
    }

    /// Splits `a/b/c.txt` into (`a/b/`, `c.txt`) for virtual paths and
    /// `C:\a\c.txt` into (`C:\a`, `c.txt`) for Windows paths. A bare name has
    /// no parent.
    pub fn split_parent(self, path: &str) -> Option<(String, String)> {
        let sep = self.separator();
        let idx = path.rfind(sep)?;
        let name = path[idx + sep.len_utf8()..].to_string();
        let parent = match self {
            Self::Virtual => path[..idx + sep.len_utf8()].to_string(),
            Self::Windows => {
                let head = &path[..idx];
                if head.ends_with(':') {
                    format!("{head}{sep}")
                } else {
                    head.to_string()
                }
            }
        };
        Some((parent, name))
    }

    pub fn parent_of(self, dir: &str) -> String {
        let sep = self.separator();
        let trimmed = dir.strip_suffix(sep).unwrap_or(dir);
        match trimmed.rfind(sep) {
            None => String::new(),
            Some(idx) => match self {
                Self::Virtual => trimmed[..idx + sep.len_utf8()].to_string(),
                Self::Windows => {
                    let head = &trimmed[..idx];
                    if head.ends_with(':') && idx + sep.len_utf8() < trimmed.len() {
                        format!("{head}{sep}")
                    } else {
                        head.to_string()
                    }
                }
            },
        }
    }

    /// Breadcrumb segments as (label, target path) pairs, root excluded.
    pub fn breadcrumbs(self, dir: &str) -> Vec<(String, String)> {
        let sep = self.separator();
        let parts: Vec<&str> = dir.split(sep).filter(|part| !part.is_empty()).collect();
        let mut crumbs = Vec::with_capacity(parts.len());
        let mut acc = String::new();
        for part in parts {
            match self {
                Self::Virtual => {
                    acc.push_str(part);
                    acc.push(sep);
                }
                Self::Windows => {
                    if !acc.is_empty() && !acc.ends_with(sep) {
                        acc.push(sep);
                    }
                    acc.push_str(part);
                    if part.ends_with(':') {
                        acc.push(sep);
                    }
                }
            }
            crumbs.push((part.to_string(), acc.clone()));
        }
        crumbs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Move,
    Copy,
}

impl ClipboardOp {
    pub fn label(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub entry: FileEntry,
    pub operation: ClipboardOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialFolders {
    #[serde(default)]
    pub downloads: String,
    #[serde(default)]
    pub documents: String,
    #[serde(default)]
    pub desktop: String,
    #[serde(default)]
    pub pictures: String,
    #[serde(default)]
    pub music: String,
    #[serde(default)]
    pub videos: String,
}

impl SpecialFolders {
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        let path = match alias.trim().to_ascii_lowercase().as_str() {
            "downloads" => &self.downloads,
            "documents" => &self.documents,
            "desktop" => &self.desktop,
            "pictures" => &self.pictures,
            "music" => &self.music,
            "videos" => &self.videos,
            _ => return None,
        };
        if path.is_empty() {
            None
        } else {
            Some(path.as_str())
        }
    }

    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("Downloads", self.downloads.as_str()),
            ("Documents", self.documents.as_str()),
            ("Desktop", self.desktop.as_str()),
            ("Pictures", self.pictures.as_str()),
            ("Music", self.music.as_str()),
            ("Videos", self.videos.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPurpose {
    Rename,
    CreateFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingDraft {
    pub purpose: NamingPurpose,
    pub original: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOverlay {
    None,
    ContextMenu {
        x: u16,
        y: u16,
        entry: FileEntry,
        selected: usize,
    },
    Naming(NamingDraft),
    Preview {
        entry: FileEntry,
    },
    RecycleBin {
        entries: Vec<FileEntry>,
    },
    Alert {
        message: Arc<str>,
    },
}

#[derive(Debug, Clone)]
pub struct ViewInteraction {
    pub overlay: ViewOverlay,
    pub selected: usize,
    pub hovered: Option<String>,
    pub prompt: String,
    pub prompt_focused: bool,
    pub listening: bool,
    pub speech_disabled: bool,
}

impl Default for ViewInteraction {
    fn default() -> Self {
        Self {
            overlay: ViewOverlay::None,
            selected: 0,
            hovered: None,
            prompt: String::new(),
            prompt_focused: true,
            listening: false,
            speech_disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    App,
    Intent,
    Gateway,
    Storage,
    Speech,
}

impl LogSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Intent => "intent",
            Self::Gateway => "gateway",
            Self::Storage => "storage",
            Self::Speech => "speech",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub ts_ms: Option<i64>,
    pub source: LogSource,
    pub context: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, source: LogSource, message: impl Into<String>) -> Self {
        Self {
            seq: 0,
            level,
            ts_ms: Some(chrono::Utc::now().timestamp_millis()),
            source,
            context: None,
            message: message.into(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.buf.back()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: StoreMode,
    pub path_style: PathStyle,
    pub cwd: String,
    /// Entries shown for `cwd`.
    pub listing: Vec<FileEntry>,
    /// Flat authoritative collection; only populated in virtual mode.
    pub collection: Vec<FileEntry>,
    pub clipboard: Option<ClipboardItem>,
    pub special_folders: Option<SpecialFolders>,
    pub interaction: ViewInteraction,
    pub logs: LogBuffer,
}

impl ViewState {
    pub fn new(mode: StoreMode) -> Self {
        Self {
            mode,
            path_style: mode.path_style(),
            cwd: String::new(),
            listing: Vec::new(),
            collection: Vec::new(),
            clipboard: None,
            special_folders: None,
            interaction: ViewInteraction::default(),
            logs: LogBuffer::new(500),
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.listing.get(self.interaction.selected)
    }

    pub fn entry_named(&self, name: &str) -> Option<&FileEntry> {
        self.listing.iter().find(|entry| entry.name == name)
    }

    pub fn is_root(&self) -> bool {
        self.cwd.is_empty()
    }

    pub fn cwd_label(&self) -> String {
        if self.cwd.is_empty() {
            match self.mode {
                StoreMode::Virtual => "Home".to_string(),
                StoreMode::Remote => "This PC".to_string(),
            }
        } else {
            self.cwd.clone()
        }
    }

    pub fn entry_path(&self, entry: &FileEntry) -> String {
        self.path_style.join(&entry.parent_path, &entry.name)
    }
}
