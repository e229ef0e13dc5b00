use serde::Deserialize;
use serde::Serialize;

use aifm_core::FileEntry;
use aifm_core::FileKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Bytes.
    #[serde(default)]
    pub available_free_space: u64,
}

impl DriveInfo {
    pub fn into_entry(self) -> FileEntry {
        let size = format!("{} free", format_bytes(self.available_free_space));
        FileEntry::new(self.name, FileKind::Drive, size, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequest<'a> {
    #[serde(rename = "Prompt")]
    pub prompt: &'a str,
    #[serde(rename = "Path")]
    pub path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest<'a> {
    pub path: &'a str,
    pub old_name: &'a str,
    pub new_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest<'a> {
    pub source: &'a str,
    pub destination: &'a str,
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
