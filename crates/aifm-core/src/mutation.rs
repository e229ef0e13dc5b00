//! In-place mutations of the flat virtual collection.
//!
//! Every function reports whether the collection changed so callers can skip
//! the write-through when a command turned out to be a no-op. Commands naming
//! entries that do not exist are no-ops, never errors: a user repeating a
//! command after the entry already moved must not see a failure.

use crate::actions::FileAction;
use crate::state::ClipboardOp;
use crate::state::FileEntry;
use crate::state::PathStyle;

pub const COPY_SUFFIX: &str = " copy";

pub fn apply_file_action(
    collection: &mut Vec<FileEntry>,
    action: &FileAction,
    dir: &str,
    style: PathStyle,
) -> bool {
    if let Some(creation) = action.creation() {
        collection.push(creation.into_entry(dir));
        return true;
    }

    match action {
        FileAction::DeleteFile { name } => delete_entries(collection, dir, name),
        FileAction::MoveFile {
            source,
            destination,
        } => {
            let (source_dir, name) = resolve_source(source, dir, style);
            let destination = style.with_trailing_separator(destination);
            transfer(
                collection,
                ClipboardOp::Move,
                &source_dir,
                &name,
                &destination,
            )
        }
        FileAction::CopyFile {
            source,
            destination,
        } => {
            let (source_dir, name) = resolve_source(source, dir, style);
            let destination = style.with_trailing_separator(destination);
            transfer(
                collection,
                ClipboardOp::Copy,
                &source_dir,
                &name,
                &destination,
            )
        }
        _ => false,
    }
}

/// Moves or copies the first entry named `name` in `source_dir` into
/// `destination` verbatim. Copies get the conventional suffix.
pub fn transfer(
    collection: &mut Vec<FileEntry>,
    operation: ClipboardOp,
    source_dir: &str,
    name: &str,
    destination: &str,
) -> bool {
    let Some(idx) = collection
        .iter()
        .position(|entry| entry.parent_path == source_dir && entry.name == name)
    else {
        return false;
    };

    match operation {
        ClipboardOp::Move => {
            collection[idx].parent_path = destination.to_string();
        }
        ClipboardOp::Copy => {
            let mut copy = collection[idx].clone();
            copy.name.push_str(COPY_SUFFIX);
            copy.parent_path = destination.to_string();
            collection.push(copy);
        }
    }
    true
}

pub fn delete_entries(collection: &mut Vec<FileEntry>, dir: &str, name: &str) -> bool {
    let before = collection.len();
    collection.retain(|entry| !(entry.parent_path == dir && entry.name == name));
    collection.len() != before
}

pub fn rename_entry(
    collection: &mut [FileEntry],
    dir: &str,
    old_name: &str,
    new_name: &str,
) -> bool {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name == old_name {
        return false;
    }
    match collection
        .iter_mut()
        .find(|entry| entry.parent_path == dir && entry.name == old_name)
    {
        Some(entry) => {
            entry.name = new_name.to_string();
            true
        }
        None => false,
    }
}

/// A source containing a separator names its own directory; a bare name is
/// looked up in `dir`.
pub fn resolve_source(source: &str, dir: &str, style: PathStyle) -> (String, String) {
    match style.split_parent(source) {
        Some((parent, name)) => (parent, name),
        None => (dir.to_string(), source.to_string()),
    }
}
