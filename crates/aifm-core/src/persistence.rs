use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use crate::errors::StorageError;
use crate::state::FileEntry;

pub const COLLECTION_FILE_NAME: &str = "ai-files.json";

/// Durable home of the flat virtual collection. Every save overwrites the
/// whole collection; there is no partial write.
pub trait ListingPersistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<FileEntry>>, StorageError>;
    fn save(&mut self, collection: &[FileEntry]) -> Result<(), StorageError>;
}

#[derive(Debug)]
pub struct JsonFileListing {
    path: PathBuf,
}

impl JsonFileListing {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl ListingPersistence for JsonFileListing {
    fn load(&self) -> Result<Option<Vec<FileEntry>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        let collection = serde_json::from_slice::<Vec<FileEntry>>(&bytes)
            .map_err(|err| StorageError::Decode(format!("{}: {err}", self.path.display())))?;
        Ok(Some(collection))
    }

    fn save(&mut self, collection: &[FileEntry]) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(collection)
            .map_err(|err| StorageError::Encode(err.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        write_private(tmp_path.as_path(), &encoded)?;
        std::fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            entries = collection.len(),
            "collection saved"
        );
        Ok(())
    }
}

/// In-memory port for tests and for runs that must not touch disk. Clones
/// share the same slot so a test can inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryListing {
    slot: Rc<RefCell<Option<Vec<FileEntry>>>>,
    fail_saves: bool,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(collection: Vec<FileEntry>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(collection))),
            fail_saves: false,
        }
    }

    /// Every subsequent save fails with an I/O error.
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn snapshot(&self) -> Option<Vec<FileEntry>> {
        self.slot.borrow().clone()
    }
}

impl ListingPersistence for MemoryListing {
    fn load(&self) -> Result<Option<Vec<FileEntry>>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, collection: &[FileEntry]) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Io(std::io::Error::other("storage unavailable")));
        }
        *self.slot.borrow_mut() = Some(collection.to_vec());
        Ok(())
    }
}

pub fn default_collection_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aifm")
        .join(COLLECTION_FILE_NAME)
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
