use aifm_core::ClipboardOp;
use aifm_core::FileAction;
use aifm_core::FileEntry;
use aifm_core::GatewayError;
use aifm_core::LogEntry;
use aifm_core::LogLevel;
use aifm_core::LogSource;
use aifm_core::PathStyle;
use aifm_core::RuntimeAction;
use aifm_core::SpecialFolders;
use aifm_core::ViewEffect;
use aifm_core::ViewStateStore;

use crate::gateway::RemoteGateway;

/// Applies an action for a working directory. Returns the effects the store
/// produced while reconciling; on error the store is left untouched.
pub trait ActionExecutor {
    fn apply(
        &self,
        store: &mut ViewStateStore,
        action: &FileAction,
        dir: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError>;
}

/// Virtual mode: the store's flat collection is authoritative.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalExecutor;

impl ActionExecutor for LocalExecutor {
    fn apply(
        &self,
        store: &mut ViewStateStore,
        action: &FileAction,
        dir: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError> {
        Ok(store.dispatch_runtime(RuntimeAction::ApplyLocal {
            action: action.clone(),
            dir: dir.to_string(),
        }))
    }
}

/// Remote mode: every mutation is one gateway call followed by a re-fetch of
/// the current directory. Nothing is inserted optimistically.
pub struct RemoteExecutor {
    gateway: Box<dyn RemoteGateway>,
}

impl RemoteExecutor {
    pub fn new(gateway: Box<dyn RemoteGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &dyn RemoteGateway {
        self.gateway.as_ref()
    }

    /// Replaces the listing for `path`. Stale replies are dropped by the
    /// reducer.
    pub fn refresh(
        &self,
        store: &mut ViewStateStore,
        path: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError> {
        let entries = self.gateway.listing(path)?;
        tracing::debug!(path, entries = entries.len(), "listing fetched");
        Ok(store.dispatch_runtime(RuntimeAction::ReplaceListing {
            path: path.to_string(),
            entries,
        }))
    }

    pub fn rename(
        &self,
        store: &mut ViewStateStore,
        dir: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError> {
        self.gateway.rename(dir, old_name, new_name)?;
        log(store, format!("renamed {old_name} to {new_name}"));
        self.refresh_current(store)
    }

    /// Pastes a clipboard entry into `destination`. The clipboard is cleared
    /// only after the gateway acknowledges.
    pub fn transfer(
        &self,
        store: &mut ViewStateStore,
        operation: ClipboardOp,
        source: &FileEntry,
        destination: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError> {
        let source_path = PathStyle::Windows.join(&source.parent_path, &source.name);
        match operation {
            ClipboardOp::Move => self.gateway.move_entry(&source_path, destination)?,
            ClipboardOp::Copy => self.gateway.copy_entry(&source_path, destination)?,
        }
        log(
            store,
            format!("{} {source_path} to {destination}", operation.label()),
        );
        let mut effects = store.dispatch_runtime(RuntimeAction::SetClipboard(None));
        effects.extend(self.refresh_current(store)?);
        Ok(effects)
    }

    pub fn special_folders(
        &self,
        store: &mut ViewStateStore,
    ) -> Result<SpecialFolders, GatewayError> {
        if let Some(folders) = store.get().special_folders.clone() {
            return Ok(folders);
        }
        let folders = self.gateway.special_folders()?;
        store.dispatch_runtime(RuntimeAction::SetSpecialFolders(folders.clone()));
        Ok(folders)
    }

    pub fn recycle_bin(&self, store: &mut ViewStateStore) -> Result<Vec<ViewEffect>, GatewayError> {
        let entries = self.gateway.recycle_bin()?;
        Ok(store.dispatch_runtime(RuntimeAction::ShowRecycleBin(entries)))
    }

    fn refresh_current(&self, store: &mut ViewStateStore) -> Result<Vec<ViewEffect>, GatewayError> {
        let cwd = store.get().cwd.clone();
        self.refresh(store, &cwd)
    }

    /// Absolute gateway path for a move/copy destination: special-folder
    /// aliases first, then absolute paths as given, then relative to `dir`.
    fn destination_path(
        &self,
        store: &mut ViewStateStore,
        destination: &str,
        dir: &str,
    ) -> String {
        let destination = destination.trim();
        match self.special_folders(store) {
            Ok(folders) => {
                if let Some(path) = folders.lookup(destination) {
                    return path.to_string();
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "special folders unavailable");
            }
        }
        if is_absolute(destination) {
            destination.to_string()
        } else {
            PathStyle::Windows.join(dir, destination)
        }
    }
}

impl ActionExecutor for RemoteExecutor {
    fn apply(
        &self,
        store: &mut ViewStateStore,
        action: &FileAction,
        dir: &str,
    ) -> Result<Vec<ViewEffect>, GatewayError> {
        match action {
            FileAction::Unknown => return Ok(Vec::new()),
            FileAction::MoveFile {
                source,
                destination,
            }
            | FileAction::CopyFile {
                source,
                destination,
            } => {
                let source = if is_absolute(source) {
                    source.clone()
                } else {
                    PathStyle::Windows.join(dir, source)
                };
                let destination = self.destination_path(store, destination, dir);
                if matches!(action, FileAction::MoveFile { .. }) {
                    self.gateway.move_entry(&source, &destination)?;
                } else {
                    self.gateway.copy_entry(&source, &destination)?;
                }
            }
            // Create and delete have no dedicated endpoint; the gateway runs
            // them from their canonical prompt.
            _ => {
                if let Some(prompt) = action.canonical_prompt() {
                    self.gateway.process(&prompt, dir)?;
                }
            }
        }
        log(store, format!("{} applied in {dir}", action.label()));
        self.refresh_current(store)
    }
}

fn is_absolute(path: &str) -> bool {
    path.contains(':') || path.starts_with('\\')
}

fn log(store: &mut ViewStateStore, message: String) {
    store.dispatch_runtime(RuntimeAction::AppendLog(LogEntry::new(
        LogLevel::Info,
        LogSource::Gateway,
        message,
    )));
}
