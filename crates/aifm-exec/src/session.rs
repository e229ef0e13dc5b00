//! Command handler: runs actions through the store and carries out the
//! effects that need the intent service or the gateway.
//!
//! Effects are drained in order, one at a time, so each command runs to
//! completion before the next one is looked at. Every failure becomes a log
//! entry plus an alert; nothing here returns an error to the front end.

use std::collections::VecDeque;

use aifm_core::AppError;
use aifm_core::FileAction;
use aifm_core::GatewayError;
use aifm_core::LogEntry;
use aifm_core::LogLevel;
use aifm_core::LogSource;
use aifm_core::Resolution;
use aifm_core::RuntimeAction;
use aifm_core::StoreMode;
use aifm_core::UserAction;
use aifm_core::ViewAction;
use aifm_core::ViewEffect;
use aifm_core::ViewState;
use aifm_core::ViewStateStore;

use crate::executor::ActionExecutor;
use crate::executor::LocalExecutor;
use crate::executor::RemoteExecutor;
use crate::gateway::place_in_directory;
use crate::intent::resolve;
use crate::intent::GatewayIntentService;
use crate::intent::IntentService;

pub enum Backend {
    Virtual {
        executor: LocalExecutor,
        intent: Option<Box<dyn IntentService>>,
    },
    Remote(RemoteExecutor),
}

impl Backend {
    pub fn virtual_with(intent: Option<Box<dyn IntentService>>) -> Self {
        Self::Virtual {
            executor: LocalExecutor,
            intent,
        }
    }

    pub fn mode(&self) -> StoreMode {
        match self {
            Self::Virtual { .. } => StoreMode::Virtual,
            Self::Remote(_) => StoreMode::Remote,
        }
    }
}

pub struct Session {
    store: ViewStateStore,
    backend: Backend,
}

impl Session {
    pub fn new(store: ViewStateStore, backend: Backend) -> Self {
        Self { store, backend }
    }

    pub fn state(&self) -> &ViewState {
        self.store.get()
    }

    pub fn store_mut(&mut self) -> &mut ViewStateStore {
        &mut self.store
    }

    /// Initial load. Remote mode lists the drives and caches the special
    /// folders; a missing special-folders endpoint is not worth an alert.
    pub fn start(&mut self) -> Vec<ViewEffect> {
        let mut effects = Vec::new();
        if let Backend::Remote(executor) = &self.backend {
            if let Err(err) = executor.special_folders(&mut self.store) {
                tracing::warn!(error = %err, "special folders unavailable");
            }
            effects.push(ViewEffect::FetchListing {
                path: self.store.get().cwd.clone(),
            });
        }
        effects.push(ViewEffect::RequestFrame);
        self.drain(effects)
    }

    /// Dispatches `action` and returns the effects only the front end can
    /// carry out.
    pub fn handle(&mut self, action: ViewAction) -> Vec<ViewEffect> {
        let effects = self.store.dispatch(action);
        self.drain(effects)
    }

    pub fn user(&mut self, action: UserAction) -> Vec<ViewEffect> {
        self.handle(ViewAction::User(action))
    }

    pub fn runtime(&mut self, action: RuntimeAction) -> Vec<ViewEffect> {
        self.handle(ViewAction::Runtime(action))
    }

    /// Submits `utterance` as if it had been typed into the prompt.
    pub fn submit(&mut self, utterance: &str) -> Vec<ViewEffect> {
        let mut effects = self.runtime(RuntimeAction::SetPrompt(utterance.to_string()));
        for effect in self.user(UserAction::PromptSubmit) {
            if !effects.contains(&effect) {
                effects.push(effect);
            }
        }
        effects
    }

    fn drain(&mut self, effects: Vec<ViewEffect>) -> Vec<ViewEffect> {
        let mut queue: VecDeque<ViewEffect> = effects.into();
        let mut front_end = Vec::new();
        while let Some(effect) = queue.pop_front() {
            let result = match effect {
                ViewEffect::RequestFrame
                | ViewEffect::CopyToClipboard(_)
                | ViewEffect::StartListening
                | ViewEffect::StopListening => {
                    if !front_end.contains(&effect) {
                        front_end.push(effect);
                    }
                    continue;
                }
                // The store persists before handing effects out.
                ViewEffect::PersistCollection => continue,
                ViewEffect::ResolveIntent {
                    utterance,
                    context_path,
                } => self.resolve_intent(&utterance, &context_path),
                ViewEffect::FetchListing { path } => self.fetch_listing(&path),
                ViewEffect::Execute { action, dir } => self.execute(&action, &dir),
                ViewEffect::Rename {
                    dir,
                    old_name,
                    new_name,
                } => self.remote(|executor, store| {
                    executor.rename(store, &dir, &old_name, &new_name)
                }),
                ViewEffect::Transfer {
                    operation,
                    source,
                    destination,
                } => self.remote(|executor, store| {
                    executor.transfer(store, operation, &source, &destination)
                }),
                ViewEffect::FetchRecycleBin => {
                    self.remote(|executor, store| executor.recycle_bin(store))
                }
            };
            match result {
                Ok(more) => queue.extend(more),
                Err(err) => queue.extend(self.fail(err)),
            }
        }
        front_end
    }

    fn resolve_intent(
        &mut self,
        utterance: &str,
        context_path: &str,
    ) -> Result<Vec<ViewEffect>, AppError> {
        let resolution = match &self.backend {
            Backend::Virtual { intent, .. } => resolve(intent.as_deref(), utterance, context_path),
            Backend::Remote(executor) => {
                let service = GatewayIntentService::new(executor.gateway());
                resolve(Some(&service), utterance, context_path)
            }
        };
        match resolution {
            Resolution::Action(FileAction::Unknown) => {
                self.log(
                    LogLevel::Info,
                    LogSource::Intent,
                    format!("unresolved: {utterance}"),
                );
                Ok(self.store.dispatch_runtime(RuntimeAction::ShowAlert(format!(
                    "Could not understand \"{utterance}\". Please try again."
                ))))
            }
            Resolution::Action(action) => self.execute(&action, context_path),
            Resolution::Applied(mut entries) => {
                place_in_directory(&mut entries, context_path);
                self.log(
                    LogLevel::Info,
                    LogSource::Intent,
                    format!("applied by gateway: {utterance}"),
                );
                Ok(self.store.dispatch_runtime(RuntimeAction::ReplaceListing {
                    path: context_path.to_string(),
                    entries,
                }))
            }
        }
    }

    fn execute(&mut self, action: &FileAction, dir: &str) -> Result<Vec<ViewEffect>, AppError> {
        let effects = match &self.backend {
            Backend::Virtual { executor, .. } => executor.apply(&mut self.store, action, dir)?,
            Backend::Remote(executor) => executor.apply(&mut self.store, action, dir)?,
        };
        Ok(effects)
    }

    fn fetch_listing(&mut self, path: &str) -> Result<Vec<ViewEffect>, AppError> {
        match &self.backend {
            Backend::Virtual { .. } => Ok(Vec::new()),
            Backend::Remote(executor) => Ok(executor.refresh(&mut self.store, path)?),
        }
    }

    fn remote<F>(&mut self, op: F) -> Result<Vec<ViewEffect>, AppError>
    where
        F: FnOnce(&RemoteExecutor, &mut ViewStateStore) -> Result<Vec<ViewEffect>, GatewayError>,
    {
        match &self.backend {
            Backend::Remote(executor) => Ok(op(executor, &mut self.store)?),
            Backend::Virtual { .. } => {
                tracing::debug!("remote-only effect ignored in virtual mode");
                Ok(Vec::new())
            }
        }
    }

    fn fail(&mut self, err: AppError) -> Vec<ViewEffect> {
        tracing::error!(error = %err, "command failed");
        let source = match &err {
            AppError::Intent(_) => LogSource::Intent,
            AppError::Gateway(_) => LogSource::Gateway,
            AppError::Speech(_) => LogSource::Speech,
            AppError::Storage(_) | AppError::Config(_) => LogSource::Storage,
        };
        self.log(LogLevel::Error, source, err.to_string());
        self.store
            .dispatch_runtime(RuntimeAction::ShowAlert(err.to_string()))
    }

    fn log(&mut self, level: LogLevel, source: LogSource, message: String) {
        self.store
            .dispatch_runtime(RuntimeAction::AppendLog(LogEntry::new(level, source, message)));
    }
}
