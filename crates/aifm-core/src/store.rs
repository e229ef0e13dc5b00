//! Owner of the [`ViewState`].
//!
//! The store runs actions through the reducer, performs the write-through of
//! the virtual collection itself and hands every other effect back to the
//! caller. Subscribers are notified once per dispatch, after persistence.

use crate::actions::RuntimeAction;
use crate::actions::ViewAction;
use crate::errors::StorageError;
use crate::persistence::ListingPersistence;
use crate::reducer::reduce;
use crate::reducer::ViewEffect;
use crate::state::default_collection;
use crate::state::LogEntry;
use crate::state::LogLevel;
use crate::state::LogSource;
use crate::state::StoreMode;
use crate::state::ViewState;

type Subscriber = Box<dyn FnMut(&ViewState)>;

pub struct ViewStateStore {
    state: ViewState,
    persistence: Box<dyn ListingPersistence>,
    subscribers: Vec<Subscriber>,
}

impl ViewStateStore {
    /// Reads the persisted collection once. A virtual store with nothing
    /// persisted is seeded with the default collection, which is saved
    /// immediately.
    pub fn open(
        mode: StoreMode,
        mut persistence: Box<dyn ListingPersistence>,
    ) -> Result<Self, StorageError> {
        let mut state = ViewState::new(mode);
        if mode == StoreMode::Virtual {
            let collection = match persistence.load()? {
                Some(collection) => collection,
                None => {
                    let seeded = default_collection();
                    persistence.save(&seeded)?;
                    tracing::info!(entries = seeded.len(), "seeded default collection");
                    seeded
                }
            };
            reduce(
                &mut state,
                ViewAction::Runtime(RuntimeAction::LoadCollection(collection)),
            );
        }
        Ok(Self {
            state,
            persistence,
            subscribers: Vec::new(),
        })
    }

    pub fn get(&self) -> &ViewState {
        &self.state
    }

    /// Replaces the whole state. A changed virtual collection is persisted.
    pub fn set(&mut self, state: ViewState) {
        let changed = state.collection != self.state.collection;
        self.state = state;
        if changed && self.state.mode == StoreMode::Virtual {
            self.persist();
        }
        self.notify();
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ViewState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Reduces `action` and returns the effects the caller still has to
    /// carry out. `PersistCollection` never leaves the store.
    pub fn dispatch(&mut self, action: ViewAction) -> Vec<ViewEffect> {
        let effects = reduce(&mut self.state, action);
        let mut pending = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                ViewEffect::PersistCollection => self.persist(),
                other => pending.push(other),
            }
        }
        self.notify();
        pending
    }

    pub fn dispatch_runtime(&mut self, action: RuntimeAction) -> Vec<ViewEffect> {
        self.dispatch(ViewAction::Runtime(action))
    }

    fn persist(&mut self) {
        if let Err(err) = self.persistence.save(&self.state.collection) {
            tracing::error!(error = %err, "collection write-through failed");
            reduce(
                &mut self.state,
                ViewAction::Runtime(RuntimeAction::AppendLog(
                    LogEntry::new(LogLevel::Error, LogSource::Storage, err.to_string())
                        .with_context("write-through"),
                )),
            );
            reduce(
                &mut self.state,
                ViewAction::Runtime(RuntimeAction::ShowAlert(format!(
                    "Could not save files: {err}"
                ))),
            );
        }
    }

    fn notify(&mut self) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }
}
