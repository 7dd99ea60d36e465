//! Derived-name keyed registry that multiplexes store operations onto persisters.
//!
//! Each logical store moves from uninitialized to initialized through [`StateRegistry::init`];
//! the transition is one-way and idempotent. The persister chosen at that point is fixed for the
//! lifetime of the registry. History lives in the registry, never in the persister, so it does not
//! survive a reload even for browser-storage backed stores.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    copy::detach,
    error::{StoreError, StoreResult},
    persister::{
        memory::MemoryPersister, storage::StoragePersister, SharedState, StateObject,
        StatePersister,
    },
    settings::{Persistence, StoreStateSettings},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Mutation kinds reported in store history and change logs.
pub enum StateAction {
    /// A shallow merge written through [`StateRegistry::set`].
    Set,
    /// A reset through [`StateRegistry::clear`].
    ///
    /// Only labels change-log lines; clearing empties history, so no entry ever carries it.
    Clear,
}

impl StateAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One recorded mutation of a logical store.
pub struct StateHistoryEntry {
    /// Mutation kind.
    pub action: StateAction,
    /// Stored state before the mutation.
    pub begin_state: Option<StateObject>,
    /// Stored state after the mutation.
    pub end_state: Option<StateObject>,
    /// Position of the entry in the store's history, counted from the store's `init`.
    pub sequence: u64,
}

/// Shared persisters serving every session- and local-backed store of a registry.
pub struct RegistryBackends {
    /// Persister behind `sessionStorage` stores.
    pub session: Rc<dyn StatePersister>,
    /// Persister behind `localStorage` stores.
    pub local: Rc<dyn StatePersister>,
}

impl RegistryBackends {
    /// Wraps concrete storage persisters.
    pub fn new(session: StoragePersister, local: StoragePersister) -> Self {
        Self {
            session: Rc::new(session),
            local: Rc::new(local),
        }
    }
}

struct RegistryEntry {
    persister: Rc<dyn StatePersister>,
    history: Vec<StateHistoryEntry>,
    next_sequence: u64,
}

struct RegistryInner {
    backends: RegistryBackends,
    entries: RefCell<HashMap<String, RegistryEntry>>,
}

#[derive(Clone)]
/// Registry of logical stores keyed by derived name.
///
/// Clones share the same table. The registry is single-threaded (`!Send`), matching the UI thread
/// it serves.
pub struct StateRegistry {
    inner: Rc<RegistryInner>,
}

impl fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRegistry")
            .field("stores", &self.derived_names())
            .finish_non_exhaustive()
    }
}

impl StateRegistry {
    /// Creates an empty registry over the given shared persisters.
    pub fn new(backends: RegistryBackends) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                backends,
                entries: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Provisions the store addressed by `settings`. Repeat calls for the same derived name are
    /// no-ops.
    ///
    /// Memory stores get a persister of their own; session and local stores share the registry's
    /// backend for that medium.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSettings`] when the settings do not name a store.
    pub fn init(&self, settings: &StoreStateSettings) -> StoreResult<()> {
        settings.validate()?;
        let name = settings.derived_name();
        let mut entries = self.inner.entries.borrow_mut();
        if entries.contains_key(&name) {
            return Ok(());
        }
        let persister: Rc<dyn StatePersister> = match settings.persistence {
            Persistence::Memory => Rc::new(MemoryPersister::new()),
            Persistence::SessionStorage => Rc::clone(&self.inner.backends.session),
            Persistence::LocalStorage => Rc::clone(&self.inner.backends.local),
        };
        entries.insert(
            name,
            RegistryEntry {
                persister,
                history: Vec::new(),
                next_sequence: 0,
            },
        );
        Ok(())
    }

    /// Returns `true` once [`Self::init`] has run for the derived name of `settings`.
    pub fn is_initialized(&self, settings: &StoreStateSettings) -> bool {
        self.inner
            .entries
            .borrow()
            .contains_key(&settings.derived_name())
    }

    /// Derived names of every initialized store, sorted.
    pub fn derived_names(&self) -> Vec<String> {
        let mut names = self
            .inner
            .entries
            .borrow()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Loads the whole state blob, or `None` when nothing is stored.
    ///
    /// With `deep_clone_returned_state` the result is a fresh allocation. Without it the
    /// persister's value is handed out as is; for memory stores that is the live stored handle,
    /// which stays immutable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] before `init`, or the persister's read error.
    pub fn get(
        &self,
        settings: &StoreStateSettings,
        deep_clone_returned_state: bool,
    ) -> StoreResult<Option<SharedState>> {
        let (name, persister) = self.persister_for(settings)?;
        let state = persister.get(&name)?;
        Ok(if deep_clone_returned_state {
            state.as_ref().map(detach)
        } else {
            state
        })
    }

    /// Loads one top-level property, or `None` when the property or the whole blob is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] before `init`, or the persister's read error.
    pub fn get_property(
        &self,
        settings: &StoreStateSettings,
        property_name: &str,
    ) -> StoreResult<Option<Value>> {
        let (name, persister) = self.persister_for(settings)?;
        Ok(persister
            .get(&name)?
            .and_then(|state| state.get(property_name).cloned()))
    }

    /// Shallow-merges `state` over the stored blob and writes the result back.
    ///
    /// Top-level keys in `state` replace stored ones wholesale; nested objects are not merged.
    /// `state` moves into the store, so the caller keeps no handle into stored data.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] before `init`, or the persister's read/write error.
    pub fn set(&self, settings: &StoreStateSettings, state: StateObject) -> StoreResult<()> {
        let (name, persister) = self.persister_for(settings)?;
        let begin = persister.get(&name)?;
        let mut merged = begin.as_deref().cloned().unwrap_or_default();
        merged.extend(state);
        let end = SharedState::new(merged);
        persister.set(Rc::clone(&end), &name)?;
        self.record(settings, &name, StateAction::Set, begin, Some(end));
        Ok(())
    }

    /// Empties the store's history and removes its persisted blob. The store stays initialized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] before `init`, or the persister's remove error.
    pub fn clear(&self, settings: &StoreStateSettings) -> StoreResult<()> {
        let (name, persister) = self.persister_for(settings)?;
        let begin = if settings.log_state_changes {
            match persister.get(&name) {
                Ok(state) => state,
                Err(err) => {
                    logging::warn!("state `{name}` read before clear failed: {err}");
                    None
                }
            }
        } else {
            None
        };
        if let Some(entry) = self.inner.entries.borrow_mut().get_mut(&name) {
            entry.history.clear();
        }
        persister.clear(&name)?;
        if settings.log_state_changes {
            log_change(&name, StateAction::Clear, begin.as_deref(), None);
        }
        Ok(())
    }

    /// Snapshot of the recorded history for the store, oldest first.
    ///
    /// History is only appended when `track_state_history` is set on the settings passed to
    /// [`Self::set`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] before `init`.
    pub fn get_history(
        &self,
        settings: &StoreStateSettings,
    ) -> StoreResult<Vec<StateHistoryEntry>> {
        let name = settings.derived_name();
        self.inner
            .entries
            .borrow()
            .get(&name)
            .map(|entry| entry.history.clone())
            .ok_or(StoreError::Uninitialized(name))
    }

    fn persister_for(
        &self,
        settings: &StoreStateSettings,
    ) -> StoreResult<(String, Rc<dyn StatePersister>)> {
        let name = settings.derived_name();
        let persister = self
            .inner
            .entries
            .borrow()
            .get(&name)
            .map(|entry| Rc::clone(&entry.persister));
        match persister {
            Some(persister) => Ok((name, persister)),
            None => Err(StoreError::Uninitialized(name)),
        }
    }

    fn record(
        &self,
        settings: &StoreStateSettings,
        name: &str,
        action: StateAction,
        begin: Option<SharedState>,
        end: Option<SharedState>,
    ) {
        if settings.log_state_changes {
            log_change(name, action, begin.as_deref(), end.as_deref());
        }
        if !settings.track_state_history {
            return;
        }
        if let Some(entry) = self.inner.entries.borrow_mut().get_mut(name) {
            let sequence = entry.next_sequence;
            entry.next_sequence += 1;
            entry.history.push(StateHistoryEntry {
                action,
                begin_state: begin.as_deref().cloned(),
                end_state: end.as_deref().cloned(),
                sequence,
            });
        }
    }
}

fn log_change(
    name: &str,
    action: StateAction,
    begin: Option<&StateObject>,
    end: Option<&StateObject>,
) {
    let render = |state: Option<&StateObject>| {
        state
            .map(|s| Value::Object(s.clone()).to_string())
            .unwrap_or_else(|| "null".to_string())
    };
    logging::log!(
        "state {} `{name}`: {} -> {}",
        action.as_str(),
        render(begin),
        render(end)
    );
}
