//! Process-local persister owned by a single logical store.

use std::cell::RefCell;

use super::{SharedState, StatePersister};
use crate::{error::StoreResult, settings::Persistence};

#[derive(Debug, Default)]
/// Persister holding one state blob in a private field.
///
/// The registry allocates one instance per memory-backed store, so `name` is only informative.
pub struct MemoryPersister {
    state: RefCell<Option<SharedState>>,
}

impl MemoryPersister {
    /// Creates an empty persister.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatePersister for MemoryPersister {
    fn persistence(&self) -> Persistence {
        Persistence::Memory
    }

    fn get(&self, _name: &str) -> StoreResult<Option<SharedState>> {
        Ok(self.state.borrow().clone())
    }

    fn set(&self, state: SharedState, _name: &str) -> StoreResult<()> {
        *self.state.borrow_mut() = Some(state);
        Ok(())
    }

    fn clear(&self, _name: &str) -> StoreResult<()> {
        self.state.borrow_mut().take();
        Ok(())
    }
}
