//! Persister contract and the concrete backends.
//!
//! A persister owns the canonical copy of one or more named state blobs. Every method is
//! synchronous; failures of the backing medium surface as [`crate::StoreError`] values.

pub mod memory;
pub mod storage;

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::{error::StoreResult, settings::Persistence};

/// Untyped key/value state blob.
pub type StateObject = Map<String, Value>;

/// Immutable, cheaply cloneable handle to a stored state blob.
pub type SharedState = Rc<StateObject>;

/// Backend that gets, replaces and clears a named blob of state.
pub trait StatePersister {
    /// Medium this persister writes to.
    fn persistence(&self) -> Persistence;

    /// Loads the blob stored under `name`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a deserialize error when stored data is not a valid state object.
    fn get(&self, name: &str) -> StoreResult<Option<SharedState>>;

    /// Replaces the blob stored under `name`. Merging happens in the registry, not here.
    ///
    /// # Errors
    ///
    /// Returns a write error when the medium rejects the write.
    fn set(&self, state: SharedState, name: &str) -> StoreResult<()>;

    /// Removes the blob stored under `name`. Clearing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a remove error when the medium rejects the remove.
    fn clear(&self, name: &str) -> StoreResult<()>;
}
