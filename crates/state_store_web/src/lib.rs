//! Browser (`wasm32`) wiring for [`state_store`].
//!
//! This crate binds the session and local persisters to `window.sessionStorage` and
//! `window.localStorage`, selects the storage strategy at compile time, and owns the process-wide
//! default [`StateRegistry`]. The free functions here forward to that default registry, which is
//! created on first use and lives until the page unloads.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use state_store_web::{Persistence, StoreStateSettings};
//!
//! let settings =
//!     StoreStateSettings::new("doc-example").with_persistence(Persistence::SessionStorage);
//! state_store_web::init(&settings).expect("init");
//!
//! let update = json!({"open": true}).as_object().cloned().unwrap_or_default();
//! state_store_web::set(&settings, update).expect("set");
//! assert_eq!(
//!     state_store_web::get_property(&settings, "open").expect("get"),
//!     Some(json!(true))
//! );
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time storage-strategy selection and storage area factories for runtime wiring.
pub mod adapters;
pub mod storage;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use adapters::{
    build_state_registry, local_storage_area, selected_storage_strategy, session_storage_area,
    storage_strategy_name, StorageAreaAdapter, StorageStrategy,
};
pub use state_store::{
    Persistence, SharedState, StateAction, StateHistoryEntry, StateObject, StateRegistry,
    StoreError, StoreResult, StoreStateSettings,
};
pub use storage::web_storage::{WebStorageArea, WebStorageKind};

thread_local! {
    static GLOBAL_STATE: StateRegistry = build_state_registry();
}

/// Returns the process-wide default registry.
pub fn state() -> StateRegistry {
    GLOBAL_STATE.with(StateRegistry::clone)
}

/// Provisions a store in the default registry.
///
/// # Errors
///
/// Returns an error when the settings do not name a store.
pub fn init(settings: &StoreStateSettings) -> StoreResult<()> {
    state().init(settings)
}

/// Loads a deep copy of a store's state from the default registry.
///
/// # Errors
///
/// Returns an error when the store is uninitialized or its stored state cannot be read.
pub fn get(settings: &StoreStateSettings) -> StoreResult<Option<SharedState>> {
    state().get(settings, true)
}

/// Loads one top-level property of a store's state from the default registry.
///
/// # Errors
///
/// Returns an error when the store is uninitialized or its stored state cannot be read.
pub fn get_property(
    settings: &StoreStateSettings,
    property_name: &str,
) -> StoreResult<Option<Value>> {
    state().get_property(settings, property_name)
}

/// Shallow-merges `state_update` into a store of the default registry.
///
/// # Errors
///
/// Returns an error when the store is uninitialized or the backing medium rejects the write.
pub fn set(settings: &StoreStateSettings, state_update: StateObject) -> StoreResult<()> {
    state().set(settings, state_update)
}

/// Clears a store's history and persisted state in the default registry.
///
/// # Errors
///
/// Returns an error when the store is uninitialized or the backing medium rejects the remove.
pub fn clear(settings: &StoreStateSettings) -> StoreResult<()> {
    state().clear(settings)
}

/// Returns a store's recorded history from the default registry.
///
/// # Errors
///
/// Returns an error when the store is uninitialized.
pub fn get_history(settings: &StoreStateSettings) -> StoreResult<Vec<StateHistoryEntry>> {
    state().get_history(settings)
}

/// Loads a store's state from the default registry as a typed value.
///
/// # Errors
///
/// Returns an error when the store read fails or the state does not match `T`.
pub fn load_state<T: DeserializeOwned>(settings: &StoreStateSettings) -> StoreResult<Option<T>> {
    state_store::load_state_with(&state(), settings)
}

/// Merges a typed value's fields into a store of the default registry.
///
/// # Errors
///
/// Returns an error when `value` is not an object or the store write fails.
pub fn save_state<T: Serialize + ?Sized>(
    settings: &StoreStateSettings,
    value: &T,
) -> StoreResult<()> {
    state_store::save_state_with(&state(), settings, value)
}
