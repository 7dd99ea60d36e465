//! Keyed, pluggable-backend state container used by UI components.
//!
//! A logical store is identified by [`StoreStateSettings`] and addressed through its derived name
//! (`"{name}-{persistence}"`). The [`StateRegistry`] maps each derived name to a
//! [`StatePersister`] and an in-process mutation history. Browser storage bindings live in
//! `state_store_web`; this crate carries the contracts and the backend-agnostic pieces.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use state_store::{
//!     MemoryStorageArea, RegistryBackends, StateRegistry, StoragePersister, StoreStateSettings,
//! };
//!
//! let registry = StateRegistry::new(RegistryBackends::new(
//!     StoragePersister::session(MemoryStorageArea::new()),
//!     StoragePersister::local(MemoryStorageArea::new()),
//! ));
//! let settings = StoreStateSettings::new("client");
//! registry.init(&settings).expect("init");
//!
//! registry
//!     .set(&settings, json!({"user": "a"}).as_object().cloned().unwrap_or_default())
//!     .expect("set");
//! registry
//!     .set(&settings, json!({"token": "xyz"}).as_object().cloned().unwrap_or_default())
//!     .expect("set");
//!
//! let state = registry.get(&settings, true).expect("get").expect("stored");
//! assert_eq!(state.get("user"), Some(&json!("a")));
//! assert_eq!(state.get("token"), Some(&json!("xyz")));
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod copy;
pub mod error;
pub mod persister;
pub mod registry;
pub mod settings;
pub mod typed;

pub use common::get_name;
pub use copy::{deep_copy, detach, to_state_object};
pub use error::{StoreError, StoreResult};
pub use persister::{
    memory::MemoryPersister,
    storage::{MemoryStorageArea, StorageArea, StorageAreaError, StoragePersister},
    SharedState, StateObject, StatePersister,
};
pub use registry::{RegistryBackends, StateAction, StateHistoryEntry, StateRegistry};
pub use settings::{Persistence, StoreStateSettings};
pub use typed::{load_state_with, save_state_with};
