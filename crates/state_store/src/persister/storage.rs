//! Persisters backed by a string key/value storage area (`sessionStorage`, `localStorage`).
//!
//! The browser `Storage` binding lives in `state_store_web`; [`MemoryStorageArea`] stands in for it
//! on native targets and in tests.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use serde_json::Value;
use thiserror::Error;

use super::{SharedState, StatePersister};
use crate::{
    error::{StoreError, StoreResult},
    settings::Persistence,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by a [`StorageArea`].
pub enum StorageAreaError {
    /// The storage area does not exist in this context.
    #[error("storage area unavailable")]
    Unavailable,
    /// The storage area refused the operation.
    #[error("{0}")]
    Rejected(String),
}

/// External string key/value store mirroring the browser `Storage` interface.
pub trait StorageArea {
    /// Reads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable or refuses the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageAreaError>;

    /// Writes raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable or refuses the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageAreaError>;

    /// Removes `key`; removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable or refuses the remove.
    fn remove_item(&self, key: &str) -> Result<(), StorageAreaError>;
}

#[derive(Debug, Clone, Default)]
/// In-memory storage area; clones share the same entries.
///
/// A quota, when set, bounds the summed byte length of all keys and values, like the browser
/// storage quota.
pub struct MemoryStorageArea {
    inner: Rc<RefCell<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorageArea {
    /// Creates an empty, unbounded area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty area that rejects writes growing it beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.inner
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageArea for MemoryStorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageAreaError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageAreaError> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageAreaError::Rejected(format!(
                    "quota exceeded ({needed} of {quota} bytes)"
                )));
            }
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageAreaError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persister storing JSON text in a shared [`StorageArea`], keyed by derived name.
///
/// One instance services every store of its medium, so keys must be unique across the area.
pub struct StoragePersister {
    medium: Persistence,
    area: Rc<dyn StorageArea>,
}

impl StoragePersister {
    /// Creates the `sessionStorage` persister over `area`.
    pub fn session(area: impl StorageArea + 'static) -> Self {
        Self {
            medium: Persistence::SessionStorage,
            area: Rc::new(area),
        }
    }

    /// Creates the `localStorage` persister over `area`.
    pub fn local(area: impl StorageArea + 'static) -> Self {
        Self {
            medium: Persistence::LocalStorage,
            area: Rc::new(area),
        }
    }

    fn unavailable(&self) -> StoreError {
        StoreError::StorageUnavailable {
            medium: self.medium,
        }
    }
}

impl fmt::Debug for StoragePersister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoragePersister")
            .field("medium", &self.medium)
            .finish_non_exhaustive()
    }
}

impl StatePersister for StoragePersister {
    fn persistence(&self) -> Persistence {
        self.medium
    }

    fn get(&self, name: &str) -> StoreResult<Option<SharedState>> {
        let raw = match self.area.get_item(name) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageAreaError::Unavailable | StorageAreaError::Rejected(_)) => {
                return Err(self.unavailable())
            }
        };
        let parsed: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Deserialize {
            key: name.to_string(),
            message: e.to_string(),
        })?;
        match parsed {
            Value::Object(map) => Ok(Some(SharedState::new(map))),
            Value::Null => Ok(None),
            other => Err(StoreError::Deserialize {
                key: name.to_string(),
                message: format!("expected a JSON object, found `{other}`"),
            }),
        }
    }

    fn set(&self, state: SharedState, name: &str) -> StoreResult<()> {
        let raw = serde_json::to_string(&*state).map_err(|e| StoreError::Serialize {
            key: name.to_string(),
            message: e.to_string(),
        })?;
        self.area.set_item(name, &raw).map_err(|err| match err {
            StorageAreaError::Unavailable => self.unavailable(),
            StorageAreaError::Rejected(message) => StoreError::Write {
                medium: self.medium,
                key: name.to_string(),
                message,
            },
        })
    }

    fn clear(&self, name: &str) -> StoreResult<()> {
        self.area.remove_item(name).map_err(|err| match err {
            StorageAreaError::Unavailable => self.unavailable(),
            StorageAreaError::Rejected(message) => StoreError::Remove {
                medium: self.medium,
                key: name.to_string(),
                message,
            },
        })
    }
}
