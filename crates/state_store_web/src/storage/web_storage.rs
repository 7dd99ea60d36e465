//! `window.sessionStorage` / `window.localStorage` backed storage areas.
//!
//! Calls are synchronous at the browser API boundary. Off `wasm32` every operation reports the
//! area as unavailable.

use state_store::{Persistence, StorageArea, StorageAreaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which browser storage area a [`WebStorageArea`] talks to.
pub enum WebStorageKind {
    /// `window.sessionStorage`.
    Session,
    /// `window.localStorage`.
    Local,
}

impl WebStorageKind {
    /// Store medium served by this area.
    pub const fn persistence(self) -> Persistence {
        match self {
            Self::Session => Persistence::SessionStorage,
            Self::Local => Persistence::LocalStorage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browser storage area accessed through `web_sys::Storage`.
pub struct WebStorageArea {
    kind: WebStorageKind,
}

impl WebStorageArea {
    /// Area backed by `window.sessionStorage`.
    pub const fn session() -> Self {
        Self {
            kind: WebStorageKind::Session,
        }
    }

    /// Area backed by `window.localStorage`.
    pub const fn local() -> Self {
        Self {
            kind: WebStorageKind::Local,
        }
    }

    /// Which browser area this handle targets.
    pub const fn kind(self) -> WebStorageKind {
        self.kind
    }

    /// Returns `true` when the browser exposes this storage area.
    pub fn is_available(self) -> bool {
        self.storage().is_ok()
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Result<web_sys::Storage, StorageAreaError> {
        let window = web_sys::window().ok_or(StorageAreaError::Unavailable)?;
        let storage = match self.kind {
            WebStorageKind::Session => window.session_storage(),
            WebStorageKind::Local => window.local_storage(),
        };
        storage.ok().flatten().ok_or(StorageAreaError::Unavailable)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn storage(self) -> Result<(), StorageAreaError> {
        Err(StorageAreaError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
fn rejected(op: &str, err: wasm_bindgen::JsValue) -> StorageAreaError {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    StorageAreaError::Rejected(format!("{op} failed: {detail}"))
}

impl StorageArea for WebStorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageAreaError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .get_item(key)
                .map_err(|e| rejected("getItem", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            self.storage().map(|()| None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageAreaError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| rejected("setItem", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            self.storage()
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageAreaError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .remove_item(key)
                .map_err(|e| rejected("removeItem", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            self.storage()
        }
    }
}
