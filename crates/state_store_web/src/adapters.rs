use leptos::logging;
use state_store::{
    MemoryStorageArea, RegistryBackends, StateRegistry, StorageArea, StorageAreaError,
    StoragePersister,
};

use crate::{WebStorageArea, WebStorageKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected backing for the session and local storage areas.
pub enum StorageStrategy {
    /// Browser `Storage` areas from `window`.
    Browser,
    /// Process-local in-memory areas (native builds and the `memory-storage` feature).
    Memory,
}

/// Returns the compile-time selected storage strategy for the active build.
pub const fn selected_storage_strategy() -> StorageStrategy {
    #[cfg(any(feature = "memory-storage", not(target_arch = "wasm32")))]
    {
        StorageStrategy::Memory
    }

    #[cfg(all(not(feature = "memory-storage"), target_arch = "wasm32"))]
    {
        StorageStrategy::Browser
    }
}

/// Returns the selected storage strategy as a stable string token.
pub fn storage_strategy_name() -> &'static str {
    match selected_storage_strategy() {
        StorageStrategy::Browser => "browser",
        StorageStrategy::Memory => "memory",
    }
}

/// Adapter enum that erases the concrete storage area behind [`StorageArea`].
#[derive(Debug, Clone)]
pub enum StorageAreaAdapter {
    /// Browser `sessionStorage` / `localStorage`.
    Browser(WebStorageArea),
    /// In-memory area shared across the process.
    Memory(MemoryStorageArea),
}

impl StorageArea for StorageAreaAdapter {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageAreaError> {
        match self {
            Self::Browser(area) => area.get_item(key),
            Self::Memory(area) => area.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageAreaError> {
        match self {
            Self::Browser(area) => area.set_item(key, value),
            Self::Memory(area) => area.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageAreaError> {
        match self {
            Self::Browser(area) => area.remove_item(key),
            Self::Memory(area) => area.remove_item(key),
        }
    }
}

thread_local! {
    static MEMORY_SESSION_AREA: MemoryStorageArea = MemoryStorageArea::new();
    static MEMORY_LOCAL_AREA: MemoryStorageArea = MemoryStorageArea::new();
}

fn storage_area(kind: WebStorageKind) -> StorageAreaAdapter {
    match selected_storage_strategy() {
        StorageStrategy::Browser => {
            let area = match kind {
                WebStorageKind::Session => WebStorageArea::session(),
                WebStorageKind::Local => WebStorageArea::local(),
            };
            if !area.is_available() {
                logging::warn!(
                    "{} unavailable; stores using it will fail",
                    kind.persistence()
                );
            }
            StorageAreaAdapter::Browser(area)
        }
        StorageStrategy::Memory => {
            let shared = match kind {
                WebStorageKind::Session => &MEMORY_SESSION_AREA,
                WebStorageKind::Local => &MEMORY_LOCAL_AREA,
            };
            StorageAreaAdapter::Memory(shared.with(MemoryStorageArea::clone))
        }
    }
}

/// Returns the session storage area for the selected strategy.
///
/// Memory-strategy areas are process-wide, so repeated calls share entries.
pub fn session_storage_area() -> StorageAreaAdapter {
    storage_area(WebStorageKind::Session)
}

/// Returns the local storage area for the selected strategy.
///
/// Memory-strategy areas are process-wide, so repeated calls share entries.
pub fn local_storage_area() -> StorageAreaAdapter {
    storage_area(WebStorageKind::Local)
}

/// Builds a registry whose session and local stores use the selected storage areas.
pub fn build_state_registry() -> StateRegistry {
    StateRegistry::new(RegistryBackends::new(
        StoragePersister::session(session_storage_area()),
        StoragePersister::local(local_storage_area()),
    ))
}
