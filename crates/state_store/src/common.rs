//! Naming helpers shared by the registry and persisters.

use crate::settings::StoreStateSettings;

/// Derives the persister-scoped key `"{name}-{persistence}"` for a logical store.
///
/// Stores that share both name and persistence resolve to the same key and therefore share state.
pub fn get_name(settings: &StoreStateSettings) -> String {
    format!("{}-{}", settings.name, settings.persistence)
}
