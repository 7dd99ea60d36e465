//! Typed access to store state through serde.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    copy::to_state_object,
    error::{StoreError, StoreResult},
    registry::StateRegistry,
    settings::StoreStateSettings,
};

/// Loads the whole store state and deserializes it into `T`.
///
/// # Errors
///
/// Returns an error when the store read fails or the stored state does not match `T`.
pub fn load_state_with<T: DeserializeOwned>(
    registry: &StateRegistry,
    settings: &StoreStateSettings,
) -> StoreResult<Option<T>> {
    let Some(state) = registry.get(settings, false)? else {
        return Ok(None);
    };
    let value = serde_json::from_value(Value::Object((*state).clone())).map_err(|e| {
        StoreError::Deserialize {
            key: settings.derived_name(),
            message: e.to_string(),
        }
    })?;
    Ok(Some(value))
}

/// Serializes `value` and shallow-merges its fields into the store state.
///
/// # Errors
///
/// Returns an error when `value` does not serialize to a JSON object or the store write fails.
pub fn save_state_with<T: Serialize + ?Sized>(
    registry: &StateRegistry,
    settings: &StoreStateSettings,
    value: &T,
) -> StoreResult<()> {
    let state = to_state_object(&settings.derived_name(), value)?;
    registry.set(settings, state)
}
