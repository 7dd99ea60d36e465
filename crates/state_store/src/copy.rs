//! Structural copies that keep stored state isolated from caller-held values.

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{StoreError, StoreResult},
    persister::{SharedState, StateObject},
};

/// Returns a structurally independent copy of `state`.
///
/// Nested arrays and objects are copied too, so no part of the result aliases `state`.
pub fn deep_copy(state: &StateObject) -> StateObject {
    state.clone()
}

/// Returns a freshly allocated [`SharedState`] that does not share storage with `state`.
pub fn detach(state: &SharedState) -> SharedState {
    SharedState::new(deep_copy(state))
}

/// Converts a serializable value into a detached state object.
///
/// `key` only names the target store in error messages.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] when encoding fails and [`StoreError::NotAnObject`] when the
/// value does not encode to a JSON object.
pub fn to_state_object<T: Serialize + ?Sized>(key: &str, value: &T) -> StoreResult<StateObject> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::NotAnObject(key.to_string())),
        Err(err) => Err(StoreError::Serialize {
            key: key.to_string(),
            message: err.to_string(),
        }),
    }
}
