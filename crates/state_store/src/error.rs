//! Error taxonomy shared by persisters and the state registry.

use thiserror::Error;

use crate::settings::Persistence;

/// Result alias used across the store contracts.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by store operations. None of them are retried by the store.
pub enum StoreError {
    /// A persistence token did not name one of the supported media.
    #[error("unknown persistence mode `{0}` (expected memory, sessionStorage or localStorage)")]
    UnknownPersistence(String),
    /// Store settings were rejected before any state was touched.
    #[error("invalid store settings: {0}")]
    InvalidSettings(String),
    /// Stored text under `key` is not a JSON object.
    #[error("stored state under `{key}` could not be parsed: {message}")]
    Deserialize {
        /// Storage key holding the corrupt value.
        key: String,
        /// Parser diagnostic.
        message: String,
    },
    /// State under `key` could not be encoded as JSON.
    #[error("state for `{key}` could not be serialized: {message}")]
    Serialize {
        /// Storage key the value was destined for.
        key: String,
        /// Encoder diagnostic.
        message: String,
    },
    /// The backing medium refused a write (quota exceeded, storage disabled).
    #[error("{medium} rejected write for `{key}`: {message}")]
    Write {
        /// Medium that refused the write.
        medium: Persistence,
        /// Storage key being written.
        key: String,
        /// Medium diagnostic.
        message: String,
    },
    /// The backing medium refused to remove a key.
    #[error("{medium} rejected remove for `{key}`: {message}")]
    Remove {
        /// Medium that refused the remove.
        medium: Persistence,
        /// Storage key being removed.
        key: String,
        /// Medium diagnostic.
        message: String,
    },
    /// The backing medium is not available in this context.
    #[error("{medium} is unavailable")]
    StorageUnavailable {
        /// Medium that could not be reached.
        medium: Persistence,
    },
    /// The derived name was used before `init`.
    #[error("store `{0}` has not been initialized")]
    Uninitialized(String),
    /// A typed value did not serialize to a JSON object.
    #[error("state for `{0}` must serialize to a JSON object")]
    NotAnObject(String),
}

impl StoreError {
    /// Returns `true` for errors caused by the caller's settings rather than the medium.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnknownPersistence(_) | Self::InvalidSettings(_))
    }
}
