//! Store identity and configuration values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Backing medium for a logical store.
pub enum Persistence {
    /// Process-local field owned by a per-store persister.
    #[default]
    Memory,
    /// Tab-scoped browser storage, shared by every session-backed store.
    SessionStorage,
    /// Origin-scoped browser storage, shared by every local-backed store.
    LocalStorage,
}

impl Persistence {
    /// All supported media, in declaration order.
    pub const ALL: [Self; 3] = [Self::Memory, Self::SessionStorage, Self::LocalStorage];

    /// Stable wire token for this medium.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::SessionStorage => "sessionStorage",
            Self::LocalStorage => "localStorage",
        }
    }
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persistence {
    type Err = StoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == token)
            .ok_or_else(|| StoreError::UnknownPersistence(token.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identifies a logical store and how it is persisted.
///
/// Two settings values with the same `name` and `persistence` address the same stored state and
/// history buffer, whatever their flags.
pub struct StoreStateSettings {
    /// Caller-chosen store name.
    pub name: String,
    /// Backing medium.
    #[serde(default)]
    pub persistence: Persistence,
    /// Record a history entry for every mutation.
    #[serde(default, alias = "trackStateHistory")]
    pub track_state_history: bool,
    /// Log every mutation with its begin and end state.
    #[serde(default, alias = "logStateChanges")]
    pub log_state_changes: bool,
}

impl StoreStateSettings {
    /// Creates memory-backed settings for `name` with history and logging off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persistence: Persistence::Memory,
            track_state_history: false,
            log_state_changes: false,
        }
    }

    /// Returns these settings with a different backing medium.
    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Returns these settings with history tracking toggled.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.track_state_history = enabled;
        self
    }

    /// Returns these settings with change logging toggled.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_state_changes = enabled;
        self
    }

    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPersistence`] for an unrecognized persistence token and
    /// [`StoreError::InvalidSettings`] for any other malformed input.
    pub fn from_json(raw: &str) -> StoreResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| StoreError::InvalidSettings(e.to_string()))?;
        if let Some(token) = value.get("persistence").and_then(|v| v.as_str()) {
            token.parse::<Persistence>()?;
        }
        let settings: Self =
            serde_json::from_value(value).map_err(|e| StoreError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the settings can identify a store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSettings`] when `name` is empty or blank.
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidSettings(
                "store name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Registry key for these settings, see [`crate::common::get_name`].
    pub fn derived_name(&self) -> String {
        crate::common::get_name(self)
    }
}
