#![forbid(unsafe_code)]

//! History configuration.
//!
//! With the `config` feature enabled, [`HistoryConfig`] can be loaded from
//! TOML or JSON:
//!
//! ```toml
//! # pxed-history.toml
//! capacity = 120
//! ```
//!
//! ```rust,ignore
//! let config = HistoryConfig::from_toml_file("pxed-history.toml")?;
//! let stack = EditStack::<Document>::from_config(&config)?;
//! ```

use std::num::NonZeroUsize;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::error::ConfigError;
use crate::error::{HistoryError, Result};

/// History depth used when nothing else is configured.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(60) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Configuration for an [`EditStack`](crate::EditStack).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HistoryConfig {
    /// Maximum number of entries retained. Must be positive.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY.get(),
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Set the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// The configured capacity, or [`HistoryError::InvalidCapacity`] if it
    /// is zero.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(HistoryError::InvalidCapacity)
    }
}

#[cfg(feature = "config")]
impl HistoryConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
