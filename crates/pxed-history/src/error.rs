#![forbid(unsafe_code)]

//! Error types for the edit history and the commands it drives.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Which history operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOp {
    Undo,
    Redo,
}

impl fmt::Display for HistoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Errors raised by the edit stack itself.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// `undo` with nothing applied, or `redo` with nothing pending.
    ///
    /// This is a caller bug: the UI offered an action it should have
    /// disabled after checking `can_undo`/`can_redo`.
    #[error("{op} is not available (current={current}, len={len})")]
    InvalidOperation {
        op: HistoryOp,
        current: usize,
        len: usize,
    },

    #[error("history capacity must be positive")]
    InvalidCapacity,

    /// A command's `exec` or `discard` failed; passed through unchanged.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[cfg(feature = "config")]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl HistoryError {
    /// The command error carried by this error, if any.
    #[must_use]
    pub fn as_command(&self) -> Option<&CommandError> {
        match self {
            Self::Command(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }
}

/// Errors raised by command implementations (business logic).
///
/// The history never inspects these; it only refuses to record an entry
/// when `exec` fails and refuses to move its cursor when a replay fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command referred to something that does not exist.
    #[error("unknown {kind} '{id}'")]
    UnknownTarget { kind: &'static str, id: String },

    /// A coordinate or extent falls outside the target.
    #[error("{what} out of bounds: {value} exceeds {limit}")]
    OutOfBounds {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl CommandError {
    /// Shorthand for [`CommandError::UnknownTarget`].
    #[must_use]
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownTarget {
            kind,
            id: id.into(),
        }
    }
}

/// Failure while loading a [`HistoryConfig`](crate::HistoryConfig).
#[cfg(feature = "config")]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
