//! Error taxonomy.
//!
//! Resolution misses (unknown track or queue ids) are never errors; they are
//! no-ops at the call site. What remains here are failed round trips to the
//! collaborators and session encoding problems.

use thiserror::Error;

/// A rejected or undeliverable backend round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The backend received the command and rejected it.
    #[error("backend command `{command}` failed: {message}")]
    Command {
        command: &'static str,
        message: String,
    },
    /// The engine end of the gateway is gone.
    #[error("backend is disconnected")]
    Disconnected,
}

impl BackendError {
    pub fn command(command: &'static str, message: impl Into<String>) -> Self {
        Self::Command {
            command,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    #[error("library unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a user-initiated player command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Library(#[from] LibraryError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to encode session: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("failed to decode session: {0}")]
    Decode(#[from] toml::de::Error),
}
