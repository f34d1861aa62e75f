//! Error types for command execution

use thiserror::Error;

/// Unified error type for running external commands
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to spawn a process
    #[error("failed to spawn process: {reason}")]
    SpawnFailed {
        /// The reason for the spawn failure
        reason: String,
    },

    /// Command not found on the search path
    #[error("command not found: {command}")]
    CommandNotFound {
        /// The command that was not found
        command: String,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a spawn failed error
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
