//! Error types for remote command execution.

use thiserror::Error;

/// Result type for remote execution operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur while executing a command on a managed host.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The command ran and exited non-zero under `ExecPolicy::MustSucceed`.
    #[error("command failed on {host} (exit {exit_code}): {command}: {stderr}")]
    CommandFailed {
        /// Host the command ran on.
        host: String,
        /// The command that was issued.
        command: String,
        /// Exit code reported by the remote shell.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The command could not be delivered to the host at all.
    #[error("transport failure to {host}: {reason}")]
    Transport {
        /// Host the gateway failed to reach.
        host: String,
        /// Transport-level failure description.
        reason: String,
    },
}

impl RemoteError {
    /// Creates a command failed error.
    pub fn command_failed(
        host: impl Into<String>,
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            host: host.into(),
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a transport failure error.
    pub fn transport(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Returns the exit code if the command ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => Some(*exit_code),
            Self::Transport { .. } => None,
        }
    }
}
