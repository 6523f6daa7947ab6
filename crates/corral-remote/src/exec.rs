//! The remote execution trait and its supporting types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Whether a non-zero exit from a remote command is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecPolicy {
    /// A non-zero exit propagates as `RemoteError::CommandFailed`.
    MustSucceed,
    /// The output is returned regardless of exit code. Reserved for paths
    /// that inspect the outcome themselves, such as cleanup of state that
    /// may already be gone.
    AllowFailure,
}

/// Captured output from a remote command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecOutput {
    /// Standard output from the command.
    pub stdout: String,

    /// Standard error from the command.
    pub stderr: String,

    /// Exit code of the command.
    pub exit_code: i32,
}

impl ExecOutput {
    /// Creates a new exec output.
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Returns true if the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the combined stdout and stderr.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Returns stdout split into lines.
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Gateway for running shell commands on managed hosts.
///
/// This is the single seam between the harness and the machines it drives.
/// Implementations must be `Send + Sync`; lifecycle operations against
/// distinct hosts may be issued concurrently.
///
/// # Contract
///
/// - `execute` returns the captured output. Under
///   [`ExecPolicy::MustSucceed`] a non-zero exit becomes
///   `RemoteError::CommandFailed`; under [`ExecPolicy::AllowFailure`] it is
///   returned for the caller to inspect.
/// - Transport failures (host unreachable, session broken) are always
///   errors, independent of policy.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Executes a shell command on the given host.
    async fn execute(&self, host: &str, command: &str, policy: ExecPolicy) -> Result<ExecOutput>;

    /// Executes a command and returns its stdout as individual lines.
    ///
    /// Non-zero exits are errors; callers that want lenient capture go
    /// through [`execute`](Self::execute) with
    /// [`ExecPolicy::AllowFailure`].
    async fn capture_lines(&self, host: &str, command: &str) -> Result<Vec<String>> {
        let output = self.execute(host, command, ExecPolicy::MustSucceed).await?;
        Ok(output.stdout.lines().map(str::to_owned).collect())
    }

    /// Writes `content` to `path` on the host, replacing any existing file.
    async fn write_file(&self, host: &str, path: &str, content: &str) -> Result<()> {
        let command = format!("cat > {} <<'CORRAL_EOF'\n{}\nCORRAL_EOF", path, content);
        self.execute(host, &command, ExecPolicy::MustSucceed).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_output_success() {
        assert!(ExecOutput::new("ok", "", 0).success());
        assert!(!ExecOutput::new("", "boom", 1).success());
    }

    #[test]
    fn exec_output_combined() {
        assert_eq!(ExecOutput::new("out", "", 0).combined_output(), "out");
        assert_eq!(ExecOutput::new("", "err", 1).combined_output(), "err");
        assert_eq!(ExecOutput::new("out", "err", 0).combined_output(), "out\nerr");
    }

    #[test]
    fn exec_output_lines() {
        let output = ExecOutput::new("a\nb\n", "", 0);
        assert_eq!(output.stdout_lines(), vec!["a", "b"]);
    }
}
