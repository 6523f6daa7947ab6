//! In-memory scripted executor for tests and dry runs.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{RemoteError, Result};
use crate::exec::{ExecOutput, ExecPolicy, RemoteExecutor};

/// A command the executor was asked to run, recorded for assertions.
#[derive(Debug, Clone)]
pub struct IssuedCommand {
    /// Target host.
    pub host: String,
    /// The full command string.
    pub command: String,
    /// Policy the call site requested.
    pub policy: ExecPolicy,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    output: ExecOutput,
    transport_failure: bool,
}

/// A [`RemoteExecutor`] that answers from canned responses.
///
/// Rules are matched by substring against the issued command, first match
/// wins; a command with no matching rule succeeds with empty output. Every
/// issued command is recorded and can be inspected afterwards, which is how
/// the harness's own tests assert on the exact remote side effects of an
/// operation.
///
/// # Example
///
/// ```
/// use corral_remote::{ExecPolicy, RemoteExecutor, ScriptedExecutor};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let executor = ScriptedExecutor::new()
///     .respond("cat /mnt/kafka.pid", "4242\n")
///     .fail("nc worker2", 1, "connection refused");
///
/// let pids = executor.capture_lines("worker1", "cat /mnt/kafka.pid").await.unwrap();
/// assert_eq!(pids, vec!["4242"]);
///
/// let probe = executor
///     .execute("worker2", "echo EOF | nc worker2 9092", ExecPolicy::AllowFailure)
///     .await
///     .unwrap();
/// assert!(!probe.success());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    rules: Mutex<Vec<Rule>>,
    history: Mutex<Vec<IssuedCommand>>,
}

impl ScriptedExecutor {
    /// Creates an executor with no rules; every command succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule answering commands containing `pattern` with `stdout`.
    pub fn respond(self, pattern: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.respond_with(pattern, ExecOutput::new(stdout, "", 0))
    }

    /// Adds a rule answering commands containing `pattern` with a full
    /// [`ExecOutput`].
    pub fn respond_with(self, pattern: impl Into<String>, output: ExecOutput) -> Self {
        self.rules.lock().unwrap().push(Rule {
            pattern: pattern.into(),
            output,
            transport_failure: false,
        });
        self
    }

    /// Adds a rule failing commands containing `pattern` with the given exit
    /// code and stderr.
    pub fn fail(self, pattern: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        self.respond_with(pattern, ExecOutput::new("", stderr, exit_code))
    }

    /// Adds a rule simulating an unreachable host for commands containing
    /// `pattern`.
    pub fn unreachable(self, pattern: impl Into<String>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            pattern: pattern.into(),
            output: ExecOutput::default(),
            transport_failure: true,
        });
        self
    }

    /// Returns every command issued so far, in order.
    pub fn history(&self) -> Vec<IssuedCommand> {
        self.history.lock().unwrap().clone()
    }

    /// Returns the issued commands containing the given substring.
    pub fn commands_containing(&self, pattern: &str) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.command.contains(pattern))
            .map(|c| c.command.clone())
            .collect()
    }
}

#[async_trait]
impl RemoteExecutor for ScriptedExecutor {
    async fn execute(&self, host: &str, command: &str, policy: ExecPolicy) -> Result<ExecOutput> {
        self.history.lock().unwrap().push(IssuedCommand {
            host: host.to_owned(),
            command: command.to_owned(),
            policy,
        });

        let matched = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| command.contains(&r.pattern))
            .cloned();

        debug!(host, command, matched = matched.is_some(), "scripted execute");

        let Some(rule) = matched else {
            return Ok(ExecOutput::default());
        };

        if rule.transport_failure {
            return Err(RemoteError::transport(host, "scripted transport failure"));
        }

        if !rule.output.success() && policy == ExecPolicy::MustSucceed {
            return Err(RemoteError::command_failed(
                host,
                command,
                rule.output.exit_code,
                rule.output.stderr.clone(),
            ));
        }

        Ok(rule.output)
    }
}
