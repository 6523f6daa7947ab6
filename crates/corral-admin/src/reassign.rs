//! Partition reassignment.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use corral_cluster::BrokerCluster;
use corral_core::node::BrokerId;
use corral_remote::{ExecPolicy, RemoteExecutor};

use crate::error::{AdminError, Result};

/// Substring the reassignment tool prints for a move that is still running.
const IN_PROGRESS_PATTERN: &str = "is in progress";

/// A desired mapping of topic partitions to their hosting brokers.
///
/// Plans are transient: staged on a node's filesystem under a
/// timestamp-derived name for the duration of one tool invocation, then
/// removed. They have no identity beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignmentPlan {
    version: u32,
    partitions: Vec<PartitionMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PartitionMove {
    topic: String,
    partition: u32,
    replicas: Vec<u32>,
}

impl ReassignmentPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self {
            version: 1,
            partitions: Vec::new(),
        }
    }

    /// Adds one partition move, builder style.
    pub fn assign(
        mut self,
        topic: impl Into<String>,
        partition: u32,
        replicas: impl IntoIterator<Item = BrokerId>,
    ) -> Self {
        self.partitions.push(PartitionMove {
            topic: topic.into(),
            partition,
            replicas: replicas.into_iter().map(|id| id.inner()).collect(),
        });
        self
    }

    /// Returns the number of partition moves in the plan.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns true if the plan moves nothing.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

impl Default for ReassignmentPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a reassignment verification.
///
/// The tool reports status as free text, and its wording does not separate
/// "never started" from "finished"; both land in `Complete` here. If the
/// distinction matters, the caller must know whether an execute was
/// submitted beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassignmentStatus {
    /// No move is in progress.
    Complete,
    /// At least one partition move is still running.
    InProgress,
}

impl ReassignmentStatus {
    /// Classifies the reassignment tool's captured output.
    pub fn from_tool_output(output: &str) -> Self {
        if output.contains(IN_PROGRESS_PATTERN) {
            Self::InProgress
        } else {
            Self::Complete
        }
    }

    /// Returns true when no move is in progress.
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

enum Mode {
    Verify,
    Execute,
}

impl Mode {
    fn flag(&self) -> &'static str {
        match self {
            Self::Verify => "--verify",
            Self::Execute => "--execute",
        }
    }
}

/// Drives partition reassignment plans through the external tool.
pub struct Reassigner {
    cluster: Arc<BrokerCluster>,
}

impl Reassigner {
    /// Creates a reassignment driver for the given cluster.
    pub fn new(cluster: Arc<BrokerCluster>) -> Self {
        Self { cluster }
    }

    fn admin_host(&self) -> Result<String> {
        self.cluster
            .membership()
            .any()
            .map(|n| n.hostname.clone())
            .ok_or(AdminError::NoMembers)
    }

    /// One command: stage the plan, run the tool, remove the staged file.
    ///
    /// The plan is written as a doubly-encoded JSON string literal, the
    /// input convention of the tool. Removal is chained after a short grace
    /// delay whatever the tool exited with, so staged files do not pile up
    /// on the admin host; the timestamp in the name keeps concurrent
    /// invocations from colliding.
    fn command(&self, plan: &ReassignmentPlan, mode: Mode) -> Result<String> {
        let artifact = format!("/tmp/{}_reassign.json", Utc::now().timestamp_millis());
        let payload = serde_json::to_string(plan)?;
        let literal = serde_json::to_string(&payload)?;
        Ok(format!(
            "echo {} > {} && {} --zookeeper {} --reassignment-json-file {} {} && sleep 1 && rm -f {}",
            literal,
            artifact,
            self.cluster.config().reassign_tool(),
            self.cluster.connect_string(),
            artifact,
            mode.flag(),
            artifact,
        ))
    }

    /// Runs the reassignment tool in verify mode and classifies its output.
    pub async fn verify(&self, plan: &ReassignmentPlan) -> Result<ReassignmentStatus> {
        if plan.is_empty() {
            return Err(AdminError::EmptyPlan);
        }
        let host = self.admin_host()?;
        let command = self.command(plan, Mode::Verify)?;
        debug!(%command, "verifying partition reassignment");

        let output = self
            .cluster
            .executor()
            .execute(&host, &command, ExecPolicy::MustSucceed)
            .await?;
        let status = ReassignmentStatus::from_tool_output(&output.stdout);
        info!(moves = plan.len(), ?status, "partition reassignment verified");
        Ok(status)
    }

    /// Submits the plan for execution.
    ///
    /// Fire and forget: the tool starts the moves and returns, and nothing
    /// is classified here. Callers observe completion by polling
    /// [`verify`](Self::verify).
    pub async fn execute(&self, plan: &ReassignmentPlan) -> Result<()> {
        if plan.is_empty() {
            return Err(AdminError::EmptyPlan);
        }
        let host = self.admin_host()?;
        let command = self.command(plan, Mode::Execute)?;
        info!(moves = plan.len(), "executing partition reassignment");
        debug!(%command, "reassignment command");

        self.cluster
            .executor()
            .execute(&host, &command, ExecPolicy::MustSucceed)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_cluster::ClusterConfig;
    use corral_coord::StaticCoordination;
    use corral_core::node::ClusterMembership;
    use corral_remote::ScriptedExecutor;

    fn reassigner_with(executor: ScriptedExecutor) -> (Arc<ScriptedExecutor>, Reassigner) {
        let executor = Arc::new(executor);
        let cluster = Arc::new(BrokerCluster::new(
            ClusterMembership::from_hostnames(["worker1", "worker2"]),
            executor.clone(),
            Arc::new(StaticCoordination::new("coord1:2181")),
            ClusterConfig::default(),
        ));
        (executor, Reassigner::new(cluster))
    }

    fn sample_plan() -> ReassignmentPlan {
        ReassignmentPlan::new().assign("events", 0, [BrokerId(1), BrokerId(3)])
    }

    #[test]
    fn plan_serializes_in_the_tool_shape() {
        let json = serde_json::to_string(&sample_plan()).unwrap();
        assert_eq!(
            json,
            r#"{"version":1,"partitions":[{"topic":"events","partition":0,"replicas":[1,3]}]}"#
        );
    }

    #[test]
    fn status_classification() {
        let in_progress = "Reassignment of partition [events,0] is in progress";
        assert_eq!(
            ReassignmentStatus::from_tool_output(in_progress),
            ReassignmentStatus::InProgress
        );
        assert!(!ReassignmentStatus::from_tool_output(in_progress).is_complete());

        let done = "Reassignment of partition [events,0] completed successfully";
        assert!(ReassignmentStatus::from_tool_output(done).is_complete());
        assert!(ReassignmentStatus::from_tool_output("").is_complete());
    }

    #[tokio::test]
    async fn verify_reports_in_progress_from_tool_output() {
        let (_, reassigner) = reassigner_with(ScriptedExecutor::new().respond(
            "--verify",
            "Reassignment of partition [events,0] is in progress",
        ));
        let status = reassigner.verify(&sample_plan()).await.unwrap();
        assert_eq!(status, ReassignmentStatus::InProgress);
    }

    #[tokio::test]
    async fn verify_reports_complete_otherwise() {
        let (_, reassigner) = reassigner_with(ScriptedExecutor::new().respond(
            "--verify",
            "Reassignment of partition [events,0] completed successfully",
        ));
        let status = reassigner.verify(&sample_plan()).await.unwrap();
        assert!(status.is_complete());
    }

    #[tokio::test]
    async fn command_stages_double_encoded_plan_and_cleans_up() {
        let (executor, reassigner) = reassigner_with(ScriptedExecutor::new());
        reassigner.verify(&sample_plan()).await.unwrap();

        let commands = executor.commands_containing("--verify");
        assert_eq!(commands.len(), 1);
        let command = &commands[0];

        // Doubly-encoded literal: the outer quotes belong to the echo
        // argument, the inner structure is escaped.
        assert!(command.starts_with("echo \"{"));
        assert!(command.contains(r#"\"version\":1"#));
        assert!(command.contains(r#"\"replicas\":[1,3]"#));
        assert!(command.contains("--reassignment-json-file /tmp/"));
        assert!(command.contains("_reassign.json"));
        assert!(command.contains("&& sleep 1 && rm -f /tmp/"));
        assert!(command.contains("--zookeeper coord1:2181"));
    }

    #[tokio::test]
    async fn execute_is_fire_and_forget() {
        let (executor, reassigner) = reassigner_with(
            ScriptedExecutor::new().respond("--execute", "started reassignment of 1 partitions"),
        );
        reassigner.execute(&sample_plan()).await.unwrap();

        assert_eq!(executor.commands_containing("--execute").len(), 1);
        assert!(executor.commands_containing("--verify").is_empty());
    }

    #[tokio::test]
    async fn empty_plans_are_rejected() {
        let (executor, reassigner) = reassigner_with(ScriptedExecutor::new());
        let empty = ReassignmentPlan::new();

        assert!(matches!(
            reassigner.verify(&empty).await.unwrap_err(),
            AdminError::EmptyPlan
        ));
        assert!(matches!(
            reassigner.execute(&empty).await.unwrap_err(),
            AdminError::EmptyPlan
        ));
        assert!(executor.history().is_empty());
    }

    #[tokio::test]
    async fn tool_failure_propagates_from_verify() {
        let (_, reassigner) =
            reassigner_with(ScriptedExecutor::new().fail("--verify", 1, "partition not found"));
        let err = reassigner.verify(&sample_plan()).await.unwrap_err();
        assert!(matches!(err, AdminError::Remote(_)));
    }
}
