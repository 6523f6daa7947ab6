//! Topic creation and description.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use corral_cluster::BrokerCluster;
use corral_remote::{ExecPolicy, RemoteExecutor};

use crate::error::{AdminError, Result};

/// Specification of a topic to create.
///
/// Immutable once built; validation runs before any remote call so a bad
/// spec never reaches the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSpec {
    /// Topic name; unique within the cluster.
    pub name: String,

    /// Number of partitions.
    pub partitions: u32,

    /// Replication factor for each partition.
    pub replication_factor: u32,

    /// Extra per-topic configuration entries.
    pub configs: BTreeMap<String, String>,
}

impl TopicSpec {
    /// Creates a spec with the given name and defaults of one partition and
    /// a replication factor of one.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partitions: 1,
            replication_factor: 1,
            configs: BTreeMap::new(),
        }
    }

    /// Creates a builder for a topic with the given name.
    pub fn builder(name: impl Into<String>) -> TopicSpecBuilder {
        TopicSpecBuilder {
            spec: Self::new(name),
        }
    }

    /// Checks the spec without touching the cluster.
    ///
    /// Partition count and replication factor must both be positive; the
    /// defaults are one, and nothing in the pipeline ever substitutes zero.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdminError::invalid_topic(&self.name, "name must not be empty"));
        }
        if self.partitions == 0 {
            return Err(AdminError::invalid_topic(
                &self.name,
                "partitions must be positive",
            ));
        }
        if self.replication_factor == 0 {
            return Err(AdminError::invalid_topic(
                &self.name,
                "replication factor must be positive",
            ));
        }
        Ok(())
    }
}

/// Builder for [`TopicSpec`].
#[derive(Debug)]
pub struct TopicSpecBuilder {
    spec: TopicSpec,
}

impl TopicSpecBuilder {
    /// Sets the partition count.
    pub fn partitions(mut self, partitions: u32) -> Self {
        self.spec.partitions = partitions;
        self
    }

    /// Sets the replication factor.
    pub fn replication_factor(mut self, factor: u32) -> Self {
        self.spec.replication_factor = factor;
        self
    }

    /// Adds one per-topic configuration entry.
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.configs.insert(key.into(), value.into());
        self
    }

    /// Builds the spec.
    pub fn build(self) -> TopicSpec {
        self.spec
    }
}

/// Topic administration against a running cluster.
pub struct TopicAdmin {
    cluster: Arc<BrokerCluster>,
}

impl TopicAdmin {
    /// Creates a topic administrator for the given cluster.
    pub fn new(cluster: Arc<BrokerCluster>) -> Self {
        Self { cluster }
    }

    fn admin_host(&self) -> Result<String> {
        // Any member will do; the tool talks to the coordination service.
        self.cluster
            .membership()
            .any()
            .map(|n| n.hostname.clone())
            .ok_or(AdminError::NoMembers)
    }

    fn create_command(&self, spec: &TopicSpec) -> String {
        let config = self.cluster.config();
        let mut cmd = format!(
            "{} --zookeeper {} --create --topic {} --partitions {} --replication-factor {}",
            config.topics_tool(),
            self.cluster.connect_string(),
            spec.name,
            spec.partitions,
            spec.replication_factor,
        );
        for (key, value) in &spec.configs {
            cmd.push_str(&format!(" --config {}={}", key, value));
        }
        cmd
    }

    /// Creates a topic on the cluster.
    ///
    /// Validates the spec, invokes the topic tool on an arbitrary member,
    /// then sleeps the configured settle delay before logging a describe of
    /// the topic. The delay is a compromise: metadata propagation is not
    /// observable through any cheap probe, so the describe that follows is
    /// diagnostic, not a success check. A non-zero exit from the tool
    /// itself propagates as a hard failure.
    pub async fn create_topic(&self, spec: &TopicSpec) -> Result<()> {
        spec.validate()?;
        let host = self.admin_host()?;
        let command = self.create_command(spec);

        info!(topic = %spec.name, partitions = spec.partitions, replication_factor = spec.replication_factor, "creating topic");
        debug!(%command, "topic creation command");
        self.cluster
            .executor()
            .execute(&host, &command, ExecPolicy::MustSucceed)
            .await?;

        tokio::time::sleep(self.cluster.config().settle_delay).await;

        for line in self.describe_topic(&spec.name).await?.lines() {
            info!(topic = %spec.name, "{}", line);
        }
        Ok(())
    }

    /// Creates each of the given topics in order.
    pub async fn ensure_topics(&self, specs: &[TopicSpec]) -> Result<()> {
        for spec in specs {
            self.create_topic(spec).await?;
        }
        Ok(())
    }

    /// Returns the describe tool's output for a topic, verbatim.
    ///
    /// No parsing happens here; callers needing structure parse the text
    /// themselves.
    pub async fn describe_topic(&self, topic: &str) -> Result<String> {
        let host = self.admin_host()?;
        let config = self.cluster.config();
        let command = format!(
            "{} --zookeeper {} --topic {} --describe",
            config.topics_tool(),
            self.cluster.connect_string(),
            topic,
        );
        let lines = self.cluster.executor().capture_lines(&host, &command).await?;
        Ok(lines.join("\n"))
    }
}
