//! Cluster configuration: remote paths, tool locations, and timings.

use std::time::Duration;

/// Configuration shared by every node of a managed cluster.
///
/// Paths are identical on every host; each broker owns its copies on its
/// own filesystem. The defaults follow the conventional layout of a broker
/// image provisioned under `/opt/kafka` with scratch state under `/mnt`.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Port the broker serves clients on; also the liveness-probe target.
    pub broker_port: u16,

    /// Broker installation directory containing `bin/`.
    pub install_dir: String,

    /// Per-node broker properties file written before launch.
    pub properties_file: String,

    /// Per-node PID marker file written by launch, removed by stop.
    pub pid_file: String,

    /// Per-node combined stdout/stderr log the launch command appends to.
    pub log_file: String,

    /// Per-node operational log directory.
    pub operational_log_dir: String,

    /// Per-node data log directory.
    pub data_log_dir: String,

    /// How long the startup barrier waits for all brokers to come alive.
    pub startup_timeout: Duration,

    /// Fixed backoff between liveness sweeps during the startup barrier.
    pub startup_backoff: Duration,

    /// Settle delay after topic creation before the diagnostic describe.
    pub settle_delay: Duration,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            broker_port: 9092,
            install_dir: "/opt/kafka".to_owned(),
            properties_file: "/mnt/kafka.properties".to_owned(),
            pid_file: "/mnt/kafka.pid".to_owned(),
            log_file: "/mnt/kafka.log".to_owned(),
            operational_log_dir: "/mnt/kafka-operational-logs".to_owned(),
            data_log_dir: "/mnt/kafka-data-logs".to_owned(),
            startup_timeout: Duration::from_secs(20),
            startup_backoff: Duration::from_millis(500),
            settle_delay: Duration::from_secs(1),
        }
    }
}

impl ClusterConfig {
    /// Creates a configuration builder with default values.
    pub fn builder() -> ClusterConfigBuilder {
        ClusterConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the broker launch script.
    pub fn server_start_tool(&self) -> String {
        format!("{}/bin/kafka-server-start.sh", self.install_dir)
    }

    /// Path of the topic administration tool.
    pub fn topics_tool(&self) -> String {
        format!("{}/bin/kafka-topics.sh", self.install_dir)
    }

    /// Path of the partition reassignment tool.
    pub fn reassign_tool(&self) -> String {
        format!("{}/bin/kafka-reassign-partitions.sh", self.install_dir)
    }
}

/// Builder for [`ClusterConfig`].
#[derive(Debug)]
pub struct ClusterConfigBuilder {
    config: ClusterConfig,
}

impl ClusterConfigBuilder {
    /// Sets the broker service port.
    pub fn broker_port(mut self, port: u16) -> Self {
        self.config.broker_port = port;
        self
    }

    /// Sets the broker installation directory.
    pub fn install_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.install_dir = dir.into();
        self
    }

    /// Sets the per-node PID marker file path.
    pub fn pid_file(mut self, path: impl Into<String>) -> Self {
        self.config.pid_file = path.into();
        self
    }

    /// Sets the per-node properties file path.
    pub fn properties_file(mut self, path: impl Into<String>) -> Self {
        self.config.properties_file = path.into();
        self
    }

    /// Sets the startup barrier timeout.
    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.config.startup_timeout = timeout;
        self
    }

    /// Sets the startup barrier poll backoff.
    pub fn startup_backoff(mut self, backoff: Duration) -> Self {
        self.config.startup_backoff = backoff;
        self
    }

    /// Sets the settle delay applied after topic creation.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ClusterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_conventional_layout() {
        let config = ClusterConfig::default();
        assert_eq!(config.broker_port, 9092);
        assert_eq!(config.pid_file, "/mnt/kafka.pid");
        assert_eq!(config.server_start_tool(), "/opt/kafka/bin/kafka-server-start.sh");
        assert_eq!(config.topics_tool(), "/opt/kafka/bin/kafka-topics.sh");
        assert_eq!(
            config.reassign_tool(),
            "/opt/kafka/bin/kafka-reassign-partitions.sh"
        );
        assert_eq!(config.startup_timeout, Duration::from_secs(20));
        assert_eq!(config.startup_backoff, Duration::from_millis(500));
    }

    #[test]
    fn builder_overrides() {
        let config = ClusterConfig::builder()
            .broker_port(19092)
            .install_dir("/srv/broker")
            .startup_timeout(Duration::from_millis(250))
            .build();
        assert_eq!(config.broker_port, 19092);
        assert_eq!(config.server_start_tool(), "/srv/broker/bin/kafka-server-start.sh");
        assert_eq!(config.startup_timeout, Duration::from_millis(250));
    }
}
