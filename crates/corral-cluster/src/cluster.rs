//! The broker cluster controller.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use corral_coord::CoordinationClient;
use corral_core::node::{BrokerId, BrokerNode, ClusterMembership};
use corral_core::signal::Signal;
use corral_core::wait::wait_until;
use corral_remote::{ExecPolicy, RemoteExecutor};

use crate::config::ClusterConfig;
use crate::error::{ClusterError, Result};
use crate::state::NodeState;
use crate::{properties, shell};

/// Controller for a fixed membership of broker hosts.
///
/// One instance owns the lifecycle state of every broker process in the
/// membership. All methods take `&self`; state lives behind a lock, so a
/// cluster can be shared (`Arc`) between the administrative and
/// fault-injection layers.
pub struct BrokerCluster {
    membership: ClusterMembership,
    executor: Arc<dyn RemoteExecutor>,
    coordination: Arc<dyn CoordinationClient>,
    config: ClusterConfig,
    states: RwLock<HashMap<BrokerId, NodeState>>,
}

impl BrokerCluster {
    /// Creates a controller over the given membership and collaborators.
    ///
    /// Every node starts in [`NodeState::Unstarted`].
    pub fn new(
        membership: ClusterMembership,
        executor: Arc<dyn RemoteExecutor>,
        coordination: Arc<dyn CoordinationClient>,
        config: ClusterConfig,
    ) -> Self {
        let states = membership
            .iter()
            .map(|n| (n.id, NodeState::Unstarted))
            .collect();
        Self {
            membership,
            executor,
            coordination,
            config,
            states: RwLock::new(states),
        }
    }

    /// The membership under management.
    pub fn membership(&self) -> &ClusterMembership {
        &self.membership
    }

    /// The cluster configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// The remote command gateway.
    pub fn executor(&self) -> &Arc<dyn RemoteExecutor> {
        &self.executor
    }

    /// The coordination client.
    pub fn coordination(&self) -> &Arc<dyn CoordinationClient> {
        &self.coordination
    }

    /// Connection string of the coordination service.
    pub fn connect_string(&self) -> String {
        self.coordination.connect_string()
    }

    /// Comma-joined `host:port` list across all managed brokers, in
    /// membership order, for client bootstrap configuration.
    pub fn bootstrap_servers(&self) -> String {
        self.membership
            .iter()
            .map(|n| n.service_address(self.config.broker_port))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Returns the controller's view of one node's lifecycle state.
    pub async fn node_state(&self, id: BrokerId) -> NodeState {
        self.states
            .read()
            .await
            .get(&id)
            .copied()
            .unwrap_or(NodeState::Unstarted)
    }

    fn node(&self, id: BrokerId) -> Result<&BrokerNode> {
        self.membership
            .get(id)
            .ok_or_else(|| ClusterError::unknown_broker(id, "target broker"))
    }

    async fn set_state(&self, id: BrokerId, state: NodeState) {
        self.states.write().await.insert(id, state);
    }

    /// Starts every broker, then blocks until the whole cluster answers the
    /// liveness probe.
    ///
    /// The barrier polls [`all_alive`](Self::all_alive) with the
    /// configured fixed backoff. Not reaching all-alive within the
    /// configured timeout is a fatal [`ClusterError::StartupTimeout`];
    /// brokers that did come up are left as they are.
    pub async fn start(&self) -> Result<()> {
        info!(brokers = self.membership.len(), "starting broker cluster");

        for node in self.membership.iter() {
            self.start_node(node.id).await?;
        }

        let alive = wait_until(
            || self.all_alive(),
            self.config.startup_timeout,
            self.config.startup_backoff,
        )
        .await;
        if !alive {
            return Err(ClusterError::startup_timeout(self.config.startup_timeout));
        }

        for node in self.membership.iter() {
            self.set_state(node.id, NodeState::Running).await;
        }
        info!("broker cluster is up");
        Ok(())
    }

    /// Launches the broker process on one node.
    ///
    /// Writes the node's properties file, issues the launch command, and
    /// records the new PID in the marker file as a launch side effect. The
    /// launch is always fresh: no guard is made against a broker already
    /// running on the node, and issuing a second launch while one is live
    /// leaves two processes behind. Callers own that invariant.
    pub async fn start_node(&self, id: BrokerId) -> Result<()> {
        let node = self.node(id)?;
        let rendered = properties::render(id, &self.config, &self.connect_string());
        debug!(broker = %id, properties = %rendered, "writing broker properties");
        self.executor
            .write_file(&node.hostname, &self.config.properties_file, &rendered)
            .await?;

        info!(broker = %id, host = %node.hostname, "launching broker");
        self.executor
            .execute(&node.hostname, &shell::launch(&self.config), ExecPolicy::MustSucceed)
            .await?;
        self.set_state(id, NodeState::Starting).await;
        Ok(())
    }

    /// Stops the broker process on one node.
    ///
    /// Resolves the recorded PIDs, delivers SIGTERM (`clean`) or SIGKILL
    /// to each, and removes the PID marker. Signal delivery failure
    /// propagates: a broker that cannot be stopped is not a condition this
    /// layer can paper over.
    pub async fn stop_node(&self, id: BrokerId, clean: bool) -> Result<()> {
        let node = self.node(id)?;
        let signal = if clean { Signal::Term } else { Signal::Kill };

        for pid in self.pids(id).await? {
            info!(broker = %id, pid, %signal, "stopping broker process");
            self.executor
                .execute(&node.hostname, &shell::kill(pid, signal), ExecPolicy::MustSucceed)
                .await?;
        }

        self.executor
            .execute(
                &node.hostname,
                &shell::remove_pid_marker(&self.config),
                ExecPolicy::MustSucceed,
            )
            .await?;
        self.set_state(id, NodeState::Stopped).await;
        Ok(())
    }

    /// Stops every broker in the membership.
    pub async fn stop_all(&self, clean: bool) -> Result<()> {
        for node in self.membership.iter() {
            self.stop_node(node.id, clean).await?;
        }
        Ok(())
    }

    /// Removes all on-disk artifacts of one node.
    ///
    /// Best effort: cleaning a node that is already clean is expected, so
    /// failures are logged and swallowed rather than propagated.
    pub async fn clean_node(&self, id: BrokerId) {
        let Ok(node) = self.node(id) else {
            warn!(broker = %id, "clean requested for unmanaged broker");
            return;
        };
        match self
            .executor
            .execute(&node.hostname, &shell::clean(&self.config), ExecPolicy::AllowFailure)
            .await
        {
            Ok(output) if !output.success() => {
                warn!(broker = %id, exit_code = output.exit_code, "cleanup exited non-zero");
            }
            Err(e) => warn!(broker = %id, error = %e, "cleanup could not be delivered"),
            Ok(_) => {}
        }
        self.set_state(id, NodeState::Unstarted).await;
    }

    /// Cleans every node in the membership.
    pub async fn clean_all(&self) {
        for node in self.membership.iter() {
            self.clean_node(node.id).await;
        }
    }

    /// Delivers a signal to every PID recorded for one node.
    pub async fn signal_node(&self, id: BrokerId, signal: Signal) -> Result<()> {
        let node = self.node(id)?;
        for pid in self.pids(id).await? {
            debug!(broker = %id, pid, %signal, "delivering signal");
            self.executor
                .execute(&node.hostname, &shell::kill(pid, signal), ExecPolicy::MustSucceed)
                .await?;
        }
        self.set_state(id, NodeState::Signaled).await;
        Ok(())
    }

    /// Returns the PIDs recorded in the node's marker file.
    ///
    /// A missing or unreadable marker, or one holding anything that does
    /// not parse as a PID, reads as the empty set: "no process" is an
    /// answer here, not an error. The marker file is re-read on every call.
    pub async fn pids(&self, id: BrokerId) -> Result<Vec<u32>> {
        let node = self.node(id)?;
        let lines = match self
            .executor
            .capture_lines(&node.hostname, &shell::read_pid_marker(&self.config))
            .await
        {
            Ok(lines) => lines,
            Err(_) => return Ok(Vec::new()),
        };
        Ok(lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::parse::<u32>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap_or_default())
    }

    /// Probes whether the broker on one node answers on its service port.
    ///
    /// A liveness probe, not a handshake: the probe opens a TCP connection
    /// and immediately closes it, and any failure at all (refused, timed
    /// out, probe command undeliverable) reads as not alive. Never errors.
    pub async fn is_alive(&self, id: BrokerId) -> bool {
        match self.node(id) {
            Ok(node) => self.probe(node).await,
            Err(_) => false,
        }
    }

    async fn probe(&self, node: &BrokerNode) -> bool {
        let command = shell::probe(&node.hostname, self.config.broker_port);
        match self
            .executor
            .execute(&node.hostname, &command, ExecPolicy::AllowFailure)
            .await
        {
            Ok(output) => output.success(),
            Err(_) => false,
        }
    }

    /// Returns true when every broker in the membership answers the probe.
    pub async fn all_alive(&self) -> bool {
        for node in self.membership.iter() {
            if !self.probe(node).await {
                return false;
            }
        }
        true
    }
}
