//! Cluster role discovery: partition leaders and the active controller.
//!
//! Roles are resolved by combining a coordination-service read with a
//! membership lookup. Nothing here is cached; topology can change between
//! any two calls, and the whole point of these lookups is to target the
//! broker holding the role right now.

use tracing::debug;

use corral_core::node::{BrokerId, BrokerNode};
use corral_core::signal::Signal;

use crate::cluster::BrokerCluster;
use crate::error::{ClusterError, Result};

impl BrokerCluster {
    /// Returns the broker currently leading the given topic partition.
    ///
    /// Fails with a missing-data error when the partition has no state
    /// record, and with [`ClusterError::UnknownBroker`] when the recorded
    /// leader id does not resolve against the membership. The latter is
    /// fatal by design: a leader outside the membership means the harness
    /// is looking at a cluster it does not own.
    pub async fn leader(&self, topic: &str, partition: u32) -> Result<BrokerNode> {
        let state =
            corral_coord::partition_state(self.coordination().as_ref(), topic, partition).await?;
        let id = BrokerId(state.leader);
        debug!(topic, partition, leader = %id, "resolved partition leader");
        self.membership()
            .get(id)
            .cloned()
            .ok_or_else(|| ClusterError::unknown_broker(id, "partition leader"))
    }

    /// Returns the broker currently holding the controller role.
    pub async fn controller(&self) -> Result<BrokerNode> {
        let state = corral_coord::controller_state(self.coordination().as_ref()).await?;
        let id = BrokerId(state.broker_id);
        debug!(controller = %id, "resolved active controller");
        self.membership()
            .get(id)
            .cloned()
            .ok_or_else(|| ClusterError::unknown_broker(id, "controller"))
    }

    /// Delivers a signal to the broker currently leading the given topic
    /// partition.
    pub async fn signal_leader(&self, topic: &str, partition: u32, signal: Signal) -> Result<()> {
        let leader = self.leader(topic, partition).await?;
        self.signal_node(leader.id, signal).await
    }
}
