//! Broker identity and cluster membership types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a broker under management.
///
/// Broker ids are 1-based and match the ids the brokers register with the
/// coordination service, so a leader or controller id read back from the
/// service resolves directly against the membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrokerId(pub u32);

impl BrokerId {
    /// Creates a new BrokerId with the given value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the inner value of the BrokerId.
    #[inline]
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BrokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Broker({})", self.0)
    }
}

impl From<u32> for BrokerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<BrokerId> for u32 {
    fn from(id: BrokerId) -> Self {
        id.0
    }
}

/// One managed host expected to run a single broker process.
///
/// The lifecycle state of the process on this host is owned by the cluster
/// layer; a `BrokerNode` itself is just the stable identity used to target
/// remote commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerNode {
    /// Identifier this broker registers under.
    pub id: BrokerId,

    /// Hostname remote commands are issued against.
    pub hostname: String,
}

impl BrokerNode {
    /// Creates a new broker node.
    pub fn new(id: BrokerId, hostname: impl Into<String>) -> Self {
        Self {
            id,
            hostname: hostname.into(),
        }
    }

    /// Returns the `host:port` address for the broker's service port.
    pub fn service_address(&self, port: u16) -> String {
        format!("{}:{}", self.hostname, port)
    }
}

impl fmt::Display for BrokerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.hostname)
    }
}

/// The ordered set of brokers under management.
///
/// Membership is fixed at construction. Components reference brokers by
/// [`BrokerId`] and resolve them through [`get`](Self::get); an id read from
/// the coordination service that does not resolve here indicates an
/// inconsistency the caller must treat as fatal, not retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMembership {
    nodes: Vec<BrokerNode>,
}

impl ClusterMembership {
    /// Creates a membership from explicit nodes.
    pub fn new(nodes: Vec<BrokerNode>) -> Self {
        Self { nodes }
    }

    /// Creates a membership from hostnames, assigning 1-based broker ids in
    /// iteration order.
    pub fn from_hostnames<I, S>(hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes = hostnames
            .into_iter()
            .enumerate()
            .map(|(i, host)| BrokerNode::new(BrokerId(i as u32 + 1), host))
            .collect();
        Self { nodes }
    }

    /// Resolves a broker id to its node, if the id is under management.
    pub fn get(&self, id: BrokerId) -> Option<&BrokerNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the first broker in the membership.
    ///
    /// Administrative CLI invocations that can run on any cluster member use
    /// this as their target.
    pub fn any(&self) -> Option<&BrokerNode> {
        self.nodes.first()
    }

    /// Returns the number of brokers under management.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no brokers are under management.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all brokers in membership order.
    pub fn iter(&self) -> impl Iterator<Item = &BrokerNode> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_id_display_and_conversion() {
        let id = BrokerId::new(3);
        assert_eq!(id.inner(), 3);
        assert_eq!(format!("{}", id), "Broker(3)");

        let id: BrokerId = 7u32.into();
        assert_eq!(u32::from(id), 7);
    }

    #[test]
    fn broker_node_service_address() {
        let node = BrokerNode::new(BrokerId(1), "worker1");
        assert_eq!(node.service_address(9092), "worker1:9092");
        assert_eq!(format!("{}", node), "Broker(1)@worker1");
    }

    #[test]
    fn membership_from_hostnames_assigns_one_based_ids() {
        let membership = ClusterMembership::from_hostnames(["a", "b", "c"]);
        assert_eq!(membership.len(), 3);
        assert_eq!(membership.get(BrokerId(1)).unwrap().hostname, "a");
        assert_eq!(membership.get(BrokerId(3)).unwrap().hostname, "c");
        assert!(membership.get(BrokerId(0)).is_none());
        assert!(membership.get(BrokerId(4)).is_none());
    }

    #[test]
    fn membership_any_returns_first() {
        let membership = ClusterMembership::from_hostnames(["a", "b"]);
        assert_eq!(membership.any().unwrap().id, BrokerId(1));

        let empty = ClusterMembership::new(Vec::new());
        assert!(empty.any().is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn broker_id_serialization() {
        let id = BrokerId(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");

        let back: BrokerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
