//! Typed snapshots of coordination-service records.
//!
//! These are decoded fresh on every read. A snapshot describes what the
//! service said at one instant; holding on to one across operations invites
//! acting on a leadership that has since moved.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::CoordinationClient;
use crate::error::{CoordError, Result};
use crate::paths;

/// State record of one topic partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionState {
    /// Broker id currently serving reads and writes for the partition.
    pub leader: u32,

    /// Epoch of the current leader.
    #[serde(default)]
    pub leader_epoch: u64,

    /// Broker ids in the in-sync replica set.
    #[serde(default)]
    pub isr: Vec<u32>,

    /// Epoch of the controller that wrote the record.
    #[serde(default)]
    pub controller_epoch: u64,
}

/// Record of the active cluster controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Broker id currently holding the controller role.
    #[serde(rename = "brokerid")]
    pub broker_id: u32,

    /// Timestamp the record was written, as stored by the broker.
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn decode<T: serde::de::DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CoordError::decode(path, e.to_string()))
}

/// Reads and decodes the state of one topic partition.
///
/// Fails with [`CoordError::DataMissing`] when the partition has no state
/// record, which is what a never-created or still-propagating topic looks
/// like from here.
pub async fn partition_state(
    client: &dyn CoordinationClient,
    topic: &str,
    partition: u32,
) -> Result<PartitionState> {
    let path = paths::partition_state(topic, partition);
    let value = client
        .get_data(&path)
        .await?
        .ok_or_else(|| CoordError::data_missing(&path))?;
    decode(&path, value)
}

/// Reads and decodes the active controller record.
pub async fn controller_state(client: &dyn CoordinationClient) -> Result<ControllerState> {
    let value = client
        .get_data(paths::CONTROLLER)
        .await?
        .ok_or_else(|| CoordError::data_missing(paths::CONTROLLER))?;
    decode(paths::CONTROLLER, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticCoordination;
    use serde_json::json;

    #[tokio::test]
    async fn partition_state_decodes_broker_record() {
        let coord = StaticCoordination::new("coord1:2181").with(
            paths::partition_state("events", 0),
            json!({
                "controller_epoch": 2,
                "leader": 1,
                "version": 1,
                "leader_epoch": 5,
                "isr": [1, 3]
            }),
        );

        let state = partition_state(&coord, "events", 0).await.unwrap();
        assert_eq!(state.leader, 1);
        assert_eq!(state.leader_epoch, 5);
        assert_eq!(state.isr, vec![1, 3]);
    }

    #[tokio::test]
    async fn partition_state_missing_path() {
        let coord = StaticCoordination::new("coord1:2181");
        let err = partition_state(&coord, "events", 0).await.unwrap_err();
        assert!(err.is_missing());
        assert!(err.to_string().contains("/brokers/topics/events/partitions/0/state"));
    }

    #[tokio::test]
    async fn controller_state_decodes_brokerid_field() {
        let coord = StaticCoordination::new("coord1:2181").with(
            paths::CONTROLLER,
            json!({"version": 1, "brokerid": 2, "timestamp": "1406000000"}),
        );

        let state = controller_state(&coord).await.unwrap();
        assert_eq!(state.broker_id, 2);
        assert_eq!(state.timestamp.as_deref(), Some("1406000000"));
    }

    #[tokio::test]
    async fn undecodable_record_is_a_decode_error() {
        let coord = StaticCoordination::new("coord1:2181")
            .with(paths::CONTROLLER, json!({"version": 1}));

        let err = controller_state(&coord).await.unwrap_err();
        assert!(matches!(err, CoordError::Decode { .. }));
    }
}
