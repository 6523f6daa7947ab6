//! Canonical coordination-service paths for cluster metadata.

/// Path holding the active controller record.
pub const CONTROLLER: &str = "/controller";

/// Returns the path holding the state record of one topic partition.
pub fn partition_state(topic: &str, partition: u32) -> String {
    format!("/brokers/topics/{}/partitions/{}/state", topic, partition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_state_path() {
        assert_eq!(
            partition_state("events", 3),
            "/brokers/topics/events/partitions/3/state"
        );
    }
}
