//! Error types for cluster control operations.

use std::time::Duration;

use corral_coord::CoordError;
use corral_core::node::BrokerId;
use corral_remote::RemoteError;
use thiserror::Error;

/// Result type for cluster operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur while driving the broker cluster.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The cluster did not reach all-alive within the startup timeout.
    ///
    /// Terminal for the start sequence; there is no partial-success path
    /// and no automatic rollback of brokers that did come up.
    #[error("timed out after {waited:?} waiting for all brokers to come alive")]
    StartupTimeout {
        /// How long the barrier polled before giving up.
        waited: Duration,
    },

    /// The coordination service referenced a broker id outside the managed
    /// membership.
    ///
    /// Treated as fatal rather than retryable: it indicates a bug or a
    /// cluster the harness does not actually own, not a transient state.
    #[error("coordination service names {id} as {role}, but it is not under management")]
    UnknownBroker {
        /// The id that failed to resolve.
        id: BrokerId,
        /// The role being resolved when the lookup failed.
        role: String,
    },

    /// A coordination-service read failed.
    #[error("coordination error: {0}")]
    Coordination(#[from] CoordError),

    /// A remote command failed.
    #[error("remote execution error: {0}")]
    Remote(#[from] RemoteError),
}

impl ClusterError {
    /// Creates a startup timeout error.
    pub fn startup_timeout(waited: Duration) -> Self {
        Self::StartupTimeout { waited }
    }

    /// Creates an unknown broker error.
    pub fn unknown_broker(id: BrokerId, role: impl Into<String>) -> Self {
        Self::UnknownBroker {
            id,
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = ClusterError::unknown_broker(BrokerId(9), "partition leader");
        assert_eq!(
            err.to_string(),
            "coordination service names Broker(9) as partition leader, but it is not under management"
        );

        let err = ClusterError::startup_timeout(Duration::from_secs(20));
        assert!(err.to_string().contains("20s"));
    }

    #[test]
    fn conversions() {
        let err: ClusterError = CoordError::data_missing("/controller").into();
        assert!(matches!(err, ClusterError::Coordination(_)));

        let err: ClusterError = RemoteError::transport("worker1", "down").into();
        assert!(matches!(err, ClusterError::Remote(_)));
    }
}
