//! Error types for fault injection.

use std::time::Duration;

use corral_cluster::ClusterError;
use thiserror::Error;

/// Result type for fault injection operations.
pub type Result<T> = std::result::Result<T, FaultError>;

/// Errors that can occur while injecting or resolving a fault.
#[derive(Debug, Error)]
pub enum FaultError {
    /// A bounce gate condition did not become true within its timeout.
    ///
    /// The bounce stops here: the node is left in whatever state the
    /// injected signal put it in, deliberately. A suspended broker stays
    /// suspended so the scenario that timed out can be inspected.
    #[error("timed out after {waited:?} waiting for condition {condition:?}")]
    ConditionTimeout {
        /// Diagnostic name of the condition that never held.
        condition: String,
        /// How long the gate polled before giving up.
        waited: Duration,
    },

    /// A cluster operation issued by the fault failed.
    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),
}

impl FaultError {
    /// Creates a condition timeout error.
    pub fn condition_timeout(condition: impl Into<String>, waited: Duration) -> Self {
        Self::ConditionTimeout {
            condition: condition.into(),
            waited,
        }
    }
}
