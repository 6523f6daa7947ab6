//! Error types for administrative operations.

use corral_remote::RemoteError;
use thiserror::Error;

/// Result type for administrative operations.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Errors that can occur during topic or reassignment administration.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A topic specification failed validation before any remote call.
    #[error("invalid topic spec for {name:?}: {reason}")]
    InvalidTopic {
        /// The topic name as given.
        name: String,
        /// What failed validation.
        reason: String,
    },

    /// A reassignment plan with no partition entries was submitted.
    #[error("reassignment plan is empty")]
    EmptyPlan,

    /// No cluster member was available to run the administrative tool on.
    #[error("cluster has no members to run administrative tools on")]
    NoMembers,

    /// The plan could not be encoded for the external tool.
    #[error("failed to encode reassignment plan: {0}")]
    Encode(#[from] serde_json::Error),

    /// The external tool invocation failed.
    #[error("remote execution error: {0}")]
    Remote(#[from] RemoteError),
}

impl AdminError {
    /// Creates an invalid topic error.
    pub fn invalid_topic(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTopic {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
