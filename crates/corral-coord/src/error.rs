//! Error types for coordination-service reads.

use thiserror::Error;

/// Result type for coordination operations.
pub type Result<T> = std::result::Result<T, CoordError>;

/// Errors that can occur while reading cluster metadata.
#[derive(Debug, Error)]
pub enum CoordError {
    /// An expected path was absent from the coordination service.
    ///
    /// Surfaced immediately and never retried at this layer; a caller that
    /// expects the data to appear (a topic still propagating, an election
    /// in flight) retries the whole read.
    #[error("no coordination data at {path}")]
    DataMissing {
        /// The path that was read.
        path: String,
    },

    /// Data was present but did not decode into the expected shape.
    #[error("undecodable coordination data at {path}: {reason}")]
    Decode {
        /// The path that was read.
        path: String,
        /// Decoder failure description.
        reason: String,
    },

    /// The coordination backend itself failed.
    #[error("coordination backend error: {0}")]
    Backend(String),
}

impl CoordError {
    /// Creates a data missing error.
    pub fn data_missing(path: impl Into<String>) -> Self {
        Self::DataMissing { path: path.into() }
    }

    /// Creates a decode error.
    pub fn decode(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend(reason.into())
    }

    /// Returns true if the error is an absent path rather than a fault.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::DataMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = CoordError::data_missing("/controller");
        assert_eq!(err.to_string(), "no coordination data at /controller");
        assert!(err.is_missing());

        let err = CoordError::decode("/controller", "missing field brokerid");
        assert_eq!(
            err.to_string(),
            "undecodable coordination data at /controller: missing field brokerid"
        );
        assert!(!err.is_missing());
    }
}
