//! The coordination client trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Read access to the hierarchical key-value coordination service.
///
/// Implementations decode the stored bytes into JSON before returning;
/// callers never see the wire encoding. An absent path is `Ok(None)`, not
/// an error: whether absence is acceptable depends on what is being read,
/// and that judgement belongs to the caller.
#[async_trait]
pub trait CoordinationClient: Send + Sync {
    /// Reads the decoded value at `path`, or `None` if the path is absent.
    async fn get_data(&self, path: &str) -> Result<Option<Value>>;

    /// Returns the connection string handed to broker CLI tools, e.g.
    /// `"coord1:2181,coord2:2181"`.
    fn connect_string(&self) -> String;
}
