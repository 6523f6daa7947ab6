//! In-memory coordination backend for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CoordinationClient;
use crate::error::Result;

/// A [`CoordinationClient`] answering from a fixed path-to-value map.
///
/// Entries can be replaced between operations to model metadata changing
/// under the harness, such as a leader moving after a bounce.
#[derive(Debug, Default)]
pub struct StaticCoordination {
    data: Mutex<HashMap<String, Value>>,
    connect: String,
}

impl StaticCoordination {
    /// Creates an empty backend with the given connect string.
    pub fn new(connect: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            connect: connect.into(),
        }
    }

    /// Adds a path-value entry, builder style.
    pub fn with(self, path: impl Into<String>, value: Value) -> Self {
        self.data.lock().unwrap().insert(path.into(), value);
        self
    }

    /// Inserts or replaces a path-value entry.
    pub fn set(&self, path: impl Into<String>, value: Value) {
        self.data.lock().unwrap().insert(path.into(), value);
    }

    /// Removes a path, making subsequent reads observe absence.
    pub fn remove(&self, path: &str) {
        self.data.lock().unwrap().remove(path);
    }
}

#[async_trait]
impl CoordinationClient for StaticCoordination {
    async fn get_data(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.data.lock().unwrap().get(path).cloned())
    }

    fn connect_string(&self) -> String {
        self.connect.clone()
    }
}
