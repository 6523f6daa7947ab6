//! Coordination-service access for the corral cluster-control harness.
//!
//! Brokers publish their cluster roles (partition leaders, the active
//! controller) into an external hierarchical key-value service. This crate
//! is the read side of that contract: the [`CoordinationClient`] trait
//! fetches decoded values by path, and the typed snapshots
//! [`PartitionState`] and [`ControllerState`] give those values a shape.
//!
//! Reads are never cached. Leadership can move between any two calls, so a
//! role is re-read from the service every time it is needed; freshness wins
//! over performance here because the result is used to target a subsequent
//! administrative or fault-injection operation.
//!
//! The consensus service itself is a black-box collaborator. Like the
//! remote gateway, production deployments bring their own client behind the
//! trait, and tests use the in-memory [`StaticCoordination`].

#![warn(missing_docs)]

mod client;
mod error;
mod memory;
pub mod paths;
mod state;

pub use client::CoordinationClient;
pub use error::{CoordError, Result};
pub use memory::StaticCoordination;
pub use state::{controller_state, partition_state, ControllerState, PartitionState};
