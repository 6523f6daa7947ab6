//! Shared vocabulary for the corral cluster-control harness.
//!
//! This crate holds the types every other corral crate speaks in:
//!
//! - [`node`]: broker identity ([`BrokerId`], [`BrokerNode`]) and the fixed
//!   [`ClusterMembership`] under management
//! - [`signal`]: symbolic process signals delivered to broker processes
//! - [`wait`]: the fixed-backoff bounded polling primitive used for startup
//!   barriers and fault-injection gates
//!
//! Nothing here performs I/O. Remote execution and coordination-service
//! access live behind the trait seams in `corral-remote` and `corral-coord`.
//!
//! # Example
//!
//! ```
//! use corral_core::node::{BrokerId, ClusterMembership};
//!
//! let membership = ClusterMembership::from_hostnames(["worker1", "worker2", "worker3"]);
//! assert_eq!(membership.len(), 3);
//! assert_eq!(membership.get(BrokerId(2)).unwrap().hostname, "worker2");
//! assert!(membership.get(BrokerId(9)).is_none());
//! ```

#![warn(missing_docs)]

pub mod node;
pub mod signal;
pub mod wait;

pub use node::{BrokerId, BrokerNode, ClusterMembership};
pub use signal::Signal;
pub use wait::wait_until;
