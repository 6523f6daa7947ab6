//! Broker cluster control: process lifecycle and role discovery.
//!
//! [`BrokerCluster`] is the owner of per-node process state for a fixed
//! membership of broker hosts. It launches broker processes over the remote
//! gateway, tracks their lifecycle, signals and stops them, probes
//! liveness, and resolves cluster roles (partition leader, active
//! controller) through the coordination service.
//!
//! # Overview
//!
//! - **Lifecycle**: [`BrokerCluster::start`] launches every broker and
//!   blocks on an all-alive barrier with a bounded timeout; per-node
//!   operations ([`start_node`](BrokerCluster::start_node),
//!   [`stop_node`](BrokerCluster::stop_node),
//!   [`signal_node`](BrokerCluster::signal_node),
//!   [`clean_node`](BrokerCluster::clean_node)) give finer control.
//! - **Process discovery**: the PID of a launched broker is written to a
//!   marker file on its host at launch time; later operations read the
//!   marker instead of parsing process tables.
//! - **Roles**: [`leader`](BrokerCluster::leader) and
//!   [`controller`](BrokerCluster::controller) re-read the coordination
//!   service on every call and resolve the returned broker id against the
//!   membership.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use corral_cluster::{BrokerCluster, ClusterConfig};
//! use corral_coord::StaticCoordination;
//! use corral_core::node::ClusterMembership;
//! use corral_remote::ScriptedExecutor;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let cluster = BrokerCluster::new(
//!     ClusterMembership::from_hostnames(["worker1", "worker2"]),
//!     Arc::new(ScriptedExecutor::new()),
//!     Arc::new(StaticCoordination::new("coord1:2181")),
//!     ClusterConfig::default(),
//! );
//!
//! cluster.start().await.unwrap();
//! assert_eq!(cluster.bootstrap_servers(), "worker1:9092,worker2:9092");
//! # });
//! ```

#![warn(missing_docs)]

mod cluster;
mod config;
mod error;
mod properties;
mod roles;
mod shell;
mod state;

pub use cluster::BrokerCluster;
pub use config::{ClusterConfig, ClusterConfigBuilder};
pub use error::{ClusterError, Result};
pub use state::NodeState;
