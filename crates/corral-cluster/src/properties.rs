//! Broker properties rendering.

use corral_core::node::BrokerId;

use crate::config::ClusterConfig;

/// Renders the per-node broker properties file.
///
/// Only the settings the harness must control are emitted: the broker's
/// identity, its service port, where data lands, and how to reach the
/// coordination service. Everything else is left to the broker's defaults.
pub(crate) fn render(id: BrokerId, config: &ClusterConfig, connect: &str) -> String {
    format!(
        "broker.id={}\nport={}\nlog.dirs={}\nzookeeper.connect={}\n",
        id.inner(),
        config.broker_port,
        config.data_log_dir,
        connect,
    )
}
