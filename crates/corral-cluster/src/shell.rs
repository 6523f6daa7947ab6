//! Remote command strings for broker lifecycle operations.
//!
//! Every shell fragment the cluster layer sends through the gateway is
//! built here, so the exact remote side effects of an operation are
//! greppable and testable in one place.

use corral_core::signal::Signal;

use crate::config::ClusterConfig;

/// Launch command: starts the broker in the background, appends both output
/// streams to the node log, and records the PID in the marker file.
pub(crate) fn launch(config: &ClusterConfig) -> String {
    format!(
        "export LOG_DIR={}; {} {} 1>> {} 2>> {} & echo $! > {}",
        config.operational_log_dir,
        config.server_start_tool(),
        config.properties_file,
        config.log_file,
        config.log_file,
        config.pid_file,
    )
}

/// Reads the PID marker file.
pub(crate) fn read_pid_marker(config: &ClusterConfig) -> String {
    format!("cat {}", config.pid_file)
}

/// Removes the PID marker file.
pub(crate) fn remove_pid_marker(config: &ClusterConfig) -> String {
    format!("rm -f {}", config.pid_file)
}

/// Removes every on-disk artifact a broker leaves behind.
pub(crate) fn clean(config: &ClusterConfig) -> String {
    format!(
        "rm -rf {} {} {} {} {}",
        config.operational_log_dir,
        config.data_log_dir,
        config.properties_file,
        config.log_file,
        config.pid_file,
    )
}

/// Delivers a signal to one PID.
pub(crate) fn kill(pid: u32, signal: Signal) -> String {
    format!("kill -{} {}", signal.number(), pid)
}

/// Liveness probe: opens a TCP connection to the service port and closes it
/// by sending EOF. Exit status is the only thing inspected.
pub(crate) fn probe(hostname: &str, port: u16) -> String {
    format!("echo EOF | nc {} {}", hostname, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_records_pid_and_appends_logs() {
        let cmd = launch(&ClusterConfig::default());
        assert_eq!(
            cmd,
            "export LOG_DIR=/mnt/kafka-operational-logs; \
             /opt/kafka/bin/kafka-server-start.sh /mnt/kafka.properties \
             1>> /mnt/kafka.log 2>> /mnt/kafka.log & echo $! > /mnt/kafka.pid"
        );
    }

    #[test]
    fn marker_commands() {
        let config = ClusterConfig::default();
        assert_eq!(read_pid_marker(&config), "cat /mnt/kafka.pid");
        assert_eq!(remove_pid_marker(&config), "rm -f /mnt/kafka.pid");
    }

    #[test]
    fn clean_sweeps_all_artifacts() {
        let cmd = clean(&ClusterConfig::default());
        for artifact in [
            "/mnt/kafka-operational-logs",
            "/mnt/kafka-data-logs",
            "/mnt/kafka.properties",
            "/mnt/kafka.log",
            "/mnt/kafka.pid",
        ] {
            assert!(cmd.contains(artifact), "missing {} in {}", artifact, cmd);
        }
    }

    #[test]
    fn kill_uses_numeric_signal() {
        assert_eq!(kill(4242, Signal::Term), "kill -15 4242");
        assert_eq!(kill(4242, Signal::Kill), "kill -9 4242");
        assert_eq!(kill(4242, Signal::Stop), "kill -19 4242");
    }

    #[test]
    fn probe_targets_service_port() {
        assert_eq!(probe("worker1", 9092), "echo EOF | nc worker1 9092");
    }
}
