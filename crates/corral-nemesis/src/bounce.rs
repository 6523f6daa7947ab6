//! The bounce fault: signal a broker, optionally wait, restore it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use corral_cluster::BrokerCluster;
use corral_core::node::BrokerId;
use corral_core::signal::Signal;
use corral_core::wait::wait_until;

use crate::condition::BounceCondition;
use crate::error::{FaultError, Result};

/// Signals permitted for fault injection.
///
/// A strict subset of [`Signal`]: these are the ones whose effect on a
/// broker is understood and reversible by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultSignal {
    /// SIGKILL: the process dies immediately and must be relaunched.
    Kill,
    /// SIGSTOP: the process is suspended and later resumed in place.
    Stop,
    /// SIGTERM: the process shuts down gracefully and must be relaunched.
    Term,
}

impl FaultSignal {
    /// The underlying signal delivered to the process.
    pub fn as_signal(self) -> Signal {
        match self {
            Self::Kill => Signal::Kill,
            Self::Stop => Signal::Stop,
            Self::Term => Signal::Term,
        }
    }
}

impl fmt::Display for FaultSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_signal().fmt(f)
    }
}

/// A gate holding a bounce open until a condition becomes true.
#[derive(Debug)]
pub struct Gate<'a> {
    condition: &'a BounceCondition,
    timeout: Duration,
    backoff: Duration,
}

impl<'a> Gate<'a> {
    /// Creates a gate with the default 5 second timeout and 250 ms poll
    /// backoff.
    pub fn new(condition: &'a BounceCondition) -> Self {
        Self {
            condition,
            timeout: Duration::from_secs(5),
            backoff: Duration::from_millis(250),
        }
    }

    /// Sets how long the gate waits for the condition.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the fixed poll backoff.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// Injects bounce faults into a managed cluster.
pub struct Bouncer {
    cluster: Arc<BrokerCluster>,
}

impl Bouncer {
    /// Creates a bouncer over the given cluster.
    pub fn new(cluster: Arc<BrokerCluster>) -> Self {
        Self { cluster }
    }

    /// Bounces one broker.
    ///
    /// Delivers `signal` to the broker's recorded PIDs. If a gate is
    /// given, polls its condition with the gate's timeout and backoff; a
    /// condition that never holds is a fatal
    /// [`FaultError::ConditionTimeout`] and the broker is left exactly as
    /// the signal put it, suspended included. Otherwise the broker is
    /// restored: resumed with SIGCONT after a `Stop`, relaunched after a
    /// `Kill` or `Term`.
    pub async fn bounce(
        &self,
        id: BrokerId,
        signal: FaultSignal,
        gate: Option<Gate<'_>>,
    ) -> Result<()> {
        info!(broker = %id, %signal, "bouncing broker");
        self.cluster.signal_node(id, signal.as_signal()).await?;

        if let Some(gate) = gate {
            let held = wait_until(|| gate.condition.holds(), gate.timeout, gate.backoff).await;
            if !held {
                warn!(
                    broker = %id,
                    condition = gate.condition.name(),
                    "bounce gate never opened; broker left un-restored"
                );
                return Err(FaultError::condition_timeout(
                    gate.condition.name(),
                    gate.timeout,
                ));
            }
        }

        match signal {
            FaultSignal::Stop => {
                info!(broker = %id, "resuming suspended broker");
                self.cluster.signal_node(id, Signal::Cont).await?;
            }
            FaultSignal::Kill | FaultSignal::Term => {
                info!(broker = %id, "relaunching terminated broker");
                self.cluster.start_node(id).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_cluster::{ClusterConfig, NodeState};
    use corral_coord::StaticCoordination;
    use corral_core::node::ClusterMembership;
    use corral_remote::ScriptedExecutor;

    fn bouncer_with(executor: ScriptedExecutor) -> (Arc<ScriptedExecutor>, Bouncer) {
        let executor = Arc::new(executor);
        let cluster = Arc::new(BrokerCluster::new(
            ClusterMembership::from_hostnames(["worker1", "worker2"]),
            executor.clone(),
            Arc::new(StaticCoordination::new("coord1:2181")),
            ClusterConfig::default(),
        ));
        (executor, Bouncer::new(cluster))
    }

    fn quick_gate(condition: &BounceCondition) -> Gate<'_> {
        Gate::new(condition)
            .timeout(Duration::from_millis(60))
            .backoff(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn stop_bounce_resumes_with_cont() {
        let (executor, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));

        bouncer.bounce(BrokerId(1), FaultSignal::Stop, None).await.unwrap();

        assert_eq!(executor.commands_containing("kill -19 4242").len(), 1);
        assert_eq!(executor.commands_containing("kill -18 4242").len(), 1);
        assert!(executor.commands_containing("kafka-server-start.sh").is_empty());
    }

    #[tokio::test]
    async fn fatal_bounce_relaunches() {
        let (executor, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));

        bouncer.bounce(BrokerId(2), FaultSignal::Kill, None).await.unwrap();

        assert_eq!(executor.commands_containing("kill -9 4242").len(), 1);
        let launches = executor.commands_containing("kafka-server-start.sh");
        assert_eq!(launches.len(), 1);
        let history = executor.history();
        assert_eq!(
            history.iter().find(|c| c.command.contains("kafka-server-start.sh")).unwrap().host,
            "worker2"
        );
    }

    #[tokio::test]
    async fn term_bounce_relaunches_too() {
        let (executor, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));
        bouncer.bounce(BrokerId(1), FaultSignal::Term, None).await.unwrap();
        assert_eq!(executor.commands_containing("kill -15 4242").len(), 1);
        assert_eq!(executor.commands_containing("kafka-server-start.sh").len(), 1);
    }

    #[tokio::test]
    async fn gate_timeout_is_fatal_and_leaves_the_node_suspended() {
        let (executor, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));
        let condition = BounceCondition::when("never-holds", || false);

        let err = bouncer
            .bounce(BrokerId(1), FaultSignal::Stop, Some(quick_gate(&condition)))
            .await
            .unwrap_err();

        match err {
            FaultError::ConditionTimeout { condition, .. } => {
                assert_eq!(condition, "never-holds");
            }
            other => panic!("expected condition timeout, got {other}"),
        }
        // The suspend went out, the resume did not: the node stays down.
        assert_eq!(executor.commands_containing("kill -19 4242").len(), 1);
        assert!(executor.commands_containing("kill -18").is_empty());
        assert!(executor.commands_containing("kafka-server-start.sh").is_empty());
    }

    #[tokio::test]
    async fn gate_that_opens_lets_the_bounce_resolve() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let (executor, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();
        let condition = BounceCondition::when("third-poll", move || {
            counter.fetch_add(1, Ordering::SeqCst) >= 2
        });

        bouncer
            .bounce(
                BrokerId(1),
                FaultSignal::Stop,
                Some(Gate::new(&condition).timeout(Duration::from_secs(1)).backoff(Duration::from_millis(5))),
            )
            .await
            .unwrap();

        assert!(polls.load(Ordering::SeqCst) >= 3);
        assert_eq!(executor.commands_containing("kill -18 4242").len(), 1);
    }

    #[tokio::test]
    async fn bounce_marks_the_node_signaled_then_starting_after_relaunch() {
        let (_, bouncer) =
            bouncer_with(ScriptedExecutor::new().respond("cat /mnt/kafka.pid", "4242\n"));

        bouncer.bounce(BrokerId(1), FaultSignal::Term, None).await.unwrap();
        assert_eq!(bouncer.cluster.node_state(BrokerId(1)).await, NodeState::Starting);
    }
}
