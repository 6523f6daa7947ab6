//! Per-node lifecycle state.

use std::fmt;

/// Lifecycle state of one broker process, as known to the controller.
///
/// This is the controller's view, not ground truth: a broker that crashed
/// on its own still reads `Running` until an operation or probe observes
/// otherwise. A node never moves from `Stopped` back to `Running` without
/// passing through `Starting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No launch has been issued, or the node has been cleaned.
    Unstarted,

    /// A launch was issued; the all-alive barrier has not confirmed it yet.
    Starting,

    /// The node was observed alive after launch.
    Running,

    /// A signal was delivered outside a stop, e.g. a suspend or a fault.
    Signaled,

    /// The node was stopped and its PID marker removed.
    Stopped,
}

impl NodeState {
    /// Returns true if a launch has been issued and not yet stopped.
    pub fn is_launched(self) -> bool {
        matches!(self, Self::Starting | Self::Running | Self::Signaled)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstarted => "unstarted",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Signaled => "signaled",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launched_states() {
        assert!(!NodeState::Unstarted.is_launched());
        assert!(NodeState::Starting.is_launched());
        assert!(NodeState::Running.is_launched());
        assert!(NodeState::Signaled.is_launched());
        assert!(!NodeState::Stopped.is_launched());
    }

    #[test]
    fn display() {
        assert_eq!(NodeState::Running.to_string(), "running");
        assert_eq!(NodeState::Unstarted.to_string(), "unstarted");
    }
}
