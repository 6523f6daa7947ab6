//! Symbolic process signals.
//!
//! Components express intent with these variants (`Term` to shut down,
//! `Stop`/`Cont` to suspend and resume); the numeric values appear only at
//! the point a remote `kill` command is rendered.

use std::fmt;

/// Unix signal delivered to a broker process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// SIGTERM (15), graceful termination request.
    Term,
    /// SIGKILL (9), forceful termination that cannot be caught.
    Kill,
    /// SIGSTOP (19), suspend the process.
    Stop,
    /// SIGCONT (18), resume a suspended process.
    Cont,
    /// SIGINT (2), keyboard interrupt.
    Int,
    /// SIGHUP (1), hangup, conventionally a config reload.
    Hup,
}

impl Signal {
    /// Returns the signal number.
    pub fn number(self) -> i32 {
        match self {
            Signal::Term => 15,
            Signal::Kill => 9,
            Signal::Stop => 19,
            Signal::Cont => 18,
            Signal::Int => 2,
            Signal::Hup => 1,
        }
    }

    /// Returns the signal name without the SIG prefix.
    pub fn name(self) -> &'static str {
        match self {
            Signal::Term => "TERM",
            Signal::Kill => "KILL",
            Signal::Stop => "STOP",
            Signal::Cont => "CONT",
            Signal::Int => "INT",
            Signal::Hup => "HUP",
        }
    }

    /// Returns whether the process can catch or handle this signal.
    pub fn is_catchable(self) -> bool {
        !matches!(self, Signal::Kill | Signal::Stop)
    }

    /// Returns whether this signal normally terminates the process.
    pub fn is_fatal(self) -> bool {
        matches!(self, Signal::Term | Signal::Kill | Signal::Int)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_numbers() {
        assert_eq!(Signal::Term.number(), 15);
        assert_eq!(Signal::Kill.number(), 9);
        assert_eq!(Signal::Stop.number(), 19);
        assert_eq!(Signal::Cont.number(), 18);
    }

    #[test]
    fn signal_catchable() {
        assert!(!Signal::Kill.is_catchable());
        assert!(!Signal::Stop.is_catchable());
        assert!(Signal::Term.is_catchable());
        assert!(Signal::Hup.is_catchable());
    }

    #[test]
    fn signal_fatal() {
        assert!(Signal::Term.is_fatal());
        assert!(Signal::Kill.is_fatal());
        assert!(!Signal::Stop.is_fatal());
        assert!(!Signal::Cont.is_fatal());
    }

    #[test]
    fn signal_display() {
        assert_eq!(format!("{}", Signal::Term), "SIGTERM");
        assert_eq!(format!("{}", Signal::Cont), "SIGCONT");
    }
}
