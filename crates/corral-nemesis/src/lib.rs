//! Fault injection for a managed broker cluster.
//!
//! The one fault this crate injects is the bounce: signal a broker to
//! simulate a failure, optionally hold it down until an observable
//! condition becomes true, then restore it. Restoration depends on the
//! signal; a suspended process is resumed in place, a terminated one is
//! relaunched.
//!
//! Only [`FaultSignal::Kill`], [`FaultSignal::Stop`] and
//! [`FaultSignal::Term`] can be injected. The restriction is enforced by
//! the type, not a runtime check: signals outside that set can corrupt
//! broker state in ways nothing downstream detects or repairs, so they are
//! unrepresentable here.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use corral_nemesis::{Bouncer, FaultSignal, Gate, BounceCondition};
//! # async fn demo(cluster: Arc<corral_cluster::BrokerCluster>) -> Result<(), corral_nemesis::FaultError> {
//! let bouncer = Bouncer::new(cluster.clone());
//!
//! // Kill broker 1 and wait for a new controller before relaunching it.
//! let election = BounceCondition::when("controller-reelected", move || {
//!     // Poll whatever signal the scenario cares about.
//!     true
//! });
//! bouncer
//!     .bounce(corral_core::node::BrokerId(1), FaultSignal::Kill, Some(Gate::new(&election)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod bounce;
mod condition;
mod error;

pub use bounce::{Bouncer, FaultSignal, Gate};
pub use condition::{BounceCondition, Probe};
pub use error::{FaultError, Result};
