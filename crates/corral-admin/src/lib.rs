//! Administrative operations against a running broker cluster.
//!
//! Administration goes through the broker distribution's own CLI tools,
//! invoked on an arbitrary cluster member over the remote gateway. This
//! crate wraps two of them:
//!
//! - [`TopicAdmin`]: topic creation and description via the topic tool.
//!   Creation validates the [`TopicSpec`] before anything touches the
//!   network, waits a short settle delay, and logs a describe of the new
//!   topic for the operator; it does not verify propagation beyond the
//!   tool's own exit status.
//! - [`Reassigner`]: drives partition [`ReassignmentPlan`]s through the
//!   reassignment tool. `execute` submits a plan and returns; completion is
//!   observed by polling [`Reassigner::verify`], which classifies the
//!   tool's textual output into a [`ReassignmentStatus`].
//!
//! # Example
//!
//! ```
//! use corral_admin::TopicSpec;
//!
//! let spec = TopicSpec::builder("events")
//!     .partitions(6)
//!     .replication_factor(3)
//!     .config("retention.ms", "86400000")
//!     .build();
//! assert!(spec.validate().is_ok());
//! ```

#![warn(missing_docs)]

mod error;
mod reassign;
mod topic;

pub use error::{AdminError, Result};
pub use reassign::{ReassignmentPlan, ReassignmentStatus, Reassigner};
pub use topic::{TopicAdmin, TopicSpec, TopicSpecBuilder};
