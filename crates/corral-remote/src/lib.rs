//! Remote command gateway for the corral cluster-control harness.
//!
//! Every interaction with a managed host goes through the [`RemoteExecutor`]
//! trait: issue a shell command, get back captured output and an exit code.
//! The transport behind the trait (SSH, a container exec API, an agent) is
//! deliberately out of scope for this workspace; production deployments plug
//! in their own implementation, and tests use the in-memory
//! [`ScriptedExecutor`].
//!
//! Failure suppression is explicit. Call sites choose an [`ExecPolicy`]:
//! `MustSucceed` turns a non-zero exit into an error, `AllowFailure` hands
//! the output back for inspection. There is no implicit flag; a cleanup path
//! that tolerates failure says so where it calls.
//!
//! # Example
//!
//! ```
//! use corral_remote::{ExecPolicy, RemoteExecutor, ScriptedExecutor};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let executor = ScriptedExecutor::new().respond("uname", "Linux\n");
//! let output = executor
//!     .execute("worker1", "uname -s", ExecPolicy::MustSucceed)
//!     .await
//!     .unwrap();
//! assert_eq!(output.stdout.trim(), "Linux");
//! # });
//! ```

#![warn(missing_docs)]

mod error;
mod exec;
mod script;

pub use error::{RemoteError, Result};
pub use exec::{ExecOutput, ExecPolicy, RemoteExecutor};
pub use script::{IssuedCommand, ScriptedExecutor};
