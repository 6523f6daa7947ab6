//! Bounded fixed-backoff polling.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::trace;

/// Polls `predicate` until it returns true or `timeout` elapses.
///
/// The predicate is evaluated immediately, then every `backoff` until the
/// deadline. Backoff is fixed, not exponential: the callers are liveness
/// barriers and fault-injection gates where a predictable poll cadence
/// matters more than load shedding.
///
/// Returns whether the predicate became true within the timeout. This
/// function never fails; converting a false return into an error is the
/// caller's decision.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use corral_core::wait::wait_until;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let ok = wait_until(
///     || async { true },
///     Duration::from_secs(1),
///     Duration::from_millis(100),
/// )
/// .await;
/// assert!(ok);
/// # });
/// ```
pub async fn wait_until<F, Fut>(mut predicate: F, timeout: Duration, backoff: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    loop {
        if predicate().await {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        trace!(elapsed_ms = start.elapsed().as_millis() as u64, "condition not met, backing off");
        tokio::time::sleep(backoff).await;
    }
}
