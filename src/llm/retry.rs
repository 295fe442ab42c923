//! Exponential backoff retry for chat completion calls.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::debug;

/// Configuration: 3 total attempts, base 1s, max 30s.
pub const MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Retry an async operation with exponential backoff.
///
/// `attempt` is called up to `MAX_ATTEMPTS` times. An error for which
/// `should_retry` returns false is handed back immediately, unwrapped.
/// When every attempt fails, `wrap_exhausted` converts the last error.
pub async fn retry_with_backoff<T, E, Fut, F, P, W>(
    mut attempt: F,
    should_retry: P,
    wrap_exhausted: W,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    W: FnOnce(E) -> E,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut attempts = 0;
    loop {
        attempts += 1;

        let error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if !should_retry(&e) => return Err(e),
            Err(e) => e,
        };

        if attempts >= MAX_ATTEMPTS {
            return Err(wrap_exhausted(error));
        }

        if let Some(wait_duration) = backoff.next_backoff() {
            debug!("attempt {} failed, retrying in {:?}", attempts, wait_duration);
            tokio::time::sleep(wait_duration).await;
        }
    }
}
