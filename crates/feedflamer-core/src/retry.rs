//! Exponential back-off shared by the feed and generator clients.
//!
//! Each client decides which of its own errors are transient and hands that
//! predicate to [`retry_with_backoff`]. Speech synthesis does not retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Upper bound on a single back-off sleep before jitter.
pub const MAX_BACKOFF_MS: u64 = 60_000;

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// capped at [`MAX_BACKOFF_MS`], then scaled by a jitter factor in `[0.75, 1.25)`.
#[must_use]
pub fn backoff_delay(attempt: u32, backoff_base_ms: u64) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    let capped = backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_BACKOFF_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    Duration::from_millis(jittered)
}

/// Runs `operation`, retrying up to `max_retries` more times while
/// `is_retriable` accepts the error.
///
/// # Errors
///
/// Returns the first non-retriable error, or the last error once the retry
/// budget is spent.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    is_retriable: fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_retries && is_retriable(&err) => {
                attempt += 1;
                let delay = backoff_delay(attempt, backoff_base_ms);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient request failure, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
