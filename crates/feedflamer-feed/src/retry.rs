//! Which feed failures are worth another attempt.
//!
//! The back-off loop itself is [`feedflamer_core::retry_with_backoff`].

use crate::error::FeedError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 and 5xx responses.
///
/// **Not retriable:**
/// - [`FeedError::NotFound`] / [`FeedError::NoPosts`]: the answer will not change.
/// - [`FeedError::InvalidHandle`]: caller input.
/// - [`FeedError::Deserialize`]: malformed response.
/// - Any other 4xx, e.g. 401 from a bad bearer token.
pub(crate) fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        FeedError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        FeedError::InvalidHandle(_)
        | FeedError::NotFound { .. }
        | FeedError::NoPosts { .. }
        | FeedError::Deserialize { .. } => false,
    }
}
