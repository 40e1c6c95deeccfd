//! Which generator failures are worth another attempt.

use crate::error::NarrativeError;

/// Timeouts, connection failures, 429 and 5xx are transient. An empty
/// completion or an unparseable body is not retried: re-sending the same
/// prompt costs tokens and is unlikely to change the shape of the reply.
pub(crate) fn is_retriable(err: &NarrativeError) -> bool {
    match err {
        NarrativeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        NarrativeError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        NarrativeError::EmptyResponse | NarrativeError::Deserialize { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn transient_statuses_are_retriable() {
        for status in [429, 500, 502] {
            assert!(is_retriable(&NarrativeError::Api {
                status,
                message: String::new()
            }));
        }
        assert!(!is_retriable(&NarrativeError::Api {
            status: 400,
            message: String::new()
        }));
        assert!(!is_retriable(&NarrativeError::EmptyResponse));
    }

    #[tokio::test]
    async fn empty_response_is_returned_without_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: Result<(), _> = feedflamer_core::retry_with_backoff(5, 0, is_retriable, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(NarrativeError::EmptyResponse)
            }
        })
        .await;
        assert!(matches!(result, Err(NarrativeError::EmptyResponse)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limit_retried_until_budget_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: Result<(), _> = feedflamer_core::retry_with_backoff(2, 0, is_retriable, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(NarrativeError::Api {
                    status: 429,
                    message: "slow down".to_owned(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(NarrativeError::Api { status: 429, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
