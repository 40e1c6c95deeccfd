//! HTTP client for the X API v2.
//!
//! Wraps `reqwest` with bearer-token auth, retry on transient failures, and
//! typed response deserialization. Lookups that the API answers with an
//! `errors` array instead of `data` surface as [`FeedError::NotFound`].

use std::time::Duration;

use feedflamer_core::{retry_with_backoff, ProfileSummary};
use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::normalize::{is_valid_handle, normalize_handle, normalize_user};
use crate::retry::is_retriable;
use crate::types::{ApiProblem, Envelope, UserData};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";

const USER_FIELDS: &str = "id,name,username,public_metrics,description,verified";

/// Client for the X API v2.
///
/// Use [`FeedClient::new`] for production or [`FeedClient::with_base_url`]
/// to point at a mock server in tests.
pub struct FeedClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FeedClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("feedflamer/0.1 (critique-podcast)")
            .build()?;

        // Normalise to exactly one trailing slash so path segments append
        // rather than replace the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FeedError::Api {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retry with exponential back-off for transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Looks up a user by handle. A leading `@` is ignored.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidHandle`] if the handle cannot be a username.
    /// - [`FeedError::NotFound`] if the API reports no such user.
    /// - [`FeedError::Api`] / [`FeedError::Http`] on transport or status failure.
    /// - [`FeedError::Deserialize`] if the response does not match the expected shape.
    pub async fn lookup_user(&self, handle: &str) -> Result<ProfileSummary, FeedError> {
        let handle = normalize_handle(handle);
        if !is_valid_handle(handle) {
            return Err(FeedError::InvalidHandle(handle.to_owned()));
        }

        let mut url = self.endpoint(&["2", "users", "by", "username", handle]);
        url.query_pairs_mut().append_pair("user.fields", USER_FIELDS);

        let body = self.request_json(&url).await?;
        let envelope: Envelope<UserData> =
            serde_json::from_value(body).map_err(|e| FeedError::Deserialize {
                context: format!("lookup_user(handle={handle})"),
                source: e,
            })?;

        match envelope.data {
            Some(user) => {
                tracing::debug!(handle, user_id = %user.id, "resolved user");
                Ok(normalize_user(user))
            }
            None => {
                if let Some(problem) = envelope.errors.first().and_then(ApiProblem::message) {
                    tracing::debug!(handle, problem, "user lookup returned no data");
                }
                Err(FeedError::NotFound {
                    handle: handle.to_owned(),
                })
            }
        }
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends an authenticated GET (with retry), asserts a 2xx status, and
    /// parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on network failure, [`FeedError::Api`] on
    /// a non-2xx status, and [`FeedError::Deserialize`] if the body is not JSON.
    pub(crate) async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FeedError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, is_retriable, || async {
            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&self.bearer_token)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                let message = serde_json::from_str::<ApiProblem>(&body)
                    .ok()
                    .and_then(|p| p.message().map(str::to_owned))
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_owned());
                return Err(FeedError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: url.path().to_owned(),
                source: e,
            })
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
