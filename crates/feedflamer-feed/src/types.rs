//! X API v2 response types.
//!
//! Every v2 response wraps its payload in `{"data": ..., "errors": [...]}`.
//! A lookup miss is not an HTTP error: the API answers 200 with `errors`
//! and no `data`, which [`Envelope`] captures.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level envelope for v2 responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
    #[serde(default)]
    pub meta: Option<TimelineMeta>,
}

/// A problem object, either inside `errors` or as a whole non-2xx body.
#[derive(Debug, Default, Deserialize)]
pub struct ApiProblem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiProblem {
    /// The most specific human-readable message available.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.title.as_deref())
    }
}

// ---------------------------------------------------------------------------
// GET /2/users/by/username/{username}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public_metrics: UserMetrics,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetrics {
    #[serde(default)]
    pub followers_count: u64,
}

// ---------------------------------------------------------------------------
// GET /2/users/{id}/tweets
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub public_metrics: TweetMetrics,
}

#[derive(Debug, Default, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineMeta {
    #[serde(default)]
    pub result_count: u32,
}
