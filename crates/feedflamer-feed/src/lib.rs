//! Client for the X (Twitter) API v2: user lookup and recent-post timelines.
//!
//! Responses are normalized into [`feedflamer_core::ProfileSummary`] and
//! [`feedflamer_core::Post`]. Transient failures (timeouts, 429, 5xx) are
//! retried with exponential back-off.

pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
mod timeline;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
