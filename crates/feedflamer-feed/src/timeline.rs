//! Recent-post timeline endpoint for the feed client.

use feedflamer_core::{Post, MAX_POST_COUNT, MIN_POST_COUNT};

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::normalize::normalize_tweet;
use crate::types::{Envelope, TweetData};

/// The API rejects `max_results` below this, so smaller requests are
/// fetched at this size and cut down locally.
const API_MIN_PAGE_SIZE: u8 = 5;

const TWEET_FIELDS: &str = "created_at,public_metrics";

impl FeedClient {
    /// Lists a user's most recent original posts (no retweets or replies),
    /// newest first.
    ///
    /// `count` is clamped to `[1, 100]`; at most `count` posts are returned.
    ///
    /// # Errors
    ///
    /// - [`FeedError::NoPosts`] if the timeline has no posts.
    /// - [`FeedError::Api`] / [`FeedError::Http`] on transport or status failure.
    /// - [`FeedError::Deserialize`] if the response shape is unexpected.
    pub async fn list_recent_posts(&self, user_id: &str, count: u8) -> Result<Vec<Post>, FeedError> {
        let count = count.clamp(MIN_POST_COUNT, MAX_POST_COUNT);
        let page_size = count.max(API_MIN_PAGE_SIZE);

        let mut url = self.endpoint(&["2", "users", user_id, "tweets"]);
        url.query_pairs_mut()
            .append_pair("max_results", &page_size.to_string())
            .append_pair("tweet.fields", TWEET_FIELDS)
            .append_pair("exclude", "retweets,replies");

        let body = self.request_json(&url).await?;
        let envelope: Envelope<Vec<TweetData>> =
            serde_json::from_value(body).map_err(|e| FeedError::Deserialize {
                context: format!("list_recent_posts(user_id={user_id})"),
                source: e,
            })?;

        let tweets = envelope.data.unwrap_or_default();
        if tweets.is_empty() {
            return Err(FeedError::NoPosts {
                user_id: user_id.to_owned(),
            });
        }

        let posts: Vec<Post> = tweets
            .into_iter()
            .take(usize::from(count))
            .map(normalize_tweet)
            .collect();

        tracing::debug!(
            user_id,
            requested = count,
            returned = posts.len(),
            reported = envelope.meta.map_or(0, |m| m.result_count),
            "fetched recent posts"
        );

        Ok(posts)
    }
}
