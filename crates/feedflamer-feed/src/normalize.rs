//! Normalization of X API types into the pipeline's domain types.

use feedflamer_core::{Post, PostMetrics, ProfileSummary};

use crate::types::{TweetData, UserData};

/// Strip a leading `@` and surrounding whitespace from a handle.
#[must_use]
pub fn normalize_handle(raw: &str) -> &str {
    raw.trim().trim_start_matches('@')
}

/// `true` when `handle` could be an X username: 1–15 ASCII letters, digits or `_`.
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= 15
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[must_use]
pub fn normalize_user(user: UserData) -> ProfileSummary {
    ProfileSummary {
        id: user.id,
        display_name: user.name,
        handle: user.username,
        follower_count: user.public_metrics.followers_count,
        verified: user.verified,
        bio: user.description,
    }
}

#[must_use]
pub fn normalize_tweet(tweet: TweetData) -> Post {
    Post {
        id: tweet.id,
        text: tweet.text,
        created_at: tweet.created_at,
        metrics: PostMetrics {
            like_count: tweet.public_metrics.like_count,
            retweet_count: tweet.public_metrics.retweet_count,
            reply_count: tweet.public_metrics.reply_count,
        },
    }
}
