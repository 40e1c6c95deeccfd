//! Arithmetic engagement summary over a batch of posts.

use crate::types::Post;

/// Aggregate engagement figures for a batch of posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementStats {
    /// Likes + retweets + replies across every post.
    pub total_engagement: u64,
    pub avg_likes: f64,
    pub avg_retweets: f64,
    /// Mean post length in characters.
    pub avg_length: f64,
    /// Character length of each post, in input order.
    pub per_post_lengths: Vec<usize>,
}

/// Summarize `posts`. Averages are `0.0` for an empty slice.
#[must_use]
pub fn summarize(posts: &[Post]) -> EngagementStats {
    let total = |count: fn(&Post) -> u64| -> u64 {
        posts.iter().map(count).fold(0, u64::saturating_add)
    };
    let total_likes = total(|p| p.metrics.like_count);
    let total_retweets = total(|p| p.metrics.retweet_count);
    let total_replies = total(|p| p.metrics.reply_count);
    let per_post_lengths: Vec<usize> = posts.iter().map(Post::char_len).collect();
    let total_length = per_post_lengths
        .iter()
        .copied()
        .fold(0usize, usize::saturating_add);

    let mean = |total: f64| -> f64 {
        if posts.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = posts.len() as f64;
            total / n
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let (likes, retweets, length) = (
        total_likes as f64,
        total_retweets as f64,
        total_length as f64,
    );

    EngagementStats {
        total_engagement: total_likes
            .saturating_add(total_retweets)
            .saturating_add(total_replies),
        avg_likes: mean(likes),
        avg_retweets: mean(retweets),
        avg_length: mean(length),
        per_post_lengths,
    }
}
