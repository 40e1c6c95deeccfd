use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest number of posts requested from the feed in one run.
pub const MIN_POST_COUNT: u8 = 1;
/// Largest number of posts the feed returns in a single page.
pub const MAX_POST_COUNT: u8 = 100;
/// Post count used when the operator does not choose one.
pub const DEFAULT_POST_COUNT: u8 = 10;

/// Clamp a requested post count into `[MIN_POST_COUNT, MAX_POST_COUNT]`.
#[must_use]
pub fn clamp_post_count(requested: i64) -> u8 {
    let clamped = requested.clamp(i64::from(MIN_POST_COUNT), i64::from(MAX_POST_COUNT));
    u8::try_from(clamped).unwrap_or(DEFAULT_POST_COUNT)
}

/// Public engagement counters attached to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetrics {
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
}

/// One public post as returned by the feed, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub metrics: PostMetrics,
}

impl Post {
    /// Length of the post text in characters (not bytes).
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The subject account, as looked up by handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Platform user id, needed to list the user's posts.
    pub id: String,
    pub display_name: String,
    pub handle: String,
    pub follower_count: u64,
    pub verified: bool,
    pub bio: String,
}

/// A single labeled line of a generated transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Uppercase speaker label, e.g. `HOST`. May name a speaker with no voice.
    pub speaker_label: String,
    pub text: String,
    /// Position among recognized utterances, dense from 0.
    pub order_index: usize,
}

/// How the renderer turns a parsed transcript into one audio file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Synthesize each utterance with its speaker's voice and join the clips in order.
    #[default]
    Sequential,
    /// Synthesize each utterance, discard the clips, and narrate the flattened
    /// transcript in a single voice.
    Legacy,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Sequential => write!(f, "sequential"),
            RenderMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(RenderMode::Sequential),
            "legacy" => Ok(RenderMode::Legacy),
            other => Err(format!(
                "unknown render mode '{other}'; expected 'sequential' or 'legacy'"
            )),
        }
    }
}
