//! Domain model and pure pipeline stages for feedflamer.
//!
//! Holds the post/profile types returned by the feed, the fixed panel roster
//! and voice map, and the three deterministic stages of the pipeline: the
//! engagement summarizer, the prompt composer, and the transcript parser.
//! Application configuration is loaded here as well so every crate sees the
//! same view of the environment.

pub mod app_config;
pub mod config;
pub mod error;
pub mod prompt;
pub mod retry;
pub mod roster;
pub mod stats;
pub mod transcript;
pub mod types;
pub mod voices;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use prompt::{compose, format_thousands, SYSTEM_INSTRUCTION};
pub use retry::retry_with_backoff;
pub use roster::{load_roster, Panelist, Roster, SpeakerId};
pub use stats::{summarize, EngagementStats};
pub use transcript::{flatten_transcript, parse_transcript};
pub use types::{
    clamp_post_count, Post, PostMetrics, ProfileSummary, RenderMode, Utterance,
    DEFAULT_POST_COUNT, MAX_POST_COUNT, MIN_POST_COUNT,
};
pub use voices::{SpeechRate, VoiceMap, VoiceProfile};
