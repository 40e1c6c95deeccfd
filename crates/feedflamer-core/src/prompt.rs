//! Prompt composition for the critique episode.
//!
//! The composed prompt is a pure function of its inputs: no clock, no
//! randomness, no environment. Identical inputs give byte-identical output.

use crate::roster::Roster;
use crate::stats::EngagementStats;
use crate::types::{Post, ProfileSummary};

/// How many posts, in arrival order, are quoted as discussion material.
pub const MAX_DISCUSSED_POSTS: usize = 5;
/// Character budget for each quoted post before it is cut with [`ELLIPSIS`].
pub const POST_EXCERPT_CHARS: usize = 100;
/// Character budget for the profile bio.
pub const BIO_EXCERPT_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

/// System instruction sent alongside every composed prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a podcast scriptwriter creating engaging \
multi-speaker social media critique shows. Write natural dialogue that sounds like real \
experts having genuine conversations.";

const CLOSING_LINE: &str =
    "Make it sound like genuine experts having a thoughtful discussion, not just listing facts.";

/// Build the generation prompt for one episode.
#[must_use]
pub fn compose(
    profile: &ProfileSummary,
    posts: &[Post],
    stats: &EngagementStats,
    roster: &Roster,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Create a 4-5 minute podcast episode script where {} social media experts critique \
recent posts from @{} ({}).",
        roster.panelists().len(),
        profile.handle,
        profile.display_name
    ));
    lines.push(String::new());

    lines.push("USER PROFILE:".to_string());
    lines.push(format!(
        "- Name: {} (@{})",
        profile.display_name, profile.handle
    ));
    lines.push(format!(
        "- Followers: {}",
        format_thousands(profile.follower_count)
    ));
    lines.push(format!(
        "- Verified: {}",
        if profile.verified { "Yes" } else { "No" }
    ));
    lines.push(format!(
        "- Bio: {}",
        truncate_chars(&profile.bio, BIO_EXCERPT_CHARS)
    ));
    lines.push(String::new());

    lines.push("RECENT POSTS ANALYSIS:".to_string());
    lines.push(format!("- Total posts analyzed: {}", posts.len()));
    lines.push(format!(
        "- Total engagement: {} (likes + retweets + replies)",
        format_thousands(stats.total_engagement)
    ));
    lines.push(format!(
        "- Average engagement: {:.1} likes, {:.1} retweets",
        stats.avg_likes, stats.avg_retweets
    ));
    lines.push(format!(
        "- Average post length: {:.0} characters",
        stats.avg_length
    ));
    lines.push(String::new());

    lines.push("TOP POSTS TO DISCUSS:".to_string());
    for (i, post) in posts.iter().take(MAX_DISCUSSED_POSTS).enumerate() {
        lines.push(format!(
            "Post {}: \"{}\" (likes: {}, retweets: {}, replies: {})",
            i + 1,
            excerpt(&post.text, POST_EXCERPT_CHARS),
            post.metrics.like_count,
            post.metrics.retweet_count,
            post.metrics.reply_count
        ));
    }
    lines.push(String::new());

    lines.push("PANELISTS (each with distinct perspective):".to_string());
    for p in roster.panelists() {
        lines.push(format!("- {} ({}): {}", p.name, p.role, p.personality));
    }
    lines.push(String::new());

    lines.push("SCRIPT REQUIREMENTS:".to_string());
    let label_list = roster
        .labels()
        .iter()
        .map(|label| format!("{label}:"))
        .collect::<Vec<_>>()
        .join(", ");
    let requirements = [
        "Start with a brief intro by a HOST introducing the episode and panelists".to_string(),
        "Each panelist should speak in their distinct style and focus area".to_string(),
        "Include natural conversation flow with agreements, disagreements, and building on each other's points".to_string(),
        "Rate the overall presence on a scale of 1-10 with different criteria".to_string(),
        "Give constructive feedback and suggestions for improvement".to_string(),
        "End with quick final thoughts from each panelist".to_string(),
        "Keep it conversational and engaging, like a real podcast".to_string(),
        format!("Use clear speaker labels at the start of each line ({label_list})"),
        "Include natural speech patterns, pauses indicated by \"...\"".to_string(),
        "Total length: approximately 800-1000 words".to_string(),
    ];
    for (i, requirement) in requirements.iter().enumerate() {
        lines.push(format!("{}. {requirement}", i + 1));
    }
    lines.push(String::new());

    lines.push(CLOSING_LINE.to_string());

    lines.join("\n")
}

/// Render `n` with comma thousands separators, e.g. `50000` → `50,000`.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// First `max` characters of `text`, never splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// `text` cut to `max` characters with [`ELLIPSIS`] appended when it was longer.
fn excerpt(text: &str, max: usize) -> String {
    let cut = truncate_chars(text, max);
    if cut.len() < text.len() {
        format!("{cut}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}
