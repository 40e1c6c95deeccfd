mod interactive;
mod output;
mod pipeline;
mod playback;

use std::io;

use clap::Parser;
use feedflamer_core::{format_thousands, load_roster, AppConfig, RenderMode, Roster, SpeechRate, VoiceMap};
use feedflamer_feed::FeedClient;
use feedflamer_narrative::NarrativeClient;
use feedflamer_voice::GoogleTtsClient;
use tracing_subscriber::EnvFilter;

use crate::pipeline::{Pipeline, PipelineSettings, PodcastOutcome, PodcastRequest};

#[derive(Debug, Parser)]
#[command(name = "feedflamer-cli")]
#[command(about = "Turn an X account's recent posts into a multi-voice critique podcast")]
struct Cli {
    /// Account to critique (with or without the leading @); prompted for when omitted
    #[arg(long)]
    handle: Option<String>,

    /// Number of recent posts to analyze (clamped to 1..=100); prompted for when omitted
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Do not play the episode after rendering
    #[arg(long)]
    no_play: bool,

    /// Write the script only; skip speech synthesis
    #[arg(long)]
    no_audio: bool,

    /// Rendering mode, overriding FEEDFLAMER_RENDER_MODE
    #[arg(long, value_parser = parse_render_mode)]
    mode: Option<RenderMode>,
}

fn parse_render_mode(value: &str) -> Result<RenderMode, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = feedflamer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let roster = match &config.roster_path {
        Some(path) => load_roster(path)?,
        None => Roster::default(),
    };
    let fallback_rate = if config.slow_speech {
        SpeechRate::Slow
    } else {
        SpeechRate::Normal
    };
    let voices = VoiceMap::with_defaults(&config.default_language, fallback_rate);

    println!("Twitter Critique Podcast Generator");
    println!("{}", "=".repeat(40));

    let Some(request) = resolve_request(&cli, &config)? else {
        println!("Username is required");
        return Ok(());
    };

    let feed = build_feed_client(&config)?;
    let narrative = build_narrative_client(&config)?;
    let tts = match &config.tts_base_url {
        Some(base) => GoogleTtsClient::with_base_url(config.request_timeout_secs, base)?,
        None => GoogleTtsClient::new(config.request_timeout_secs)?,
    };

    let mut settings = PipelineSettings::from_config(&config);
    if let Some(mode) = cli.mode {
        settings.render_mode = mode;
    }

    let pipeline = Pipeline {
        feed: &feed,
        narrative: &narrative,
        synthesizer: &tts,
        roster: &roster,
        voices: &voices,
        settings,
    };
    let outcome = pipeline
        .run_podcast(&request, chrono::Local::now().naive_local())
        .await;

    match outcome {
        PodcastOutcome::Completed {
            handle,
            display_name,
            post_count,
            transcript_path,
            audio,
        } => {
            println!();
            println!("Podcast generation complete!");
            println!("Script: {}", transcript_path.display());
            if let Some(artifact) = &audio {
                println!(
                    "Audio file: {} ({} bytes)",
                    artifact.path.display(),
                    format_thousands(u64::try_from(artifact.byte_len).unwrap_or(u64::MAX))
                );
            }
            println!("Analyzed {post_count} posts from {display_name} (@{handle})");

            if let Some(artifact) = audio.filter(|_| !cli.no_play) {
                if let Err(e) = playback::play(&artifact.path).await {
                    tracing::warn!(error = %e, "playback failed");
                    println!("Error playing audio: {e:#}");
                }
            }
        }
        PodcastOutcome::Failed {
            stage,
            message,
            transcript_path,
        } => {
            println!("Podcast generation failed during {stage}: {message}");
            if let Some(path) = transcript_path {
                println!("The script was kept at {}", path.display());
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Fills in the handle and post count from flags, prompting on stdin for
/// whichever is missing. `None` means the user gave no handle.
fn resolve_request(cli: &Cli, config: &AppConfig) -> io::Result<Option<PodcastRequest>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let handle = match cli.handle.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
        Some(handle) => Some(handle.to_owned()),
        None => interactive::ask_handle(&mut input, &mut output)?,
    };
    let Some(handle) = handle else {
        return Ok(None);
    };

    let post_count = match cli.count {
        Some(n) => feedflamer_core::clamp_post_count(n),
        None => interactive::ask_post_count(config.default_post_count, &mut input, &mut output)?,
    };

    Ok(Some(PodcastRequest {
        handle,
        post_count,
        render_audio: !cli.no_audio,
    }))
}

fn build_feed_client(config: &AppConfig) -> anyhow::Result<FeedClient> {
    let client = match &config.twitter_base_url {
        Some(base) => FeedClient::with_base_url(
            &config.twitter_bearer_token,
            config.request_timeout_secs,
            base,
        )?,
        None => FeedClient::new(&config.twitter_bearer_token, config.request_timeout_secs)?,
    };
    Ok(client.with_retry(config.max_retries, config.retry_backoff_base_ms))
}

fn build_narrative_client(config: &AppConfig) -> anyhow::Result<NarrativeClient> {
    let client = match &config.openai_base_url {
        Some(base) => NarrativeClient::with_base_url(
            &config.openai_api_key,
            &config.openai_model,
            config.request_timeout_secs,
            base,
        )?,
        None => NarrativeClient::new(
            &config.openai_api_key,
            &config.openai_model,
            config.request_timeout_secs,
        )?,
    };
    Ok(client.with_retry(config.max_retries, config.retry_backoff_base_ms))
}
