//! End-to-end podcast generation: feed → script → sidecar → audio.
//!
//! [`Pipeline::run_podcast`] never returns an error. Every stage failure is
//! logged with its stage name and folded into [`PodcastOutcome::Failed`].

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use feedflamer_core::{
    compose, format_thousands, parse_transcript, summarize, AppConfig, RenderMode, Roster,
    VoiceMap,
};
use feedflamer_feed::{normalize::normalize_handle, FeedClient, FeedError};
use feedflamer_narrative::{NarrativeClient, NarrativeError};
use feedflamer_voice::{AudioArtifact, Renderer, Synthesizer, VoiceError};
use thiserror::Error;

use crate::output::{output_basename, write_sidecar, OutputPaths};

/// The pipeline stage a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Lookup,
    Fetch,
    Generation,
    Transcript,
    Synthesis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lookup => "lookup",
            Stage::Fetch => "fetch",
            Stage::Generation => "generation",
            Stage::Transcript => "transcript",
            Stage::Synthesis => "synthesis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub(crate) enum PipelineError {
    #[error("profile lookup failed: {0}")]
    Lookup(#[source] FeedError),

    #[error("fetching posts failed: {0}")]
    Fetch(#[source] FeedError),

    #[error("script generation failed: {0}")]
    Generation(#[from] NarrativeError),

    #[error("writing transcript {} failed: {source}", .path.display())]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audio synthesis failed: {0}")]
    Synthesis(#[from] VoiceError),
}

impl PipelineError {
    pub(crate) fn stage(&self) -> Stage {
        match self {
            PipelineError::Lookup(_) => Stage::Lookup,
            PipelineError::Fetch(_) => Stage::Fetch,
            PipelineError::Generation(_) => Stage::Generation,
            PipelineError::Transcript { .. } => Stage::Transcript,
            PipelineError::Synthesis(_) => Stage::Synthesis,
        }
    }
}

/// Result of one run, reported to the user by `main`.
#[derive(Debug)]
pub(crate) enum PodcastOutcome {
    Completed {
        handle: String,
        display_name: String,
        post_count: usize,
        transcript_path: PathBuf,
        /// `None` when audio was not requested.
        audio: Option<AudioArtifact>,
    },
    Failed {
        stage: Stage,
        message: String,
        /// Present when the sidecar was written before the failure.
        transcript_path: Option<PathBuf>,
    },
}

/// What to generate.
#[derive(Debug, Clone)]
pub(crate) struct PodcastRequest {
    pub handle: String,
    pub post_count: u8,
    pub render_audio: bool,
}

/// Run-wide settings taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub(crate) struct PipelineSettings {
    pub output_dir: PathBuf,
    pub script_prefix: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub render_mode: RenderMode,
}

impl PipelineSettings {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            script_prefix: config.script_prefix.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            render_mode: config.render_mode,
        }
    }
}

pub(crate) struct Pipeline<'a, S: Synthesizer> {
    pub feed: &'a FeedClient,
    pub narrative: &'a NarrativeClient,
    pub synthesizer: &'a S,
    pub roster: &'a Roster,
    pub voices: &'a VoiceMap,
    pub settings: PipelineSettings,
}

impl<S: Synthesizer> Pipeline<'_, S> {
    /// Runs every stage in order, stamping output files with `started_at`.
    pub(crate) async fn run_podcast(
        &self,
        request: &PodcastRequest,
        started_at: NaiveDateTime,
    ) -> PodcastOutcome {
        let mut transcript_path = None;
        match self.run_stages(request, started_at, &mut transcript_path).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let stage = e.stage();
                tracing::error!(
                    handle = %request.handle,
                    %stage,
                    error = %e,
                    "podcast generation failed"
                );
                PodcastOutcome::Failed {
                    stage,
                    message: e.to_string(),
                    transcript_path,
                }
            }
        }
    }

    async fn run_stages(
        &self,
        request: &PodcastRequest,
        started_at: NaiveDateTime,
        written_transcript: &mut Option<PathBuf>,
    ) -> Result<PodcastOutcome, PipelineError> {
        let handle = normalize_handle(&request.handle);

        println!("Fetching recent posts from @{handle}...");
        let profile = self
            .feed
            .lookup_user(handle)
            .await
            .map_err(PipelineError::Lookup)?;
        let posts = self
            .feed
            .list_recent_posts(&profile.id, request.post_count)
            .await
            .map_err(PipelineError::Fetch)?;
        println!(
            "Found {} posts from {} ({} followers)",
            posts.len(),
            profile.display_name,
            format_thousands(profile.follower_count)
        );

        let stats = summarize(&posts);
        let prompt = compose(&profile, &posts, &stats, self.roster);
        tracing::debug!(
            handle,
            posts = posts.len(),
            total_engagement = stats.total_engagement,
            "prompt composed"
        );

        println!("Generating podcast script...");
        let script = self
            .narrative
            .generate(&prompt, self.settings.max_tokens, self.settings.temperature)
            .await?;

        let basename = output_basename(&self.settings.script_prefix, handle, started_at);
        let paths = OutputPaths::new(&self.settings.output_dir, &basename);
        write_sidecar(&paths.transcript, handle, &script, started_at)
            .await
            .map_err(|source| PipelineError::Transcript {
                path: paths.transcript.clone(),
                source,
            })?;
        *written_transcript = Some(paths.transcript.clone());
        println!("Script saved to: {}", paths.transcript.display());

        let audio = if request.render_audio {
            println!("Converting to audio...");
            let utterances = parse_transcript(&script);
            tracing::debug!(utterances = utterances.len(), "transcript parsed");
            let artifact = Renderer::new(self.synthesizer, self.settings.render_mode)
                .render(&utterances, &script, self.voices, &paths.audio)
                .await?
                .with_transcript(paths.transcript.clone());
            println!("Audio saved to: {}", artifact.path.display());
            Some(artifact)
        } else {
            None
        };

        Ok(PodcastOutcome::Completed {
            handle: profile.handle,
            display_name: profile.display_name,
            post_count: posts.len(),
            transcript_path: paths.transcript,
            audio,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
