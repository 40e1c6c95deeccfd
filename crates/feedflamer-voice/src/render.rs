//! Multi-speaker rendering of a parsed transcript into one MP3 file.

use std::path::{Path, PathBuf};

use feedflamer_core::{flatten_transcript, RenderMode, Utterance, VoiceMap};

use crate::clips::TransientClips;
use crate::error::VoiceError;
use crate::synthesizer::Synthesizer;

/// The rendered audio file. Duration is only known once played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    /// Sidecar transcript written alongside, when the caller wrote one.
    pub transcript_path: Option<PathBuf>,
    /// Per-utterance clips synthesized during the render.
    pub clip_count: usize,
    pub byte_len: usize,
    pub mode: RenderMode,
}

impl AudioArtifact {
    #[must_use]
    pub fn with_transcript(mut self, transcript_path: PathBuf) -> Self {
        self.transcript_path = Some(transcript_path);
        self
    }
}

/// Renders utterances through a [`Synthesizer`].
pub struct Renderer<'a, S: Synthesizer> {
    synthesizer: &'a S,
    mode: RenderMode,
}

impl<'a, S: Synthesizer> Renderer<'a, S> {
    #[must_use]
    pub fn new(synthesizer: &'a S, mode: RenderMode) -> Self {
        Self { synthesizer, mode }
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Renders `utterances` to `output_path`.
    ///
    /// Every utterance whose label is in `voices` is synthesized with that
    /// voice into a transient clip. In [`RenderMode::Sequential`] the clips
    /// are joined in order to form the output; when no utterance had a known
    /// voice the flattened `raw_transcript` is narrated with the fallback
    /// voice instead. In [`RenderMode::Legacy`] the clips are discarded and
    /// the flattened transcript is always narrated as a single track.
    ///
    /// Clip files are removed before this returns, whether or not it succeeds.
    ///
    /// # Errors
    ///
    /// - [`VoiceError::EmptyText`] if there is nothing to narrate.
    /// - Any synthesizer error, for a clip or the single track.
    /// - [`VoiceError::Io`] if a clip or the output cannot be written.
    pub async fn render(
        &self,
        utterances: &[Utterance],
        raw_transcript: &str,
        voices: &VoiceMap,
        output_path: &Path,
    ) -> Result<AudioArtifact, VoiceError> {
        let dir = match output_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let stem = output_path
            .file_stem()
            .map_or_else(|| "render".to_owned(), |s| s.to_string_lossy().into_owned());

        let mut clips = TransientClips::new(dir, &stem);
        for utterance in utterances {
            let Some(voice) = voices.get(&utterance.speaker_label) else {
                tracing::debug!(
                    label = %utterance.speaker_label,
                    index = utterance.order_index,
                    "no voice for speaker, skipping utterance"
                );
                continue;
            };
            let text = utterance.text.trim();
            if text.is_empty() {
                continue;
            }
            let audio = self.synthesizer.synthesize(text, voice).await?;
            clips.write(utterance.order_index, &audio).await?;
        }
        let clip_count = clips.len();

        let audio = if self.mode == RenderMode::Sequential && !clips.is_empty() {
            clips.concatenate().await?
        } else {
            let flattened = flatten_transcript(raw_transcript);
            if flattened.is_empty() {
                return Err(VoiceError::EmptyText);
            }
            if self.mode == RenderMode::Sequential {
                tracing::info!("no utterance matched a voice, narrating flattened transcript");
            }
            self.synthesizer
                .synthesize(&flattened, voices.fallback())
                .await?
        };

        tokio::fs::write(output_path, &audio)
            .await
            .map_err(|e| VoiceError::io(output_path, e))?;

        tracing::info!(
            path = %output_path.display(),
            mode = %self.mode,
            clips = clip_count,
            bytes = audio.len(),
            "audio rendered"
        );

        Ok(AudioArtifact {
            path: output_path.to_path_buf(),
            transcript_path: None,
            clip_count,
            byte_len: audio.len(),
            mode: self.mode,
        })
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
