//! Google Translate TTS client.
//!
//! The endpoint accepts at most 100 characters per request, so text is split
//! at sentence and word boundaries and the returned MP3 segments are joined.
//! The accent is chosen by the regional host (`translate.google.co.uk`, ...).

use std::time::Duration;

use async_trait::async_trait;
use feedflamer_core::{SpeechRate, VoiceProfile};
use reqwest::Client;

use crate::error::VoiceError;
use crate::synthesizer::Synthesizer;

/// Longest text the endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

const SENTENCE_END: [char; 5] = ['.', '!', '?', ';', ':'];

pub struct GoogleTtsClient {
    client: Client,
    /// Replaces `https://translate.google.{variant}` when set.
    base_url: Option<String>,
}

impl GoogleTtsClient {
    /// # Errors
    ///
    /// Returns [`VoiceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, VoiceError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: None,
        })
    }

    /// Sends every request to `base_url` regardless of regional variant.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, VoiceError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: Some(base_url.trim_end_matches('/').to_owned()),
        })
    }

    fn endpoint(&self, voice: &VoiceProfile) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/translate_tts"),
            None => format!(
                "https://translate.google.{}/translate_tts",
                voice.regional_variant
            ),
        }
    }

    async fn fetch_chunk(
        &self,
        url: &str,
        chunk: &str,
        idx: usize,
        total: usize,
        voice: &VoiceProfile,
    ) -> Result<Vec<u8>, VoiceError> {
        let speed = match voice.rate {
            SpeechRate::Normal => "1",
            SpeechRate::Slow => "0.3",
        };
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", voice.language_code.as_str()),
                ("ttsspeed", speed),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_owned(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message: "empty audio body".to_owned(),
            });
        }
        Ok(bytes.to_vec())
    }
}

fn build_client(timeout_secs: u64) -> Result<Client, VoiceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("Mozilla/5.0 (feedflamer)")
        .build()?)
}

#[async_trait]
impl Synthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<Vec<u8>, VoiceError> {
        let chunks = split_for_tts(text);
        if chunks.is_empty() {
            return Err(VoiceError::EmptyText);
        }

        let url = self.endpoint(voice);
        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(&url, chunk, idx, total, voice).await?);
        }

        tracing::debug!(
            speaker = %voice.speaker_label,
            lang = %voice.language_code,
            variant = %voice.regional_variant,
            chunks = total,
            bytes = audio.len(),
            "synthesized speech"
        );
        Ok(audio)
    }
}

/// Splits `text` into pieces of at most [`MAX_CHUNK_CHARS`] characters.
///
/// Whitespace is collapsed. Whole sentences are packed together where they
/// fit; a longer sentence is packed word by word, and a single word longer
/// than the limit is cut. Blank input yields no chunks.
#[must_use]
pub fn split_for_tts(text: &str) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for sentence in sentences(text) {
        if sentence.chars().count() <= MAX_CHUNK_CHARS {
            units.push(sentence);
            continue;
        }
        for word in sentence.split(' ') {
            if word.chars().count() <= MAX_CHUNK_CHARS {
                units.push(word.to_owned());
            } else {
                let chars: Vec<char> = word.chars().collect();
                units.extend(chars.chunks(MAX_CHUNK_CHARS).map(|c| c.iter().collect()));
            }
        }
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for unit in units {
        let unit_len = unit.chars().count();
        if current.is_empty() {
            current = unit;
            current_len = unit_len;
        } else if current_len + 1 + unit_len <= MAX_CHUNK_CHARS {
            current.push(' ');
            current.push_str(&unit);
            current_len += 1 + unit_len;
        } else {
            chunks.push(std::mem::replace(&mut current, unit));
            current_len = unit_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        if word.ends_with(SENTENCE_END) {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
