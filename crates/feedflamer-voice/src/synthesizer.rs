use async_trait::async_trait;
use feedflamer_core::VoiceProfile;

use crate::error::VoiceError;

/// A text-to-speech engine producing MP3 bytes.
///
/// Implementations must return [`VoiceError::EmptyText`] for blank input
/// rather than an empty clip.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesizes `text` in `voice`.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError`] when the engine fails or `text` is blank.
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<Vec<u8>, VoiceError>;
}
