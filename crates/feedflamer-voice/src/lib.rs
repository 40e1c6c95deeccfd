//! Speech synthesis and multi-speaker rendering for feedflamer.
//!
//! [`Synthesizer`] is the seam to a text-to-speech engine; [`GoogleTtsClient`]
//! implements it over the Google Translate TTS endpoint. [`Renderer`] turns
//! parsed utterances into a single MP3 file, one clip per speaker turn.

pub mod error;
pub mod google;
pub mod render;
pub mod synthesizer;

mod clips;

pub use error::VoiceError;
pub use google::{split_for_tts, GoogleTtsClient};
pub use render::{AudioArtifact, Renderer};
pub use synthesizer::Synthesizer;
