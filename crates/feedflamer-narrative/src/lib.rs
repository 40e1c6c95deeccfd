//! Narrative generation for feedflamer.
//!
//! Sends the composed critique prompt to an OpenAI-compatible chat completions
//! endpoint and returns the raw multi-speaker transcript text.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::NarrativeClient;
pub use error::NarrativeError;
