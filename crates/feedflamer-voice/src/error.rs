use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("nothing to synthesize: text is empty")]
    EmptyText,

    #[error("audio I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VoiceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
