use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generator returned no script content")]
    EmptyResponse,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
