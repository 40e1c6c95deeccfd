use thiserror::Error;

/// Errors returned by the feed client.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The handle is empty or contains characters a handle cannot have.
    #[error("invalid handle '{0}'")]
    InvalidHandle(String),

    /// The lookup succeeded at the HTTP level but named no user.
    #[error("user @{handle} not found")]
    NotFound { handle: String },

    /// The user exists but has no recent original posts.
    #[error("no recent posts for user {user_id}")]
    NoPosts { user_id: String },

    /// Non-2xx response from the API, with the problem detail when present.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
