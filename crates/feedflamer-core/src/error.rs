use thiserror::Error;

/// Errors raised while loading configuration or the panel roster.
///
/// Any of these is fatal at startup: the pipeline never runs with a
/// half-loaded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read roster file {path}: {source}")]
    RosterFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file: {0}")]
    RosterFileParse(#[from] serde_yaml::Error),

    #[error("roster validation failed: {0}")]
    Validation(String),
}
