//! Error types for configuration and page extraction

use std::path::PathBuf;

use crate::config::Category;

/// Startup configuration problems. All of these are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file malformed: {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no players configured")]
    EmptyRoster,

    #[error("player listed more than once: {0}")]
    DuplicatePlayer(String),

    #[error("no channel configured for category `{0}`")]
    MissingChannel(Category),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Extraction failures that discard the whole observation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("match id not found in page")]
    MissingMatchId,
}
