//! Error types for the Jira command-line client.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::api::failure::RemoteFailure;

/// Errors raised while locating, reading, writing or prompting for the config record.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to resolve the home directory of the current user")]
    HomeDirUnavailable,

    #[error("Config file I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Invalid runtime settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Config file has not been loaded")]
    NotLoaded,
}

/// Errors raised while constructing the REST client or talking to the tracker.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session is not initialized")]
    NotInitialized,

    #[error("Invalid Jira host: '{0}'")]
    InvalidEndpoint(String),

    #[error("Invalid proxy '{proxy}': {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error(transparent)]
    Remote(#[from] RemoteFailure),
}

impl ApiError {
    /// Collapse into the display variant set used by the reporter.
    pub fn to_failure(&self) -> RemoteFailure {
        match self {
            ApiError::Remote(failure) => failure.clone(),
            other => RemoteFailure::Unknown(other.to_string()),
        }
    }
}

/// Top-level error surfaced by session initialization and command routing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
