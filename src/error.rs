use std::path::PathBuf;

use thiserror::Error;

/// Every failure a single URL or artifact can run into. None of these stop a batch;
/// the harvester turns each one into a log line and moves on.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to launch browser: {0}")]
    BrowserLaunch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("selector `{selector}` did not appear within {secs}s")]
    SelectorTimeout { selector: String, secs: u64 },

    #[error("{what} not found")]
    PatternNotFound { what: &'static str },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid url `{0}`")]
    InvalidUrl(String),

    #[error("config error: {0}")]
    Config(String),
}

impl HarvestError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem { path: path.into(), source }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport { url: url.to_string(), source }
    }
}

pub type Result<T, E = HarvestError> = std::result::Result<T, E>;
