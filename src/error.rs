// Error types for folio.
// Application errors plus the value-level failures returned by project fetches.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;

/// Classification of a failed project fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NetworkError,
    RemoteError,
    ParseError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::RemoteError => "RemoteError",
            ErrorKind::ParseError => "ParseError",
        };
        f.write_str(name)
    }
}

/// A failed fetch, carried as a value through the cache and into the UI.
///
/// Cloneable so a single cached failure can be handed to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid owner identifier {0:?}")]
    InvalidInput(String),

    #[error("{0}")]
    Network(String),

    #[error("{status}: {body}")]
    Remote { status: u16, body: String },

    #[error("{0}")]
    Parse(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidInput(_) => ErrorKind::InvalidInput,
            FetchError::Network(_) => ErrorKind::NetworkError,
            FetchError::Remote { .. } => ErrorKind::RemoteError,
            FetchError::Parse(_) => ErrorKind::ParseError,
        }
    }

    /// Whether re-invoking the fetch could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Remote { status, .. } => *status == 429 || *status >= 500,
            FetchError::InvalidInput(_) | FetchError::Parse(_) => false,
        }
    }

    /// Human-readable message for the projects page.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::InvalidInput(owner) => {
                format!("'{}' is not a valid GitHub user name", owner)
            }
            FetchError::Network(_) => "Could not reach GitHub. Check your connection.".to_string(),
            FetchError::Remote { status: 404, .. } => "No such GitHub user.".to_string(),
            FetchError::Remote { status: 403, .. } | FetchError::Remote { status: 429, .. } => {
                "GitHub rate limit reached. Try again later.".to_string()
            }
            FetchError::Remote { status, .. } if *status >= 500 => {
                format!("GitHub is having trouble (HTTP {}).", status)
            }
            FetchError::Remote { status, .. } => format!("GitHub refused the request (HTTP {}).", status),
            FetchError::Parse(_) => "GitHub sent a response folio does not understand.".to_string(),
        }
    }
}
