//! Error types for stratus-github

use thiserror::Error;

/// Result type alias using stratus-github's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to the tag source
///
/// An empty tag match is not an error, see [`crate::TagSource::match_tag`].
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connect, timeout, TLS, body decoding)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status (auth, rate limit, server errors)
    #[error("GitHub API request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// Requested path does not exist as a file at the given ref
    #[error("Path '{path}' not found at ref '{reference}'")]
    ContentNotFound { path: String, reference: String },

    /// Version constraint without a numeric MINOR component
    #[error("Invalid version constraint: {version} (expected MAJOR.MINOR[.PATCH])")]
    InvalidVersion { version: String },

    /// Malformed API base URL
    #[error("Invalid GitHub API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Create a status error
    pub fn status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            url: url.into(),
        }
    }

    /// Create a content not found error
    pub fn content_not_found(path: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::ContentNotFound {
            path: path.into(),
            reference: reference.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }
}
