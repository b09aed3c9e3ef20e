//! Repository coordinates and credentials

use std::fmt;

/// Owner/name pair identifying one GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinate {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl RepoCoordinate {
    /// Create a new repository coordinate
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Bearer token for the GitHub API
///
/// The token value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubToken(String);

impl GitHubToken {
    /// Wrap a token, trimming surrounding whitespace (token files end with a newline)
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the token is blank
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(***)")
    }
}
