//! Tag source trait definitions

use crate::error::Result;
use async_trait::async_trait;

/// Read-only view of a repository's tags and file contents
///
/// [`crate::TagResolver`] is the GitHub-backed implementation; cluster
/// document generation only depends on this trait.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Find the highest `ccm/v<MINOR>.<x>.<y>` tag for the MINOR of `version`
    ///
    /// Returns `Ok(None)` when no tag matches.
    async fn match_tag(&self, version: &str) -> Result<Option<String>>;

    /// Resolve the raw download URL of `path` at `tag`
    async fn download_url(&self, path: &str, tag: &str) -> Result<String>;
}
