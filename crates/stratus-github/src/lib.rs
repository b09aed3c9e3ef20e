//! Upstream tag resolution against the GitHub REST API
//!
//! Provides:
//! - Listing the tags of one repository
//! - Best-match selection of `ccm/v<MINOR>.<x>.<y>` tags for a Kubernetes minor version
//! - Raw download URL lookup for a file at a tag
//!
//! # Example
//!
//! ```no_run
//! use stratus_core::{GitHubConfig, NetworkConfig};
//! use stratus_github::{GitHubToken, RepoCoordinate, TagResolver, TagSource};
//!
//! # async fn run() -> stratus_github::Result<()> {
//! let resolver = TagResolver::new(
//!     RepoCoordinate::new("kubernetes", "cloud-provider-gcp"),
//!     GitHubToken::new("ghp_example"),
//!     &GitHubConfig::default(),
//!     &NetworkConfig::default(),
//! )?;
//!
//! if let Some(tag) = resolver.match_tag("1.26.1").await? {
//!     let url = resolver
//!         .download_url("deploy/packages/default/manifest.yaml", &tag)
//!         .await?;
//!     println!("{} -> {}", tag, url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod repository;
pub mod source;
pub mod tags;

pub use error::{Error, Result};
pub use repository::{GitHubToken, RepoCoordinate};
pub use source::TagSource;
pub use tags::{select_best_tag, TagCandidate, TagResolver, CCM_TAG_PREFIX};
