//! Runtime configuration types for operational parameters
//!
//! These types define configuration that controls runtime behavior like
//! HTTP timeouts, the GitHub API endpoint and cluster defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Cluster document defaults
    #[serde(default)]
    pub cluster: ClusterDefaults,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// HTTP timeout in seconds, applied to every request
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl NetworkConfig {
    /// HTTP timeout as a `Duration`
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "stratus/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Base URL for GitHub API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
        }
    }
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Defaults applied to generated cluster documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterDefaults {
    /// Cluster name used when none is given
    #[serde(default = "default_cluster_name")]
    pub name: String,
}

impl Default for ClusterDefaults {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
        }
    }
}

fn default_cluster_name() -> String {
    "k0s-cluster".to_string()
}
