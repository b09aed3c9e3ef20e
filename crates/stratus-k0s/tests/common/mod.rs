//! Shared test utilities for stratus-k0s integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use stratus_core::{GitHubConfig, NetworkConfig, RuntimeConfig};
use stratus_github::TagSource;
use stratus_k0s::{HostDescriptor, HostRole, CCM_MANIFEST_PATH, CCM_REPO_NAME, CCM_REPO_OWNER};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Tag set published by the upstream repository in these tests
pub const TAGS: [&str; 5] = [
    "ccm/v26.0.0",
    "ccm/v26.2.4",
    "ccm/v26.4.0",
    "ccm/v25.5.0",
    "providers/v26.0.0",
];

/// Controller first, then two workers (one on a custom port)
pub fn test_hosts() -> Vec<HostDescriptor> {
    vec![
        HostDescriptor::new(HostRole::Controller, "10.0.0.1", "root", "/keys/cluster"),
        HostDescriptor::new(HostRole::Worker, "10.0.0.2", "root", "/keys/cluster"),
        HostDescriptor::new(HostRole::Worker, "10.0.0.3", "admin", "/keys/other").with_port(2200),
    ]
}

/// Runtime config pointing the GitHub API at `server`
pub fn config_for(server: &MockServer) -> RuntimeConfig {
    RuntimeConfig {
        github: GitHubConfig {
            api_url: server.uri(),
        },
        network: NetworkConfig {
            http_timeout_secs: 2,
            ..NetworkConfig::default()
        },
        ..RuntimeConfig::default()
    }
}

pub fn manifest_url(tag: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}/{}",
        CCM_REPO_OWNER, CCM_REPO_NAME, tag, CCM_MANIFEST_PATH
    )
}

/// Mount the upstream tags endpoint and the manifest metadata for every ccm tag
pub async fn mock_upstream(server: &MockServer) {
    let tags: Vec<_> = TAGS.iter().map(|name| json!({ "name": name })).collect();

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/tags", CCM_REPO_OWNER, CCM_REPO_NAME)))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags))
        .mount(server)
        .await;

    for tag in TAGS.iter().filter(|t| t.starts_with("ccm/")) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/repos/{}/{}/contents/{}",
                CCM_REPO_OWNER, CCM_REPO_NAME, CCM_MANIFEST_PATH
            )))
            .and(query_param("ref", *tag))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "download_url": manifest_url(tag),
            })))
            .mount(server)
            .await;
    }
}

/// In-memory tag source that counts calls
#[derive(Default)]
pub struct StaticTagSource {
    pub tag: Option<String>,
    pub match_calls: AtomicUsize,
    pub url_calls: AtomicUsize,
}

impl StaticTagSource {
    pub fn with_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.match_calls.load(Ordering::SeqCst),
            self.url_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl TagSource for StaticTagSource {
    async fn match_tag(&self, _version: &str) -> stratus_github::Result<Option<String>> {
        self.match_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tag.clone())
    }

    async fn download_url(&self, path: &str, tag: &str) -> stratus_github::Result<String> {
        self.url_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://static.example/{}/{}", tag, path))
    }
}
