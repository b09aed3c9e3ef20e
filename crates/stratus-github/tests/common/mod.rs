//! Common test infrastructure for stratus-github tests
//!
//! Provides a wiremock-backed GitHub API and a resolver pointed at it.

#![allow(dead_code)]

use serde_json::json;
use stratus_core::{GitHubConfig, NetworkConfig};
use stratus_github::{GitHubToken, RepoCoordinate, TagResolver};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "kubernetes";
pub const REPO: &str = "cloud-provider-gcp";
pub const TOKEN: &str = "test-token";
pub const MANIFEST_PATH: &str = "deploy/packages/default/manifest.yaml";

/// Tag set used across tests
pub const TAGS: [&str; 5] = [
    "ccm/v26.0.0",
    "ccm/v26.2.4",
    "ccm/v26.4.0",
    "ccm/v25.5.0",
    "providers/v26.0.0",
];

pub fn tags_path() -> String {
    format!("/repos/{}/{}/tags", OWNER, REPO)
}

pub fn contents_path(file: &str) -> String {
    format!("/repos/{}/{}/contents/{}", OWNER, REPO, file)
}

/// Raw URL GitHub would report for `file` at `tag`
pub fn raw_url(tag: &str, file: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}/{}",
        OWNER, REPO, tag, file
    )
}

/// Create a resolver against the mock server with a short timeout
pub fn resolver_for(server: &MockServer) -> TagResolver {
    let github = GitHubConfig {
        api_url: server.uri(),
    };
    let network = NetworkConfig {
        http_timeout_secs: 1,
        ..NetworkConfig::default()
    };

    TagResolver::new(
        RepoCoordinate::new(OWNER, REPO),
        GitHubToken::new(TOKEN),
        &github,
        &network,
    )
    .expect("resolver builds")
}

/// Serve `names` from the tags endpoint, requiring the bearer token
pub async fn mock_tags(server: &MockServer, names: &[&str]) {
    let body: Vec<_> = names
        .iter()
        .map(|name| json!({ "name": name, "commit": { "sha": "0000000" } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .and(query_param("per_page", "100"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve file metadata for `file` at `tag`
pub async fn mock_file(server: &MockServer, file: &str, tag: &str) {
    Mock::given(method("GET"))
        .and(path(contents_path(file)))
        .and(query_param("ref", tag))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "name": "manifest.yaml",
            "path": file,
            "download_url": raw_url(tag, file),
        })))
        .mount(server)
        .await;
}
