//! Tag listing and best-match selection
//!
//! Upstream cloud-provider releases are tagged `ccm/v<MINOR>.<x>.<y>`, where
//! the first number tracks the Kubernetes minor version they target. Given a
//! Kubernetes version such as `1.26.1`, only the `26` is used: every tag of
//! the form `ccm/v26.<x>.<y>` is a candidate and the numerically highest one
//! wins.

use crate::error::{Error, Result};
use crate::repository::{GitHubToken, RepoCoordinate};
use crate::source::TagSource;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use semver::Version;
use serde::Deserialize;
use std::sync::LazyLock;
use stratus_core::{GitHubConfig, NetworkConfig};
use tracing::{debug, info};
use url::Url;

/// Prefix shared by all cloud-controller-manager release tags
pub const CCM_TAG_PREFIX: &str = "ccm/v";

/// Page size requested from the tags endpoint; only the first page is read
const TAGS_PER_PAGE: &str = "100";

/// GitHub REST API version header value
const GITHUB_API_VERSION: &str = "2022-11-28";

/// `ccm/v<digits>.<digits>.<digits>`, the whole tag name
static CCM_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ccm/v(\d+)\.(\d+)\.(\d+)$").expect("ccm tag regex is valid")
});

/// A tag whose name matched the minor-version pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    /// Full tag name (e.g., "ccm/v26.4.0")
    pub name: String,

    /// Version embedded after the `ccm/v` prefix
    pub version: Version,
}

/// Tag entry as returned by `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Clone, Deserialize)]
struct Tag {
    name: String,
}

/// File metadata as returned by `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
struct ContentEntry {
    #[serde(rename = "type")]
    kind: String,

    download_url: Option<String>,
}

/// The contents endpoint returns an array when the path is a directory
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Directory(Vec<ContentEntry>),
    File(ContentEntry),
}

/// Extract the MINOR component of a `MAJOR.MINOR[.PATCH]` version string
///
/// A leading `v` is accepted. MAJOR and PATCH are not validated.
pub(crate) fn minor_of(version: &str) -> Result<u64> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    trimmed
        .split('.')
        .nth(1)
        .filter(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|minor| minor.parse().ok())
        .ok_or_else(|| Error::invalid_version(version))
}

/// Select the highest matching tag for `minor` from a list of tag names
///
/// Candidates are ordered by (major, minor, patch) descending; equal versions
/// written differently (`ccm/v26.04.0` vs `ccm/v26.4.0`) fall back to name order.
pub fn select_best_tag<'a, I>(names: I, minor: u64) -> Option<TagCandidate>
where
    I: IntoIterator<Item = &'a str>,
{
    let minor_segment = minor.to_string();

    let mut candidates: Vec<TagCandidate> = names
        .into_iter()
        .filter_map(|name| {
            let captures = CCM_TAG_RE.captures(name)?;
            if captures[1] != *minor_segment {
                return None;
            }
            let middle = captures[2].parse().ok()?;
            let patch = captures[3].parse().ok()?;
            Some(TagCandidate {
                name: name.to_string(),
                version: Version::new(minor, middle, patch),
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.version.cmp(&a.version).then_with(|| a.name.cmp(&b.name)));
    candidates.into_iter().next()
}

/// GitHub-backed tag resolver for one repository
///
/// Holds the repository coordinate, credential and HTTP client for its
/// whole lifetime. Each operation issues exactly one request and never retries.
pub struct TagResolver {
    /// HTTP client with timeout and default headers applied
    client: reqwest::Client,

    /// Base URL for the GitHub API
    api_url: Url,

    /// Repository being queried
    repo: RepoCoordinate,

    /// Bearer credential
    token: GitHubToken,
}

impl TagResolver {
    /// Create a resolver for `repo` using the configured API endpoint and timeout
    pub fn new(
        repo: RepoCoordinate,
        token: GitHubToken,
        github: &GitHubConfig,
        network: &NetworkConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.http_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: Url::parse(&github.api_url)?,
            repo,
            token,
        })
    }

    /// Repository this resolver queries
    pub fn repo(&self) -> &RepoCoordinate {
        &self.repo
    }

    /// Build `{api}/repos/{owner}/{repo}/{segments...}`
    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    /// List tag names from the first page of the tags endpoint
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let mut url = self.endpoint(["tags"])?;
        url.query_pairs_mut().append_pair("per_page", TAGS_PER_PAGE);

        debug!("Fetching tags from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::status(response.status(), url));
        }

        let tags: Vec<Tag> = response.json().await?;
        debug!("Fetched {} tags from {}", tags.len(), self.repo);

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}

#[async_trait]
impl TagSource for TagResolver {
    async fn match_tag(&self, version: &str) -> Result<Option<String>> {
        let minor = minor_of(version)?;
        let tags = self.list_tags().await?;

        let best = select_best_tag(tags.iter().map(String::as_str), minor);
        match &best {
            Some(candidate) => info!(
                "Matched {} tag {} for version {}",
                self.repo, candidate.name, version
            ),
            None => info!(
                "No {} tag matches {}{}.x.y for version {}",
                self.repo, CCM_TAG_PREFIX, minor, version
            ),
        }

        Ok(best.map(|candidate| candidate.name))
    }

    async fn download_url(&self, path: &str, tag: &str) -> Result<String> {
        let segments = ["contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().append_pair("ref", tag);

        debug!("Fetching content metadata from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::content_not_found(path, tag));
        }
        if !response.status().is_success() {
            return Err(Error::status(response.status(), url));
        }

        match response.json::<ContentsResponse>().await? {
            ContentsResponse::File(ContentEntry {
                kind,
                download_url: Some(download_url),
            }) if kind == "file" => Ok(download_url),
            ContentsResponse::Directory(entries) => {
                debug!("{} is a directory with {} entries", path, entries.len());
                Err(Error::content_not_found(path, tag))
            }
            ContentsResponse::File(_) => Err(Error::content_not_found(path, tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: [&str; 5] = [
        "ccm/v26.0.0",
        "ccm/v26.2.4",
        "ccm/v26.4.0",
        "ccm/v25.5.0",
        "providers/v26.0.0",
    ];

    #[test]
    fn test_minor_of() {
        assert_eq!(minor_of("1.26.1").unwrap(), 26);
        assert_eq!(minor_of("v1.30.0").unwrap(), 30);
        assert_eq!(minor_of("1.27").unwrap(), 27);
        assert_eq!(minor_of(" 1.28.3 ").unwrap(), 28);
    }

    #[test]
    fn test_minor_of_rejects_missing_minor() {
        assert!(matches!(minor_of("1"), Err(Error::InvalidVersion { .. })));
        assert!(matches!(minor_of(""), Err(Error::InvalidVersion { .. })));
        assert!(matches!(minor_of("1..0"), Err(Error::InvalidVersion { .. })));
        assert!(matches!(minor_of("1.x.0"), Err(Error::InvalidVersion { .. })));
    }

    #[test]
    fn test_selects_highest_matching_minor() {
        let best = select_best_tag(TAGS, 26).unwrap();
        assert_eq!(best.name, "ccm/v26.4.0");
        assert_eq!(best.version, Version::new(26, 4, 0));
    }

    #[test]
    fn test_no_match_returns_none() {
        assert!(select_best_tag(TAGS, 99).is_none());
        assert!(select_best_tag([], 26).is_none());
    }

    #[test]
    fn test_ordering_is_numeric_not_lexicographic() {
        // Lexicographically "ccm/v26.9.0" > "ccm/v26.10.0"
        let best = select_best_tag(["ccm/v26.9.0", "ccm/v26.10.0", "ccm/v26.2.11"], 26).unwrap();
        assert_eq!(best.name, "ccm/v26.10.0");

        let best = select_best_tag(["ccm/v26.1.9", "ccm/v26.1.10"], 26).unwrap();
        assert_eq!(best.name, "ccm/v26.1.10");
    }

    #[test]
    fn test_minor_prefix_does_not_bleed() {
        // minor 2 must not match ccm/v26.x.y or ccm/v20.x.y
        assert!(select_best_tag(["ccm/v26.0.0", "ccm/v20.1.0"], 2).is_none());
        assert_eq!(
            select_best_tag(["ccm/v26.0.0", "ccm/v2.1.0"], 2).unwrap().name,
            "ccm/v2.1.0"
        );
    }

    #[test]
    fn test_pattern_is_anchored() {
        let names = [
            "ccm/v26.5.0-rc.1",
            "xccm/v26.6.0",
            "ccm/v26.7",
            "ccm/v26.1.0",
        ];
        assert_eq!(select_best_tag(names, 26).unwrap().name, "ccm/v26.1.0");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let first = select_best_tag(["ccm/v26.04.0", "ccm/v26.4.0"], 26).unwrap();
        for _ in 0..10 {
            let again = select_best_tag(["ccm/v26.4.0", "ccm/v26.04.0"], 26).unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(first.name, "ccm/v26.04.0");
    }
}
