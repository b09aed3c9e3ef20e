//! Tags command
//!
//! Runs the tag resolution step on its own, for checking what a generated
//! document would reference.

use super::resolve_token;
use crate::cli::TagsArgs;
use anyhow::{anyhow, Result};
use serde::Serialize;
use stratus_core::RuntimeConfig;
use stratus_github::{RepoCoordinate, TagResolver, TagSource};

#[derive(Debug, Serialize)]
struct TagReport {
    repository: String,
    version: String,
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
}

pub async fn run(args: TagsArgs, config: &RuntimeConfig) -> Result<()> {
    let token = resolve_token(&args.token)?
        .ok_or_else(|| anyhow!("A GitHub token is required; set GITHUB_TOKEN or --github-token"))?;

    let repo = RepoCoordinate::new(&args.owner, &args.repo);
    let resolver = TagResolver::new(repo.clone(), token, &config.github, &config.network)?;

    let tag = resolver
        .match_tag(&args.k8s_version)
        .await?
        .ok_or_else(|| {
            anyhow!(
                "No release tag in {} matches Kubernetes {}",
                repo,
                args.k8s_version
            )
        })?;

    let download_url = match &args.path {
        Some(path) => Some(resolver.download_url(path, &tag).await?),
        None => None,
    };

    let report = TagReport {
        repository: repo.to_string(),
        version: args.k8s_version,
        tag,
        download_url,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.tag);
        if let Some(url) = &report.download_url {
            println!("{}", url);
        }
    }

    Ok(())
}
