//! CLI command implementations

pub mod generate;
pub mod tags;
pub mod version;

use crate::cli::TokenArgs;
use anyhow::{Context, Result};
use std::fs;
use stratus_github::GitHubToken;

/// Resolve the GitHub credential from `--github-token-file`, then `--github-token`/`GITHUB_TOKEN`
///
/// Blank values count as absent.
pub fn resolve_token(args: &TokenArgs) -> Result<Option<GitHubToken>> {
    let token = match &args.github_token_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read GitHub token file {}", path))?;
            Some(GitHubToken::new(content))
        }
        None => args.github_token.as_deref().map(GitHubToken::new),
    };

    Ok(token.filter(|t| !t.is_empty()))
}
