//! Generate command

use super::resolve_token;
use crate::cli::GenerateArgs;
use crate::output;
use anyhow::{bail, Context, Result};
use std::fs;
use stratus_core::RuntimeConfig;
use stratus_k0s::{load_inventory, ClusterDocument, ClusterRequest, ClusterTopologyBuilder};
use tracing::debug;

pub async fn run(args: GenerateArgs, config: &RuntimeConfig) -> Result<()> {
    let token = resolve_token(&args.token)?;
    let request = build_request(&args)?;

    let builder = ClusterTopologyBuilder::new(config);
    let document = match token {
        Some(token) => {
            let spinner = output::spinner("Resolving cloud-provider manifest...");
            let result = builder.build_document(&request, Some(token)).await;
            spinner.finish_and_clear();
            result?
        }
        None => {
            debug!("No GitHub token, generating without cloud-provider integration");
            builder.build_document(&request, None).await?
        }
    };

    let rendered = render(&document, args.json)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write cluster definition to {}", path))?;
            output::success(&format!(
                "Wrote cluster '{}' ({} hosts) to {}",
                document.metadata.name,
                document.spec.hosts.len(),
                path
            ));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Collect hosts from `--host` flags followed by the inventory file
fn build_request(args: &GenerateArgs) -> Result<ClusterRequest> {
    let mut hosts = args.hosts.clone();

    if let Some(path) = &args.inventory {
        let loaded = load_inventory(path)
            .with_context(|| format!("Failed to load inventory {}", path))?;
        hosts.extend(loaded);
    }

    if hosts.is_empty() {
        bail!("No hosts given; use --host or --inventory");
    }

    let mut request = ClusterRequest::new(&args.k8s_version, hosts);
    if let Some(name) = &args.name {
        request = request.with_name(name);
    }

    Ok(request)
}

fn render(document: &ClusterDocument, json: bool) -> Result<String> {
    if json {
        let mut rendered = serde_json::to_string_pretty(document)?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(document.to_yaml()?)
    }
}
