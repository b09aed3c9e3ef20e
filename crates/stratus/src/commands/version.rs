//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde::Serialize;

/// Version information for the CLI
#[derive(Debug, Clone, Serialize)]
struct VersionInfo {
    version: &'static str,
    commit: Option<&'static str>,
    target: Option<&'static str>,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_SHA"),
            target: option_env!("TARGET"),
        }
    }

    fn display(&self) -> String {
        let mut parts = vec![format!("stratus {}", self.version)];

        if let Some(commit) = self.commit {
            parts.push(format!("({})", commit));
        }

        if let Some(target) = self.target {
            parts.push(target.to_string());
        }

        parts.join(" ")
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.display());
    }

    Ok(())
}
