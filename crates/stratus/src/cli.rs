//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use stratus_k0s::{HostDescriptor, CCM_MANIFEST_PATH, CCM_REPO_NAME, CCM_REPO_OWNER};

/// Stratus - k0sctl cluster definitions for provisioned hosts
#[derive(Parser, Debug)]
#[command(name = "stratus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a runtime config file (default: ~/.stratus/runtime.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Generate a k0sctl cluster definition
    Generate(GenerateArgs),

    /// Resolve the upstream cloud-provider tag for a Kubernetes version
    Tags(TagsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// GitHub credential sources shared by commands that talk to the API
#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// GitHub token; enables cloud-provider manifest resolution
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Read the GitHub token from a file (takes precedence over --github-token)
    #[arg(long)]
    pub github_token_file: Option<Utf8PathBuf>,
}

// Generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Kubernetes version (e.g., 1.30.2)
    #[arg(long = "k8s-version", visible_alias = "kubernetes-version")]
    pub k8s_version: String,

    /// Cluster name (default from runtime config, "k0s-cluster")
    #[arg(short, long)]
    pub name: Option<String>,

    /// Host as role=..,address=..,user=..,key=..[,port=..]; repeatable
    #[arg(long = "host", value_name = "SPEC")]
    pub hosts: Vec<HostDescriptor>,

    /// Host inventory file (YAML or JSON list, or provisioning output)
    #[arg(short, long)]
    pub inventory: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub token: TokenArgs,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

// Tags command
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Kubernetes version whose minor selects the tag (e.g., 1.26.1)
    #[arg(long = "k8s-version", visible_alias = "kubernetes-version")]
    pub k8s_version: String,

    /// Repository owner
    #[arg(long, default_value = CCM_REPO_OWNER)]
    pub owner: String,

    /// Repository name
    #[arg(long, default_value = CCM_REPO_NAME)]
    pub repo: String,

    /// Also resolve the download URL of this path at the matched tag
    #[arg(long, num_args = 0..=1, default_missing_value = CCM_MANIFEST_PATH)]
    pub path: Option<String>,

    #[command(flatten)]
    pub token: TokenArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
