//! Stratus CLI - k0sctl cluster definitions for provisioned hosts
//!
//! This is the main entry point for the Stratus command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use camino::Utf8Path;
use clap::Parser;
use stratus_core::{HierarchicalConfigLoader, RuntimeConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Generate(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::generate::run(args, &config).await
        }
        Commands::Tags(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::tags::run(args, &config).await
        }
    }
}

/// Load runtime configuration, honoring `--config`
fn load_config(config_file: Option<&Utf8Path>) -> Result<RuntimeConfig> {
    let mut loader = HierarchicalConfigLoader::new()?;
    if let Some(path) = config_file {
        loader = loader.with_config_file(path);
    }
    Ok(loader.load_runtime_config()?)
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr; stdout carries only the generated document.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
