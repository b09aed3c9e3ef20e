//! # stratus-core
//!
//! Core library for the Stratus CLI providing:
//! - Hierarchical runtime configuration (embedded defaults, user file, env)
//! - Shared error types

pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::{ClusterDefaults, GitHubConfig, NetworkConfig, RuntimeConfig};
