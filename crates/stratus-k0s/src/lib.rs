//! k0sctl cluster definition generation for Stratus
//!
//! This crate turns a list of SSH-reachable hosts and a Kubernetes version
//! into the `Cluster` document consumed by `k0sctl apply`.
//!
//! # Features
//!
//! - One host entry per descriptor, in input order, SSH port defaulting to 22
//! - k0s version block (`<version>+k0s.0`, dynamic config enabled)
//! - Optional GCP cloud-controller-manager wiring, resolved from the upstream
//!   `kubernetes/cloud-provider-gcp` release tags when a GitHub credential is given
//! - Host inventory loading from YAML/JSON files and provisioning outputs
//!
//! # Example
//!
//! ```ignore
//! use stratus_core::RuntimeConfig;
//! use stratus_k0s::{ClusterRequest, ClusterTopologyBuilder, HostDescriptor, HostRole};
//!
//! let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());
//! let request = ClusterRequest::new(
//!     "1.30.2",
//!     vec![
//!         HostDescriptor::new(HostRole::Controller, "10.0.0.1", "root", "~/.ssh/id_ed25519"),
//!         HostDescriptor::new(HostRole::Worker, "10.0.0.2", "root", "~/.ssh/id_ed25519"),
//!     ],
//! )
//! .with_name("lab");
//!
//! let yaml = builder.build(&request, None).await?;
//! println!("{}", yaml);
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod host;
pub mod inventory;

pub use builder::{
    resolve_enrichment, CloudProviderEnrichment, ClusterRequest, ClusterTopologyBuilder,
    CCM_MANIFEST_PATH, CCM_REPO_NAME, CCM_REPO_OWNER,
};
pub use document::{
    ClusterDocument, FileDirective, HostNode, K0sSpec, SshConnection, K0SCTL_API_VERSION,
    K0S_VERSION_SUFFIX,
};
pub use error::{Error, Result};
pub use host::{HostDescriptor, HostRole, DEFAULT_SSH_PORT};
pub use inventory::{load_inventory, parse_inventory};
