//! Cluster topology builder
//!
//! Turns a cluster request (name, Kubernetes version, hosts) into a k0sctl
//! document. With a GitHub credential the GCP cloud-controller-manager is
//! wired in:
//!
//! 1. The best `ccm/v<MINOR>.x.y` tag of `kubernetes/cloud-provider-gcp` is resolved
//! 2. The manifest URL at that tag is resolved
//! 3. Workers get cloud-provider install flags, controllers get the manifest
//!    as a file directive
//!
//! No matching tag disables the enrichment; resolution failures propagate.

use crate::document::{
    ClusterDocument, ClusterSpec, FileDirective, HostNode, K0sSpec, Metadata, SshConnection,
    K0SCTL_API_VERSION, K0SCTL_KIND,
};
use crate::error::{Error, Result};
use crate::host::{HostDescriptor, HostRole};
use stratus_core::{GitHubConfig, NetworkConfig, RuntimeConfig};
use stratus_github::{GitHubToken, RepoCoordinate, TagResolver, TagSource};
use tracing::{debug, info};

/// Owner of the upstream cloud-provider repository
pub const CCM_REPO_OWNER: &str = "kubernetes";

/// Upstream cloud-provider repository
pub const CCM_REPO_NAME: &str = "cloud-provider-gcp";

/// Manifest path inside the upstream repository
pub const CCM_MANIFEST_PATH: &str = "deploy/packages/default/manifest.yaml";

/// Logical name of the manifest file directive
pub const CCM_FILE_NAME: &str = "gcp-cloud-controller-manager";

/// Destination of the manifest on controllers (k0s applies everything under manifests/)
pub const CCM_DST_DIR: &str = "/var/lib/k0s/manifests/gcp-ccm";

/// Mode of the uploaded manifest
pub const CCM_FILE_PERM: &str = "0600";

/// `k0s install` flags for workers when the external cloud provider is enabled
pub const WORKER_INSTALL_FLAGS: [&str; 2] = [
    "--enable-cloud-provider",
    "--kubelet-extra-args=--cloud-provider=external",
];

/// Input to a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRequest {
    /// Cluster name; the configured default when `None`
    pub name: Option<String>,

    /// Kubernetes version (e.g., "1.26.1")
    pub version: String,

    /// Hosts in document order
    pub hosts: Vec<HostDescriptor>,
}

impl ClusterRequest {
    /// Create a request with the default name
    pub fn new(version: impl Into<String>, hosts: Vec<HostDescriptor>) -> Self {
        Self {
            name: None,
            version: version.into(),
            hosts,
        }
    }

    /// Set the cluster name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::missing_field("version"));
        }
        if self.hosts.is_empty() {
            return Err(Error::NoHosts);
        }
        self.hosts.iter().try_for_each(HostDescriptor::validate)
    }
}

/// Resolved cloud-provider metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudProviderEnrichment {
    /// Upstream tag the manifest was taken from
    pub tag: String,

    /// Raw download URL of the manifest at `tag`
    pub manifest_url: String,
}

impl CloudProviderEnrichment {
    fn install_flags(&self) -> Vec<String> {
        WORKER_INSTALL_FLAGS.iter().map(|f| f.to_string()).collect()
    }

    fn files(&self) -> Vec<FileDirective> {
        vec![FileDirective {
            name: CCM_FILE_NAME.to_string(),
            src: self.manifest_url.clone(),
            dst_dir: CCM_DST_DIR.to_string(),
            perm: CCM_FILE_PERM.to_string(),
        }]
    }
}

/// Builds k0sctl cluster documents
#[derive(Debug, Clone)]
pub struct ClusterTopologyBuilder {
    /// Name used when the request has none
    default_name: String,

    /// GitHub API endpoint for tag resolution
    github: GitHubConfig,

    /// HTTP settings for tag resolution
    network: NetworkConfig,
}

impl ClusterTopologyBuilder {
    /// Create a builder from runtime configuration
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            default_name: config.cluster.name.clone(),
            github: config.github.clone(),
            network: config.network.clone(),
        }
    }

    /// Build the document and serialize it to YAML
    ///
    /// Enrichment runs only when `credential` is `Some`; without one no
    /// network request is made.
    pub async fn build(
        &self,
        request: &ClusterRequest,
        credential: Option<GitHubToken>,
    ) -> Result<String> {
        self.build_document(request, credential).await?.to_yaml()
    }

    /// Build the document, resolving enrichment against GitHub when a credential is given
    pub async fn build_document(
        &self,
        request: &ClusterRequest,
        credential: Option<GitHubToken>,
    ) -> Result<ClusterDocument> {
        match credential {
            Some(token) => {
                let resolver = TagResolver::new(
                    RepoCoordinate::new(CCM_REPO_OWNER, CCM_REPO_NAME),
                    token,
                    &self.github,
                    &self.network,
                )?;
                self.build_with_source(request, Some(&resolver as &dyn TagSource))
                    .await
            }
            None => self.build_with_source(request, None).await,
        }
    }

    /// Build the document with an explicit tag source
    pub async fn build_with_source(
        &self,
        request: &ClusterRequest,
        source: Option<&dyn TagSource>,
    ) -> Result<ClusterDocument> {
        request.validate()?;

        let enrichment = match source {
            Some(source) => resolve_enrichment(source, &request.version).await?,
            None => {
                debug!("No credential supplied, skipping cloud-provider enrichment");
                None
            }
        };

        Ok(self.assemble(request, enrichment.as_ref()))
    }

    /// Assemble the document from validated input
    pub fn assemble(
        &self,
        request: &ClusterRequest,
        enrichment: Option<&CloudProviderEnrichment>,
    ) -> ClusterDocument {
        let hosts = request
            .hosts
            .iter()
            .map(|host| host_node(host, enrichment))
            .collect();

        ClusterDocument {
            api_version: K0SCTL_API_VERSION.to_string(),
            kind: K0SCTL_KIND.to_string(),
            metadata: Metadata {
                name: request
                    .name
                    .clone()
                    .unwrap_or_else(|| self.default_name.clone()),
            },
            spec: ClusterSpec {
                hosts,
                k0s: K0sSpec::for_version(&request.version),
            },
        }
    }
}

/// Resolve the manifest tag and URL; `None` when no tag matches
pub async fn resolve_enrichment(
    source: &dyn TagSource,
    version: &str,
) -> Result<Option<CloudProviderEnrichment>> {
    let Some(tag) = source.match_tag(version).await? else {
        info!(
            "No cloud-provider release for Kubernetes {}, skipping enrichment",
            version
        );
        return Ok(None);
    };

    let manifest_url = source.download_url(CCM_MANIFEST_PATH, &tag).await?;
    info!("Using cloud-provider manifest {} ({})", manifest_url, tag);

    Ok(Some(CloudProviderEnrichment { tag, manifest_url }))
}

fn host_node(host: &HostDescriptor, enrichment: Option<&CloudProviderEnrichment>) -> HostNode {
    let (install_flags, files) = match (enrichment, &host.role) {
        (Some(e), HostRole::Worker) => (Some(e.install_flags()), None),
        (Some(e), HostRole::Controller) => (None, Some(e.files())),
        _ => (None, None),
    };

    HostNode {
        role: host.role.clone(),
        ssh: SshConnection {
            address: host.address.clone(),
            user: host.user.clone(),
            port: host.effective_port(),
            key_path: host.key_path.clone(),
        },
        install_flags,
        files,
    }
}
