//! k0sctl cluster document model
//!
//! The document is a plain record tree assembled in one pass by
//! [`crate::ClusterTopologyBuilder`] and serialized at the end. Field order
//! in the structs is the key order in the emitted YAML.

use crate::error::Result;
use crate::host::HostRole;
use serde::{Deserialize, Serialize};

/// k0sctl configuration schema version
pub const K0SCTL_API_VERSION: &str = "k0sctl.k0sproject.io/v1beta1";

/// k0sctl document kind
pub const K0SCTL_KIND: &str = "Cluster";

/// Build suffix appended to the requested Kubernetes version
pub const K0S_VERSION_SUFFIX: &str = "+k0s.0";

/// Complete k0sctl cluster definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: ClusterSpec,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Cluster name
    pub name: String,
}

/// Cluster topology and engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    /// Hosts in input order
    pub hosts: Vec<HostNode>,

    /// k0s engine block
    pub k0s: K0sSpec,
}

/// One host entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNode {
    pub role: HostRole,

    pub ssh: SshConnection,

    /// Extra `k0s install` flags, workers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_flags: Option<Vec<String>>,

    /// Files uploaded before install, controllers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDirective>>,
}

/// SSH connection parameters for a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshConnection {
    pub address: String,
    pub user: String,
    pub port: u16,
    pub key_path: String,
}

/// k0sctl file upload directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDirective {
    /// Logical name shown in k0sctl output
    pub name: String,

    /// Source path or URL
    pub src: String,

    /// Destination directory on the host
    pub dst_dir: String,

    /// File mode, octal string
    pub perm: String,
}

/// k0s engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct K0sSpec {
    /// k0s release, `<kubernetes version>+k0s.0`
    pub version: String,

    /// Store cluster config in the API instead of on disk
    pub dynamic_config: bool,
}

impl K0sSpec {
    /// Engine block for a Kubernetes version
    pub fn for_version(version: &str) -> Self {
        Self {
            version: format!("{}{}", version, K0S_VERSION_SUFFIX),
            dynamic_config: true,
        }
    }
}

impl ClusterDocument {
    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse a previously generated document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }
}
