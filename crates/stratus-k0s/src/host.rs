//! Host descriptors
//!
//! A host is one SSH-reachable machine that k0sctl will install k0s on.
//! Hosts come from `--host` flags or from an inventory file, see
//! [`crate::inventory`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default SSH port
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Role of a host in the cluster
///
/// Roles other than `controller` and `worker` (k0sctl also knows
/// `controller+worker` and `single`) are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HostRole {
    /// Control plane node
    Controller,
    /// Worker node
    Worker,
    /// Any other role string
    Other(String),
}

impl HostRole {
    /// Role name as written in the cluster document
    pub fn as_str(&self) -> &str {
        match self {
            HostRole::Controller => "controller",
            HostRole::Worker => "worker",
            HostRole::Other(role) => role,
        }
    }
}

impl From<String> for HostRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "controller" => HostRole::Controller,
            "worker" => HostRole::Worker,
            _ => HostRole::Other(role),
        }
    }
}

impl From<HostRole> for String {
    fn from(role: HostRole) -> Self {
        match role {
            HostRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for HostRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(HostRole::from(s.to_string()))
    }
}

impl fmt::Display for HostRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cluster node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDescriptor {
    /// Reachable host name or IP
    pub address: String,

    /// SSH login
    pub user: String,

    /// SSH port, 22 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Path to the private key
    #[serde(alias = "key_path", alias = "key")]
    pub key_path: String,

    /// Cluster role
    pub role: HostRole,
}

impl HostDescriptor {
    /// Create a host with the default SSH port
    pub fn new(
        role: HostRole,
        address: impl Into<String>,
        user: impl Into<String>,
        key_path: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            user: user.into(),
            port: None,
            key_path: key_path.into(),
            role,
        }
    }

    /// Set an explicit SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// SSH port with the default applied
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SSH_PORT)
    }

    /// Check that address, user and key path are present
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(Error::invalid_host(
                format!("<{}>", self.role),
                "address is empty",
            ));
        }

        let label = self.address.as_str();
        if self.user.trim().is_empty() {
            return Err(Error::invalid_host(label, "user is empty"));
        }
        if self.key_path.trim().is_empty() {
            return Err(Error::invalid_host(label, "key path is empty"));
        }
        if self.role.as_str().is_empty() {
            return Err(Error::invalid_host(label, "role is empty"));
        }

        Ok(())
    }
}

/// Parse the `--host` flag form
///
/// `role=controller,address=10.0.0.1,user=ubuntu,port=22,key=~/.ssh/id_ed25519`.
/// `port` is optional; `key-path`/`keyPath` are accepted for `key`.
impl FromStr for HostDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut role = None;
        let mut address = None;
        let mut user = None;
        let mut port = None;
        let mut key_path = None;

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                Error::invalid_host(s, format!("expected key=value, got '{}'", pair))
            })?;
            let value = value.trim().to_string();

            match key.trim() {
                "role" => role = Some(HostRole::from(value)),
                "address" | "addr" => address = Some(value),
                "user" => user = Some(value),
                "port" => {
                    port = Some(value.parse::<u16>().map_err(|_| {
                        Error::invalid_host(s, format!("invalid port '{}'", value))
                    })?)
                }
                "key" | "key-path" | "keyPath" => key_path = Some(value),
                other => {
                    return Err(Error::invalid_host(s, format!("unknown field '{}'", other)));
                }
            }
        }

        let host = HostDescriptor {
            address: address.ok_or_else(|| Error::invalid_host(s, "missing address"))?,
            user: user.ok_or_else(|| Error::invalid_host(s, "missing user"))?,
            port,
            key_path: key_path.ok_or_else(|| Error::invalid_host(s, "missing key"))?,
            role: role.ok_or_else(|| Error::invalid_host(s, "missing role"))?,
        };
        host.validate()?;

        Ok(host)
    }
}
