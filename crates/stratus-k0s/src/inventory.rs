//! Host inventory files
//!
//! Hosts can be read from a YAML or JSON file (JSON is parsed as YAML). Three
//! shapes are accepted:
//!
//! ```yaml
//! # plain list
//! - { role: controller, address: 10.0.0.1, user: root, keyPath: /k/id }
//!
//! # object with a hosts key
//! hosts:
//!   - { role: worker, address: 10.0.0.2, user: root, keyPath: /k/id }
//!
//! # provisioning output envelope (`terraform output -json`)
//! hosts:
//!   sensitive: false
//!   value:
//!     - { role: worker, address: 10.0.0.3, user: root, keyPath: /k/id }
//! ```

use crate::error::{Error, Result};
use crate::host::HostDescriptor;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Inventory {
    List(Vec<HostDescriptor>),
    Object { hosts: HostsField },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostsField {
    List(Vec<HostDescriptor>),
    Output { value: Vec<HostDescriptor> },
}

impl Inventory {
    fn into_hosts(self) -> Vec<HostDescriptor> {
        match self {
            Inventory::List(hosts)
            | Inventory::Object {
                hosts: HostsField::List(hosts),
            }
            | Inventory::Object {
                hosts: HostsField::Output { value: hosts },
            } => hosts,
        }
    }
}

/// Parse inventory content; `origin` names the source in errors
pub fn parse_inventory(content: &str, origin: &str) -> Result<Vec<HostDescriptor>> {
    let inventory: Inventory = serde_yaml_ng::from_str(content).map_err(|e| {
        Error::invalid_inventory(
            origin,
            format!("expected a host list or an object with 'hosts': {}", e),
        )
    })?;

    let hosts = inventory.into_hosts();
    for host in &hosts {
        host.validate()?;
    }

    debug!("Loaded {} hosts from {}", hosts.len(), origin);
    Ok(hosts)
}

/// Load hosts from an inventory file
pub fn load_inventory(path: impl AsRef<Path>) -> Result<Vec<HostDescriptor>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_inventory(&content, &path.display().to_string())
}
