//! Error types for stratus-k0s

use thiserror::Error;

/// Result type alias using stratus-k0s's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Cluster document generation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Tag or content resolution failed; carried through unchanged
    #[error(transparent)]
    Resolve(#[from] stratus_github::Error),

    /// Host descriptor failed validation or could not be parsed
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// Empty host list
    #[error("A cluster needs at least one host")]
    NoHosts,

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Inventory file has none of the accepted shapes
    #[error("Invalid inventory {path}: {message}")]
    InvalidInventory { path: String, message: String },

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid host error
    pub fn invalid_host(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHost {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid inventory error
    pub fn invalid_inventory(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInventory {
            path: path.into(),
            message: message.into(),
        }
    }
}
