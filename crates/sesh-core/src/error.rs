//! Error types for the Sesh engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the discovery and engagement core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SeshError {
    /// Caller error: a malformed identifier or parameter. No side effect
    /// has occurred when this is returned.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Data access error (store/registry layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// An external collaborator (push provider, session store) is
    /// transiently unreachable.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SeshError {
    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an Upstream error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<std::io::Error> for SeshError {
    fn from(err: std::io::Error) -> Self {
        Self::DataAccess(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for SeshError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SeshError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SeshError>`.
pub type Result<T> = std::result::Result<T, SeshError>;
