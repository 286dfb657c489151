//! Error types for meshform-kube

use thiserror::Error;

/// Result type for meshform-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur during Kubernetes operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Resource does not exist on the cluster
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    /// Serialization error (always a provider bug, never user input)
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration or missing precondition
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pre-flight validation failure from the core model layer
    #[error(transparent)]
    Validation(#[from] meshform_core::CoreError),
}

impl From<serde_json::Error> for KubeError {
    fn from(e: serde_json::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for KubeError {
    fn from(e: serde_yaml::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl KubeError {
    /// Check whether this error means the resource does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            KubeError::NotFound { .. } => true,
            KubeError::Api(kube::Error::Api(resp)) => resp.code == 404,
            _ => false,
        }
    }

    /// Check if this is a field-ownership conflict (409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, KubeError::Api(kube::Error::Api(resp)) if resp.code == 409)
    }
}
