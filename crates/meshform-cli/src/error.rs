//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use thiserror::Error;

use meshform_kube::diagnostics::{self, DiagnosticClass};
use meshform_kube::KubeError;

use crate::exit_codes;

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Input document or identifier was rejected before any API call
    #[error("Validation failed: {message}")]
    #[diagnostic(code(meshform::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The resource does not exist on the cluster
    #[error("{message}")]
    #[diagnostic(code(meshform::cli::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The API server rejected the request
    #[error("{message}")]
    #[diagnostic(code(meshform::cli::api))]
    Api { message: String },

    /// An API response could not be decoded
    #[error("{message}")]
    #[diagnostic(code(meshform::cli::serialization))]
    Serialization { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(meshform::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(meshform::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND_ERROR,
            CliError::Api { .. } => exit_codes::API_ERROR,
            CliError::Serialization { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: None,
        }
    }

    /// Create a validation error with help text
    pub fn validation_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a cluster error through the diagnostics classifier
    pub fn from_kube(operation: &str, err: KubeError) -> Self {
        let diag = diagnostics::classify(operation, &err);
        match diag.class {
            DiagnosticClass::NotFound => CliError::NotFound {
                message: diag.summary,
                help: Some(diag.detail),
            },
            DiagnosticClass::Api => CliError::Api {
                message: format!("{}: {}", diag.summary, diag.detail),
            },
            DiagnosticClass::Serialization => CliError::Serialization {
                message: format!("{}: {}", diag.summary, diag.detail),
            },
            DiagnosticClass::Validation => CliError::Validation {
                message: diag.detail,
                help: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_stable_per_class() {
        assert_eq!(CliError::validation("x").exit_code(), 2);
        assert_eq!(
            CliError::NotFound {
                message: "x".to_string(),
                help: None
            }
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::Api {
                message: "x".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(CliError::io("x").exit_code(), 5);
        assert_eq!(CliError::internal("x").exit_code(), 1);
    }

    #[test]
    fn test_not_found_maps_to_not_found_error() {
        let err = KubeError::NotFound {
            kind: "Gateway".to_string(),
            id: "istio-system/ingress".to_string(),
        };
        let cli = CliError::from_kube("read", err);
        assert!(matches!(cli, CliError::NotFound { .. }));
        assert_eq!(cli.exit_code(), exit_codes::NOT_FOUND_ERROR);
    }

    #[test]
    fn test_core_validation_maps_to_validation_error() {
        let err = KubeError::Validation(meshform_core::CoreError::MissingField {
            field: "metadata.name".to_string(),
        });
        let cli = CliError::from_kube("apply", err);
        assert_eq!(cli.exit_code(), exit_codes::VALIDATION_ERROR);
    }
}
