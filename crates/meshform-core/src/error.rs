//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid resource identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    #[error("invalid {field}: {message}")]
    InvalidName { field: String, message: String },

    #[error("unknown resource kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
