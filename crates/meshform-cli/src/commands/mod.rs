//! CLI commands

pub mod apply;
pub mod delete;
pub mod get;
pub mod import;
pub mod render;

use std::path::Path;

use meshform_core::{lookup, ResourceType};

use crate::error::{CliError, Result};

/// Read a YAML document from disk and resolve its kind against the registry
pub(crate) fn load_document(path: &Path) -> Result<(ResourceType, serde_json::Value)> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .map_err(|e| CliError::validation(format!("invalid YAML in {}: {}", path.display(), e)))?;

    let kind = value
        .get("kind")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            CliError::validation_with_help(
                format!("{} has no `kind` field", path.display()),
                "a resource document needs apiVersion, kind, metadata and spec",
            )
        })?;
    let ty = lookup(kind).map_err(|e| CliError::validation(e.to_string()))?;
    Ok((ty, value))
}

/// Resolve a kind argument against the registry
pub(crate) fn lookup_kind(kind: &str) -> Result<ResourceType> {
    lookup(kind).map_err(|e| {
        CliError::validation_with_help(
            e.to_string(),
            "known kinds: Gateway, DestinationRule, VirtualService, ServiceEntry, \
             Sidecar, WorkloadEntry, EnvoyFilter",
        )
    })
}

/// Instantiate a generic function for the kind a [`ResourceType`] names
macro_rules! dispatch_kind {
    ($ty:expr, async $f:ident($($arg:expr),* $(,)?)) => {
        match $ty.kind {
            "Gateway" => $f::<meshform_core::kinds::Gateway>($($arg),*).await,
            "DestinationRule" => $f::<meshform_core::kinds::DestinationRule>($($arg),*).await,
            "VirtualService" => $f::<meshform_core::kinds::VirtualService>($($arg),*).await,
            "ServiceEntry" => $f::<meshform_core::kinds::ServiceEntry>($($arg),*).await,
            "Sidecar" => $f::<meshform_core::kinds::Sidecar>($($arg),*).await,
            "WorkloadEntry" => $f::<meshform_core::kinds::WorkloadEntry>($($arg),*).await,
            "EnvoyFilter" => $f::<meshform_core::kinds::EnvoyFilter>($($arg),*).await,
            other => Err($crate::error::CliError::internal(format!(
                "kind {} is registered but not dispatched",
                other
            ))),
        }
    };
    ($ty:expr, $f:ident($($arg:expr),* $(,)?)) => {
        match $ty.kind {
            "Gateway" => $f::<meshform_core::kinds::Gateway>($($arg),*),
            "DestinationRule" => $f::<meshform_core::kinds::DestinationRule>($($arg),*),
            "VirtualService" => $f::<meshform_core::kinds::VirtualService>($($arg),*),
            "ServiceEntry" => $f::<meshform_core::kinds::ServiceEntry>($($arg),*),
            "Sidecar" => $f::<meshform_core::kinds::Sidecar>($($arg),*),
            "WorkloadEntry" => $f::<meshform_core::kinds::WorkloadEntry>($($arg),*),
            "EnvoyFilter" => $f::<meshform_core::kinds::EnvoyFilter>($($arg),*),
            other => Err($crate::error::CliError::internal(format!(
                "kind {} is registered but not dispatched",
                other
            ))),
        }
    };
}

pub(crate) use dispatch_kind;
