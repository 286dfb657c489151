//! Apply command - create or update a resource via server-side apply

use std::path::Path;

use console::style;
use meshform_core::{CrdKind, ResourceDocument, ResourceModel};
use meshform_kube::{ApiClient, ProviderConfig, ResourceHandler, DEFAULT_FIELD_MANAGER};

use crate::commands::{dispatch_kind, load_document};
use crate::error::{CliError, Result};

/// Run the apply command
pub async fn run(file: &Path, field_manager: Option<String>, force_conflicts: bool) -> Result<()> {
    let (ty, value) = load_document(file)?;

    let client = ApiClient::try_default()
        .await
        .map_err(|e| CliError::from_kube("connect", e))?;
    let config = ProviderConfig {
        field_manager: field_manager.unwrap_or_else(|| DEFAULT_FIELD_MANAGER.to_string()),
        force_conflicts,
    };

    let id = dispatch_kind!(ty, async apply_typed(&client, &config, &value))?;
    println!(
        "{} Applied {} {}",
        style("✓").green().bold(),
        style(ty.kind).cyan(),
        style(&id).yellow()
    );
    Ok(())
}

async fn apply_typed<K: CrdKind>(
    client: &ApiClient,
    config: &ProviderConfig,
    value: &serde_json::Value,
) -> Result<String> {
    K::schema()
        .check(value)
        .map_err(|e| CliError::validation(e.to_string()))?;
    let doc: ResourceDocument<K::Spec> = serde_json::from_value(value.clone())
        .map_err(|e| CliError::validation(format!("not a valid {} document: {}", K::KIND, e)))?;
    let model = ResourceModel::<K>::from_document(doc);

    let applied = ResourceHandler::<K, _>::new(client, config)
        .apply(&model)
        .await
        .map_err(|e| CliError::from_kube("apply", e))?;
    Ok(applied
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<unknown>".to_string()))
}
