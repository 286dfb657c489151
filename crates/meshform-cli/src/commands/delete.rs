//! Delete command - remove a resource from the cluster

use console::style;
use meshform_core::{CrdKind, ResourceId, ResourceModel};
use meshform_kube::{ApiClient, ProviderConfig, ResourceHandler};

use crate::commands::{dispatch_kind, lookup_kind};
use crate::error::{CliError, Result};

/// Run the delete command
pub async fn run(kind: &str, identifier: &str) -> Result<()> {
    let ty = lookup_kind(kind)?;
    let id = super::get::parse_id(identifier)?;

    let client = ApiClient::try_default()
        .await
        .map_err(|e| CliError::from_kube("connect", e))?;

    dispatch_kind!(ty, async delete_typed(&client, &id))?;
    println!(
        "{} Deleted {} {}",
        style("✓").green().bold(),
        style(ty.kind).cyan(),
        style(identifier).yellow()
    );
    Ok(())
}

async fn delete_typed<K: CrdKind>(client: &ApiClient, id: &ResourceId) -> Result<()> {
    let config = ProviderConfig::default();
    let model = ResourceModel::<K>::imported(id.clone());
    ResourceHandler::<K, _>::new(client, &config)
        .delete(&model)
        .await
        .map_err(|e| CliError::from_kube("delete", e))
}
