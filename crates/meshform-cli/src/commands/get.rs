//! Get command - fetch one resource and print it

use clap::ValueEnum;
use meshform_core::{CrdKind, ResourceId};
use meshform_kube::{ApiClient, DataSource};

use crate::commands::{dispatch_kind, lookup_kind};
use crate::error::{CliError, Result};

/// Output format for fetched resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Run the get command
pub async fn run(kind: &str, identifier: &str, output: OutputFormat) -> Result<()> {
    let ty = lookup_kind(kind)?;
    let id = parse_id(identifier)?;

    let client = ApiClient::try_default()
        .await
        .map_err(|e| CliError::from_kube("connect", e))?;

    let text = dispatch_kind!(ty, async get_typed(&client, &id, output))?;
    print!("{}", text);
    Ok(())
}

async fn get_typed<K: CrdKind>(
    client: &ApiClient,
    id: &ResourceId,
    output: OutputFormat,
) -> Result<String> {
    let model = DataSource::<K, _>::new(client)
        .read(id)
        .await
        .map_err(|e| CliError::from_kube("read", e))?;
    let doc = model.to_document();

    match output {
        OutputFormat::Yaml => meshform_core::manifest::render_document(&doc)
            .map_err(|e| CliError::internal(e.to_string())),
        OutputFormat::Json => serde_json::to_string_pretty(&doc)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::internal(e.to_string())),
    }
}

pub(crate) fn parse_id(identifier: &str) -> Result<ResourceId> {
    ResourceId::parse(identifier).map_err(|e| {
        CliError::validation_with_help(e.to_string(), "identifiers take the form namespace/name")
    })
}
