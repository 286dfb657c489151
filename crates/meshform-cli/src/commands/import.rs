//! Import command - seed local state from a `namespace/name` identifier
//!
//! Pure parsing, no API call; pair with `get` to inspect the live object.

use console::style;
use meshform_core::CrdKind;
use meshform_kube::{ApiClient, ResourceHandler};

use crate::commands::{dispatch_kind, lookup_kind};
use crate::error::{CliError, Result};

/// Run the import command
pub fn run(kind: &str, identifier: &str) -> Result<()> {
    let ty = lookup_kind(kind)?;
    let (namespace, name) = dispatch_kind!(ty, import_typed(identifier))?;

    println!(
        "{} Imported {} {}",
        style("✓").green().bold(),
        style(ty.kind).cyan(),
        style(identifier).yellow()
    );
    println!("  namespace: {}", namespace);
    println!("  name: {}", name);
    Ok(())
}

fn import_typed<K: CrdKind>(identifier: &str) -> Result<(String, String)> {
    let model = ResourceHandler::<K, ApiClient>::import(identifier).map_err(|e| {
        CliError::validation_with_help(
            e.to_string(),
            "import identifiers take the form namespace/name",
        )
    })?;
    Ok((model.metadata.namespace, model.metadata.name))
}
