//! Render command - produce the canonical manifest for a resource document

use std::fs;
use std::path::Path;

use console::style;
use meshform_core::{manifest, CrdKind, ResourceDocument, ResourceModel};

use crate::commands::{dispatch_kind, load_document};
use crate::error::{CliError, Result};

/// Run the render command
pub fn run(file: &Path, output: Option<&Path>) -> Result<()> {
    let (ty, value) = load_document(file)?;
    let yaml = dispatch_kind!(ty, render_typed(&value))?;

    match output {
        Some(path) => {
            fs::write(path, &yaml)
                .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))?;
            println!(
                "{} Rendered {} manifest to {}",
                style("✓").green().bold(),
                style(ty.kind).cyan(),
                path.display()
            );
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

fn render_typed<K: CrdKind>(value: &serde_json::Value) -> Result<String> {
    K::schema()
        .check(value)
        .map_err(|e| CliError::validation(e.to_string()))?;
    let doc: ResourceDocument<K::Spec> = serde_json::from_value(value.clone())
        .map_err(|e| CliError::validation(format!("not a valid {} document: {}", K::KIND, e)))?;
    let model = ResourceModel::<K>::from_document(doc);
    manifest::render(&model).map_err(|e| CliError::validation(e.to_string()))
}
