//! Local manifest rendering
//!
//! Turns a typed model into a Kubernetes YAML manifest without any cluster
//! access, for GitOps-style generation. Rendering is deterministic: struct
//! fields serialize in declaration order and maps are `BTreeMap`s, so the
//! same model always yields byte-identical output.
//!
//! Serialization goes through `singleton_map_recursive` so matcher enums
//! come out as plain single-key maps (`uri: {prefix: /api}`), the shape the
//! Kubernetes API accepts, instead of serde_yaml's `!prefix` tags.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::model::{CrdKind, ResourceDocument, ResourceModel};

/// Render a model as a single-document YAML manifest
///
/// Stamps the kind's canonical `apiVersion`/`kind` and validates metadata
/// before serializing.
pub fn render<K: CrdKind>(model: &ResourceModel<K>) -> Result<String> {
    model.metadata.validate()?;
    render_document(&model.to_document())
}

/// Render an already-stamped wire document
pub fn render_document<S: Serialize>(doc: &ResourceDocument<S>) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_yaml::Serializer::new(&mut out);
    serde_yaml::with::singleton_map_recursive::serialize(doc, &mut serializer)?;
    drop(serializer);
    // The emitter only produces UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Parse a manifest in the same shape [`render`] produces
pub fn parse_document<S: DeserializeOwned>(yaml: &str) -> Result<ResourceDocument<S>> {
    let de = serde_yaml::Deserializer::from_str(yaml);
    Ok(serde_yaml::with::singleton_map_recursive::deserialize(de)?)
}
