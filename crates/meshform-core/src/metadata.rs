//! Object metadata carried by every managed resource

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::{validate_name, validate_namespace, ResourceId};

/// Metadata block of a resource record
///
/// Labels and annotations are `BTreeMap`s so serialized output has a stable
/// key order regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,

    pub namespace: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Validate name and namespace formats before any API call
    pub fn validate(&self) -> Result<()> {
        validate_namespace(&self.namespace)?;
        validate_name(&self.name)?;
        Ok(())
    }

    /// The composite `namespace/name` identity of this resource
    pub fn id(&self) -> Result<ResourceId> {
        ResourceId::new(&self.namespace, &self.name)
    }
}
