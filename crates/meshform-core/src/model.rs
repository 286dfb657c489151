//! Typed resource models and the wire document they serialize to
//!
//! A [`ResourceModel`] is the local, plan-side view of one managed resource:
//! identity, metadata, optional spec tree, and per-instance apply overrides.
//! [`ResourceDocument`] is the exact JSON/YAML shape exchanged with the
//! Kubernetes API. Converting a model to a document always stamps the
//! kind's canonical `apiVersion`/`kind`; those fields are not user-settable.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::identity::ResourceId;
use crate::metadata::Metadata;
use crate::registry::ResourceType;
use crate::schema::Schema;

/// Per-kind constants and spec type for a managed CRD
///
/// Implementors are zero-sized markers, one per resource kind.
pub trait CrdKind {
    const GROUP: &'static str;
    const VERSION: &'static str;
    const KIND: &'static str;
    const PLURAL: &'static str;

    /// Typed spec tree mirroring the CRD's OpenAPI schema; every field
    /// optional, absence distinct from default.
    type Spec: Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq;

    fn api_version() -> String {
        format!("{}/{}", Self::GROUP, Self::VERSION)
    }

    fn resource_type() -> ResourceType {
        ResourceType {
            group: Self::GROUP,
            version: Self::VERSION,
            kind: Self::KIND,
            plural: Self::PLURAL,
        }
    }

    /// Static attribute table for this kind
    fn schema() -> Schema;
}

/// Wire shape of a resource record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument<S> {
    pub api_version: String,

    pub kind: String,

    pub metadata: Metadata,

    // No `#[serde(default)]` here: it would force `S: Default` onto every
    // generic deserialization site; a missing `spec` is `None` regardless.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

/// Local model of one managed resource instance
#[derive(Debug, PartialEq)]
pub struct ResourceModel<K: CrdKind> {
    /// Composite `namespace/name` id, set once the resource exists
    pub id: Option<ResourceId>,

    pub metadata: Metadata,

    pub spec: Option<K::Spec>,

    /// Overrides the provider-level field manager for this instance only
    pub field_manager: Option<String>,

    /// Overrides the provider-level force-conflicts flag for this instance only
    pub force_conflicts: Option<bool>,

    _kind: PhantomData<K>,
}

// A derived Clone would demand `K: Clone` through the phantom field, which
// handler code bounded only on `K: CrdKind` cannot provide.
impl<K: CrdKind> Clone for ResourceModel<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            metadata: self.metadata.clone(),
            spec: self.spec.clone(),
            field_manager: self.field_manager.clone(),
            force_conflicts: self.force_conflicts,
            _kind: PhantomData,
        }
    }
}

impl<K: CrdKind> ResourceModel<K> {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            id: None,
            metadata,
            spec: None,
            field_manager: None,
            force_conflicts: None,
            _kind: PhantomData,
        }
    }

    pub fn with_spec(metadata: Metadata, spec: K::Spec) -> Self {
        let mut model = Self::new(metadata);
        model.spec = Some(spec);
        model
    }

    /// Seed a model from an import identifier without contacting the API
    ///
    /// Sets `id`, `metadata.name`, and `metadata.namespace`; everything else
    /// stays empty until the first Read.
    pub fn imported(id: ResourceId) -> Self {
        let metadata = Metadata::new(id.namespace(), id.name());
        let mut model = Self::new(metadata);
        model.id = Some(id);
        model
    }

    /// Build the outgoing wire document, stamping the canonical
    /// `apiVersion`/`kind` regardless of anything the caller supplied
    pub fn to_document(&self) -> ResourceDocument<K::Spec> {
        ResourceDocument {
            api_version: K::api_version(),
            kind: K::KIND.to_string(),
            metadata: self.metadata.clone(),
            spec: self.spec.clone(),
        }
    }

    /// Adopt a document's metadata and spec, discarding its type fields
    pub fn from_document(doc: ResourceDocument<K::Spec>) -> Self {
        let mut model = Self::new(doc.metadata);
        model.spec = doc.spec;
        model
    }

    /// Overwrite local metadata and spec with server-returned state
    ///
    /// The server is authoritative for defaulted and computed fields after
    /// every mutating call.
    pub fn merge_remote(&mut self, doc: ResourceDocument<K::Spec>) {
        self.metadata = doc.metadata;
        self.spec = doc.spec;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{Gateway, GatewaySpec, Server};

    fn gateway_model() -> ResourceModel<Gateway> {
        let spec = GatewaySpec {
            selector: Some([("istio".to_string(), "ingressgateway".to_string())].into()),
            servers: Some(vec![Server {
                hosts: Some(vec!["*.example.com".to_string()]),
                ..Default::default()
            }]),
        };
        ResourceModel::with_spec(Metadata::new("istio-system", "ingress"), spec)
    }

    #[test]
    fn test_to_document_stamps_type_constants() {
        let doc = gateway_model().to_document();
        assert_eq!(doc.api_version, "networking.istio.io/v1");
        assert_eq!(doc.kind, "Gateway");
    }

    #[test]
    fn test_user_supplied_type_fields_are_discarded() {
        // A document parsed from user input may carry arbitrary type fields;
        // round-tripping through the model replaces them with the canonical
        // constants.
        let yaml = "apiVersion: bogus/v9\nkind: NotAGateway\nmetadata:\n  name: gw\n  namespace: default\n";
        let doc: ResourceDocument<GatewaySpec> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.api_version, "bogus/v9");

        let stamped = ResourceModel::<Gateway>::from_document(doc).to_document();
        assert_eq!(stamped.api_version, "networking.istio.io/v1");
        assert_eq!(stamped.kind, "Gateway");
    }

    #[test]
    fn test_json_roundtrip_loses_nothing() {
        let model = gateway_model();
        let doc = model.to_document();

        let json = serde_json::to_string(&doc).unwrap();
        let back: ResourceDocument<GatewaySpec> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, doc);
    }

    #[test]
    fn test_absent_spec_is_omitted_from_wire() {
        let model: ResourceModel<Gateway> = ResourceModel::new(Metadata::new("default", "gw"));
        let json = serde_json::to_value(model.to_document()).unwrap();
        assert!(json.get("spec").is_none());
    }

    #[test]
    fn test_clone_is_available_under_the_kind_bound_alone() {
        // Handler code only knows `K: CrdKind`; cloning must not require
        // `K: Clone` or it silently resolves to cloning the reference.
        fn duplicate<K: CrdKind>(model: &ResourceModel<K>) -> ResourceModel<K> {
            model.clone()
        }

        let model = gateway_model();
        let copy = duplicate(&model);
        assert_eq!(copy, model);
    }

    #[test]
    fn test_document_decodes_under_the_spec_bound_alone() {
        // Generic decode paths rely on exactly the `CrdKind::Spec` bounds;
        // the document must not demand more (e.g. `Default`).
        fn parse<K: CrdKind>(value: serde_json::Value) -> ResourceDocument<K::Spec> {
            serde_json::from_value(value).unwrap()
        }

        let doc = parse::<Gateway>(serde_json::json!({
            "apiVersion": "networking.istio.io/v1",
            "kind": "Gateway",
            "metadata": { "name": "gw", "namespace": "default" }
        }));
        assert!(doc.spec.is_none());
    }

    #[test]
    fn test_imported_seeds_identity_only() {
        let id = ResourceId::parse("istio-system/ingress").unwrap();
        let model: ResourceModel<Gateway> = ResourceModel::imported(id.clone());

        assert_eq!(model.id, Some(id));
        assert_eq!(model.metadata.namespace, "istio-system");
        assert_eq!(model.metadata.name, "ingress");
        assert!(model.spec.is_none());
    }

    #[test]
    fn test_merge_remote_overwrites_local_state() {
        let mut model = gateway_model();

        let mut remote_meta = Metadata::new("istio-system", "ingress");
        remote_meta
            .labels
            .insert("server-added".to_string(), "true".to_string());
        let remote = ResourceDocument {
            api_version: Gateway::api_version(),
            kind: Gateway::KIND.to_string(),
            metadata: remote_meta,
            spec: None,
        };

        model.merge_remote(remote);
        assert_eq!(model.metadata.labels.get("server-added").map(String::as_str), Some("true"));
        assert!(model.spec.is_none());
    }
}
