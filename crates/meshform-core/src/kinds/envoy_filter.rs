//! EnvoyFilter (networking.istio.io/v1alpha3)
//!
//! Patch values and object matchers are free-form Envoy configuration, kept
//! as raw JSON values rather than typed trees.

use serde::{Deserialize, Serialize};

use super::common::WorkloadSelector;
use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the EnvoyFilter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvoyFilter;

impl CrdKind for EnvoyFilter {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1alpha3";
    const KIND: &'static str = "EnvoyFilter";
    const PLURAL: &'static str = "envoyfilters";

    type Spec = EnvoyFilterSpec;

    fn schema() -> Schema {
        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::object(
                    "workload_selector",
                    vec![Attribute::string_map("labels")],
                ),
                Attribute::object_list(
                    "config_patches",
                    vec![
                        Attribute::string("apply_to").one_of(&[
                            "LISTENER",
                            "FILTER_CHAIN",
                            "NETWORK_FILTER",
                            "HTTP_FILTER",
                            "ROUTE_CONFIGURATION",
                            "VIRTUAL_HOST",
                            "HTTP_ROUTE",
                            "CLUSTER",
                            "EXTENSION_CONFIG",
                            "BOOTSTRAP",
                        ]),
                        Attribute::object(
                            "match",
                            vec![
                                Attribute::string("context").one_of(&[
                                    "ANY",
                                    "SIDECAR_INBOUND",
                                    "SIDECAR_OUTBOUND",
                                    "GATEWAY",
                                ]),
                                Attribute::dynamic("listener"),
                                Attribute::dynamic("route_configuration"),
                                Attribute::dynamic("cluster"),
                            ],
                        ),
                        Attribute::object(
                            "patch",
                            vec![
                                Attribute::string("operation").one_of(&[
                                    "MERGE",
                                    "ADD",
                                    "REMOVE",
                                    "INSERT_BEFORE",
                                    "INSERT_AFTER",
                                    "INSERT_FIRST",
                                    "REPLACE",
                                ]),
                                Attribute::dynamic("value")
                                    .describe("Free-form Envoy configuration fragment"),
                            ],
                        ),
                    ],
                ),
                Attribute::int("priority"),
            ],
        ));
        Schema::new("meshform_networking_envoy_filter_v1alpha3", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvoyFilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_selector: Option<WorkloadSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_patches: Option<Vec<ConfigPatch>>,

    /// Patches with the same priority are applied in creation-time order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<ApplyTo>,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<ObjectMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<EnvoyPatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyTo {
    Listener,
    FilterChain,
    NetworkFilter,
    HttpFilter,
    RouteConfiguration,
    VirtualHost,
    HttpRoute,
    Cluster,
    ExtensionConfig,
    Bootstrap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PatchContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_configuration: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchContext {
    Any,
    SidecarInbound,
    SidecarOutbound,
    Gateway,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvoyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<PatchOperation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchOperation {
    Merge,
    Add,
    Remove,
    InsertBefore,
    InsertAfter,
    InsertFirst,
    Replace,
}
