//! ServiceEntry (networking.istio.io/v1)

use serde::{Deserialize, Serialize};

use super::common::{Port, WorkloadSelector};
use super::workload_entry::{workload_entry_attributes, WorkloadEntrySpec};
use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the ServiceEntry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry;

impl CrdKind for ServiceEntry {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "ServiceEntry";
    const PLURAL: &'static str = "serviceentries";

    type Spec = ServiceEntrySpec;

    fn schema() -> Schema {
        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::string_list("hosts").required(),
                Attribute::string_list("addresses"),
                Attribute::object_list(
                    "ports",
                    vec![
                        Attribute::int("number"),
                        Attribute::string("protocol"),
                        Attribute::string("name"),
                        Attribute::int("target_port"),
                    ],
                ),
                Attribute::string("location").one_of(&["MESH_EXTERNAL", "MESH_INTERNAL"]),
                Attribute::string("resolution")
                    .one_of(&["NONE", "STATIC", "DNS", "DNS_ROUND_ROBIN"]),
                // Endpoints are inline workload entries
                Attribute::object_list("endpoints", workload_entry_attributes()),
                Attribute::object(
                    "workload_selector",
                    vec![Attribute::string_map("labels")],
                ),
                Attribute::string_list("export_to"),
                Attribute::string_list("subject_alt_names"),
            ],
        ));
        Schema::new("meshform_networking_service_entry_v1", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntrySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<Port>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ServiceLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<WorkloadEntrySpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_selector: Option<WorkloadSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_to: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_alt_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceLocation {
    MeshExternal,
    MeshInternal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    None,
    Static,
    Dns,
    DnsRoundRobin,
}
