//! WorkloadEntry (networking.istio.io/v1)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the WorkloadEntry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadEntry;

impl CrdKind for WorkloadEntry {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "WorkloadEntry";
    const PLURAL: &'static str = "workloadentries";

    type Spec = WorkloadEntrySpec;

    fn schema() -> Schema {
        let mut attrs = common_attributes();
        attrs.push(Attribute::object("spec", workload_entry_attributes()));
        Schema::new("meshform_networking_workload_entry_v1", attrs)
    }
}

/// Attribute block for a workload entry spec
///
/// Shared with ServiceEntry, whose `endpoints` are inline workload entries.
pub(crate) fn workload_entry_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("address").describe("Address of the endpoint (IP or DNS name)"),
        Attribute::int_map("ports").describe("Port name to workload port number"),
        Attribute::string_map("labels"),
        Attribute::string("network"),
        Attribute::string("locality").describe("region/zone/subzone"),
        Attribute::int("weight"),
        Attribute::string("service_account"),
    ]
}

/// Spec of a non-Kubernetes workload joined to the mesh
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadEntrySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Port name to workload port number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<BTreeMap<String, u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
}
