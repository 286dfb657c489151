//! Sidecar (networking.istio.io/v1)

use serde::{Deserialize, Serialize};

use super::common::{CaptureMode, Port, WorkloadSelector};
use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the Sidecar kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidecar;

impl CrdKind for Sidecar {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "Sidecar";
    const PLURAL: &'static str = "sidecars";

    type Spec = SidecarSpec;

    fn schema() -> Schema {
        let port_block = || {
            Attribute::object(
                "port",
                vec![
                    Attribute::int("number"),
                    Attribute::string("protocol"),
                    Attribute::string("name"),
                ],
            )
        };
        let capture_mode =
            || Attribute::string("capture_mode").one_of(&["DEFAULT", "IPTABLES", "NONE"]);

        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::object(
                    "workload_selector",
                    vec![Attribute::string_map("labels")],
                ),
                Attribute::object_list(
                    "ingress",
                    vec![
                        port_block(),
                        Attribute::string("bind"),
                        capture_mode(),
                        Attribute::string("default_endpoint"),
                    ],
                ),
                Attribute::object_list(
                    "egress",
                    vec![
                        port_block(),
                        Attribute::string("bind"),
                        capture_mode(),
                        Attribute::string_list("hosts").describe("namespace/dnsName entries"),
                    ],
                ),
                Attribute::object(
                    "outbound_traffic_policy",
                    vec![Attribute::string("mode").one_of(&["REGISTRY_ONLY", "ALLOW_ANY"])],
                ),
            ],
        ));
        Schema::new("meshform_networking_sidecar_v1", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_selector: Option<WorkloadSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<Vec<IngressListener>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress: Option<Vec<EgressListener>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_traffic_policy: Option<OutboundTrafficPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressListener {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<CaptureMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgressListener {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<CaptureMode>,

    /// `namespace/dnsName` entries reachable from this listener
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundTrafficPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutboundMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMode {
    RegistryOnly,
    AllowAny,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_namespace_default_sidecar() {
        let yaml = r#"
egress:
  - hosts:
      - "./*"
      - "istio-system/*"
outboundTrafficPolicy:
  mode: REGISTRY_ONLY
"#;
        let spec: SidecarSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec.outbound_traffic_policy.unwrap().mode,
            Some(OutboundMode::RegistryOnly)
        );
        assert_eq!(spec.egress.unwrap()[0].hosts.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_capture_mode_vocabulary_in_schema() {
        let schema = Sidecar::schema();
        let mode = schema.find("spec.ingress.capture_mode").unwrap();
        assert!(mode
            .validators
            .iter()
            .all(|v| v.check("spec.ingress.capture_mode", "EBPF").is_err()));
    }
}
