//! DestinationRule (networking.istio.io/v1)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the DestinationRule kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationRule;

impl CrdKind for DestinationRule {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "DestinationRule";
    const PLURAL: &'static str = "destinationrules";

    type Spec = DestinationRuleSpec;

    fn schema() -> Schema {
        let traffic_policy = || {
            vec![
                Attribute::object(
                    "load_balancer",
                    vec![Attribute::string("simple").one_of(&[
                        "UNSPECIFIED",
                        "RANDOM",
                        "PASSTHROUGH",
                        "ROUND_ROBIN",
                        "LEAST_REQUEST",
                    ])],
                ),
                Attribute::object(
                    "connection_pool",
                    vec![
                        Attribute::object(
                            "tcp",
                            vec![
                                Attribute::int("max_connections"),
                                Attribute::string("connect_timeout"),
                            ],
                        ),
                        Attribute::object(
                            "http",
                            vec![
                                Attribute::int("http1_max_pending_requests"),
                                Attribute::int("http2_max_requests"),
                                Attribute::int("max_requests_per_connection"),
                                Attribute::int("max_retries"),
                            ],
                        ),
                    ],
                ),
                Attribute::object(
                    "outlier_detection",
                    vec![
                        Attribute::int("consecutive_5xx_errors"),
                        Attribute::string("interval"),
                        Attribute::string("base_ejection_time"),
                        Attribute::int("max_ejection_percent"),
                    ],
                ),
                Attribute::object(
                    "tls",
                    vec![
                        Attribute::string("mode").one_of(&[
                            "DISABLE",
                            "SIMPLE",
                            "MUTUAL",
                            "ISTIO_MUTUAL",
                        ]),
                        Attribute::string("client_certificate"),
                        Attribute::string("private_key"),
                        Attribute::string("ca_certificates"),
                        Attribute::string("sni"),
                    ],
                ),
            ]
        };

        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::string("host")
                    .required()
                    .describe("Service the rule applies to"),
                Attribute::object("traffic_policy", traffic_policy()),
                Attribute::object_list(
                    "subsets",
                    vec![
                        Attribute::string("name").required(),
                        Attribute::string_map("labels"),
                        Attribute::object("traffic_policy", traffic_policy()),
                    ],
                ),
                Attribute::string_list("export_to"),
            ],
        ));
        Schema::new("meshform_networking_destination_rule_v1", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRuleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy: Option<TrafficPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsets: Option<Vec<Subset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_to: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<LoadBalancer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_pool: Option<ConnectionPool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_detection: Option<OutlierDetection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple: Option<LbPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent_hash: Option<ConsistentHash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LbPolicy {
    Unspecified,
    Random,
    Passthrough,
    RoundRobin,
    LeastRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistentHash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_header_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_source_ip: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_ring_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i32>,

    /// Duration string, e.g. "30ms"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http1_max_pending_requests: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2_max_requests: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_requests_per_connection: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierDetection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_5xx_errors: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_ejection_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ejection_percent: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ClientTlsMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificates: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientTlsMode {
    Disable,
    Simple,
    Mutual,
    IstioMutual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy: Option<TrafficPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlier_detection_field_rename() {
        // The upstream field is consecutive5xxErrors, which camelCase
        // conversion must hit exactly
        let od = OutlierDetection {
            consecutive_5xx_errors: Some(5),
            ..Default::default()
        };
        let json = serde_json::to_value(&od).unwrap();
        assert_eq!(json["consecutive5xxErrors"], 5);
    }

    #[test]
    fn test_lb_policy_wire_values() {
        assert_eq!(
            serde_json::to_string(&LbPolicy::RoundRobin).unwrap(),
            "\"ROUND_ROBIN\""
        );
        assert_eq!(
            serde_json::to_string(&LbPolicy::LeastRequest).unwrap(),
            "\"LEAST_REQUEST\""
        );
    }

    #[test]
    fn test_subset_traffic_policy_mirrors_top_level_in_schema() {
        let schema = DestinationRule::schema();
        assert!(schema.find("spec.traffic_policy.tls.mode").is_some());
        assert!(schema.find("spec.subsets.traffic_policy.tls.mode").is_some());
    }

    #[test]
    fn test_deserialize_from_istio_yaml() {
        let yaml = r#"
host: reviews.default.svc.cluster.local
trafficPolicy:
  loadBalancer:
    simple: LEAST_REQUEST
  connectionPool:
    tcp:
      maxConnections: 100
      connectTimeout: 30ms
  outlierDetection:
    consecutive5xxErrors: 7
    interval: 5m
subsets:
  - name: v1
    labels:
      version: v1
"#;
        let spec: DestinationRuleSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec.traffic_policy.as_ref().unwrap().load_balancer.as_ref().unwrap().simple,
            Some(LbPolicy::LeastRequest)
        );
        assert_eq!(
            spec.traffic_policy
                .as_ref()
                .unwrap()
                .outlier_detection
                .as_ref()
                .unwrap()
                .consecutive_5xx_errors,
            Some(7)
        );
        assert_eq!(spec.subsets.unwrap()[0].name.as_deref(), Some("v1"));
    }
}
