//! Spec fragments shared across kinds

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named port, as used by Gateway servers and ServiceEntry ports
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<u32>,
}

/// Exact/prefix/regex string matcher
///
/// Serializes with the matcher as the key, e.g. `{"prefix": "/api"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringMatch {
    Exact(String),
    Prefix(String),
    Regex(String),
}

/// Label selector scoping a configuration to a set of workloads
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkloadSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// How traffic is captured into a sidecar listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureMode {
    Default,
    Iptables,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_match_wire_shape() {
        let m = StringMatch::Prefix("/api".to_string());
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"prefix":"/api"}"#);

        let back: StringMatch = serde_json::from_str(r#"{"exact":"/health"}"#).unwrap();
        assert_eq!(back, StringMatch::Exact("/health".to_string()));
    }

    #[test]
    fn test_capture_mode_rename() {
        assert_eq!(
            serde_json::to_string(&CaptureMode::Iptables).unwrap(),
            "\"IPTABLES\""
        );
    }

    #[test]
    fn test_port_skips_absent_fields() {
        let port = Port {
            number: Some(443),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&port).unwrap(), r#"{"number":443}"#);
    }
}
