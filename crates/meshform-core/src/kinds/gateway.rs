//! Gateway (networking.istio.io/v1)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::Port;
use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the Gateway kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gateway;

impl CrdKind for Gateway {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "Gateway";
    const PLURAL: &'static str = "gateways";

    type Spec = GatewaySpec;

    fn schema() -> Schema {
        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::string_map("selector")
                    .describe("Labels selecting the gateway workload the configuration applies to"),
                Attribute::object_list(
                    "servers",
                    vec![
                        Attribute::object(
                            "port",
                            vec![
                                Attribute::int("number"),
                                Attribute::string("protocol"),
                                Attribute::string("name"),
                                Attribute::int("target_port"),
                            ],
                        ),
                        Attribute::string_list("hosts")
                            .describe("Hosts exposed by this server, optionally namespace/dnsName"),
                        Attribute::object(
                            "tls",
                            vec![
                                Attribute::bool("https_redirect"),
                                Attribute::string("mode").one_of(&[
                                    "PASSTHROUGH",
                                    "SIMPLE",
                                    "MUTUAL",
                                    "AUTO_PASSTHROUGH",
                                    "ISTIO_MUTUAL",
                                ]),
                                Attribute::string("server_certificate"),
                                Attribute::string("private_key"),
                                Attribute::string("ca_certificates"),
                                Attribute::string("credential_name"),
                                Attribute::string_list("subject_alt_names"),
                            ],
                        ),
                        Attribute::string("name"),
                        Attribute::string("bind"),
                        Attribute::string("default_endpoint"),
                    ],
                )
                .describe("Servers the proxy listens on"),
            ],
        ));
        Schema::new("meshform_networking_gateway_v1", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ServerTls>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_redirect: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TlsMode>,

    /// Path to the server certificate (SIMPLE/MUTUAL on the proxy filesystem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_certificate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificates: Option<String>,

    /// Secret holding the certificate, preferred over filesystem paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_alt_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TlsMode {
    Passthrough,
    Simple,
    Mutual,
    AutoPassthrough,
    IstioMutual,
}
