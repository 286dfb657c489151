//! VirtualService (networking.istio.io/v1)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::StringMatch;
use crate::model::CrdKind;
use crate::schema::{common_attributes, Attribute, Schema};

/// Marker for the VirtualService kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualService;

impl CrdKind for VirtualService {
    const GROUP: &'static str = "networking.istio.io";
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "VirtualService";
    const PLURAL: &'static str = "virtualservices";

    type Spec = VirtualServiceSpec;

    fn schema() -> Schema {
        let destination = || {
            Attribute::object(
                "destination",
                vec![
                    Attribute::string("host").required(),
                    Attribute::string("subset"),
                    Attribute::object("port", vec![Attribute::int("number")]),
                ],
            )
        };

        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::string_list("hosts").describe("Destination hosts the rules apply to"),
                Attribute::string_list("gateways"),
                Attribute::object_list(
                    "http",
                    vec![
                        Attribute::string("name"),
                        Attribute::object_list(
                            "match",
                            vec![
                                Attribute::string("name"),
                                Attribute::dynamic("uri"),
                                Attribute::dynamic("scheme"),
                                Attribute::dynamic("method"),
                                Attribute::dynamic("authority"),
                                Attribute::dynamic("headers"),
                            ],
                        ),
                        Attribute::object_list(
                            "route",
                            vec![destination(), Attribute::int("weight")],
                        ),
                        Attribute::object(
                            "redirect",
                            vec![
                                Attribute::string("uri"),
                                Attribute::string("authority"),
                                Attribute::int("redirect_code"),
                            ],
                        ),
                        Attribute::object(
                            "rewrite",
                            vec![Attribute::string("uri"), Attribute::string("authority")],
                        ),
                        Attribute::string("timeout"),
                        Attribute::object(
                            "retries",
                            vec![
                                Attribute::int("attempts"),
                                Attribute::string("per_try_timeout"),
                                Attribute::string("retry_on"),
                            ],
                        ),
                    ],
                ),
                Attribute::object_list(
                    "tcp",
                    vec![
                        Attribute::object_list(
                            "match",
                            vec![
                                Attribute::string_list("destination_subnets"),
                                Attribute::int("port"),
                            ],
                        ),
                        Attribute::object_list(
                            "route",
                            vec![destination(), Attribute::int("weight")],
                        ),
                    ],
                ),
                Attribute::string_list("export_to"),
            ],
        ));
        Schema::new("meshform_networking_virtual_service_v1", attrs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateways: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<Vec<HttpRoute>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<Vec<TcpRoute>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_to: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<HttpMatchRequest>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<RouteDestination>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<HttpRedirect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<HttpRewrite>,

    /// Duration string, e.g. "5s"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<HttpRetry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<StringMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<StringMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<StringMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<StringMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, StringMatch>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDestination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRedirect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_code: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRewrite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRetry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_try_timeout: Option<String>,

    /// Envoy retry policy names, comma-separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpRoute {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<L4Match>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<RouteDestination>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L4Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_subnets: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
}
