//! Managed resource kinds
//!
//! One module per Istio networking kind: a zero-sized marker implementing
//! [`CrdKind`](crate::model::CrdKind), the typed spec tree (every field
//! optional, absence distinct from default), and the kind's static schema
//! table. All kinds live in `networking.istio.io`; EnvoyFilter is the only
//! one still on `v1alpha3`.

mod common;
mod destination_rule;
mod envoy_filter;
mod gateway;
mod service_entry;
mod sidecar;
mod virtual_service;
mod workload_entry;

pub use common::{CaptureMode, Port, StringMatch, WorkloadSelector};
pub use destination_rule::{
    ClientTls, ClientTlsMode, ConnectionPool, ConsistentHash, DestinationRule, DestinationRuleSpec,
    HttpSettings, LbPolicy, LoadBalancer, OutlierDetection, Subset, TcpSettings, TrafficPolicy,
};
pub use envoy_filter::{
    ApplyTo, ConfigPatch, EnvoyFilter, EnvoyFilterSpec, EnvoyPatch, ObjectMatch, PatchContext,
    PatchOperation,
};
pub use gateway::{Gateway, GatewaySpec, Server, ServerTls, TlsMode};
pub use service_entry::{Resolution, ServiceEntry, ServiceEntrySpec, ServiceLocation};
pub use sidecar::{
    EgressListener, IngressListener, OutboundMode, OutboundTrafficPolicy, Sidecar, SidecarSpec,
};
pub use virtual_service::{
    Destination, HttpMatchRequest, HttpRedirect, HttpRetry, HttpRewrite, HttpRoute, L4Match,
    PortSelector, RouteDestination, TcpRoute, VirtualService, VirtualServiceSpec,
};
pub use workload_entry::{WorkloadEntry, WorkloadEntrySpec};
