//! Meshform Core - typed models for Istio networking CRDs
//!
//! This crate provides the cluster-independent half of meshform:
//! - `ResourceId`: composite `namespace/name` identity and import parsing
//! - `Metadata` / `ResourceModel` / `ResourceDocument`: the typed resource
//!   records exchanged with the Kubernetes API
//! - `kinds`: one module per managed Istio networking kind
//! - `Schema`: static attribute tables describing each kind's plan surface
//! - `manifest`: deterministic local YAML rendering

pub mod error;
pub mod identity;
pub mod kinds;
pub mod manifest;
pub mod metadata;
pub mod model;
pub mod registry;
pub mod schema;

pub use error::{CoreError, Result};
pub use identity::{validate_name, validate_namespace, ResourceId};
pub use metadata::Metadata;
pub use model::{CrdKind, ResourceDocument, ResourceModel};
pub use registry::{lookup, ResourceType, TYPES};
pub use schema::{AttrKind, AttrMode, Attribute, Schema, Validator};
