//! Meshform Kube - cluster lifecycle for Istio networking resources
//!
//! This crate provides:
//! - **Dynamic client**: a Get/Apply/Delete capability over unstructured
//!   namespaced resources, backed by `kube::Api<DynamicObject>`
//! - **Resource handler**: generic Create/Read/Update/Delete/Import driven
//!   by server-side apply
//! - **Data sources**: read-only Get with typed not-found handling
//! - **Provider configuration**: explicit field-manager and force-conflicts
//!   defaults with per-instance overrides
//! - **Diagnostics**: structured classification of every failure

pub mod client;
pub mod config;
pub mod datasource;
pub mod diagnostics;
pub mod error;
pub mod resource;
pub mod testing;

pub use client::{api_resource, ApiClient, DynamicClient};
pub use config::{ApplyOptions, ProviderConfig, DEFAULT_FIELD_MANAGER};
pub use datasource::DataSource;
pub use diagnostics::{classify, Diagnostic, DiagnosticClass, Severity};
pub use error::{KubeError, Result};
pub use resource::ResourceHandler;
pub use testing::{MockClient, RecordedCall};
