//! Runtime resource-type descriptors and kind lookup
//!
//! The typed handlers work through [`CrdKind`](crate::model::CrdKind); the
//! CLI resolves a user-supplied kind string to a [`ResourceType`] here.

use crate::error::{CoreError, Result};
use crate::kinds;
use crate::model::CrdKind;

/// Group/version/kind/plural identifying one managed resource type
///
/// All meshform-managed types are namespaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceType {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
}

impl ResourceType {
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

macro_rules! type_of {
    ($kind:ty) => {
        ResourceType {
            group: <$kind as CrdKind>::GROUP,
            version: <$kind as CrdKind>::VERSION,
            kind: <$kind as CrdKind>::KIND,
            plural: <$kind as CrdKind>::PLURAL,
        }
    };
}

/// Every resource type meshform manages
pub const TYPES: &[ResourceType] = &[
    type_of!(kinds::DestinationRule),
    type_of!(kinds::EnvoyFilter),
    type_of!(kinds::Gateway),
    type_of!(kinds::ServiceEntry),
    type_of!(kinds::Sidecar),
    type_of!(kinds::VirtualService),
    type_of!(kinds::WorkloadEntry),
];

/// Resolve a kind string (singular or plural, any case, '-'/'_' ignored)
pub fn lookup(kind: &str) -> Result<ResourceType> {
    let normalized: String = kind
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    TYPES
        .iter()
        .find(|ty| ty.kind.to_ascii_lowercase() == normalized || ty.plural == normalized)
        .copied()
        .ok_or_else(|| CoreError::UnknownKind {
            kind: kind.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_kind() {
        let ty = lookup("Gateway").unwrap();
        assert_eq!(ty.kind, "Gateway");
        assert_eq!(ty.group, "networking.istio.io");
        assert_eq!(ty.plural, "gateways");
    }

    #[test]
    fn test_lookup_is_case_and_separator_insensitive() {
        assert_eq!(lookup("destinationrule").unwrap().kind, "DestinationRule");
        assert_eq!(lookup("destination-rule").unwrap().kind, "DestinationRule");
        assert_eq!(lookup("destination_rule").unwrap().kind, "DestinationRule");
        assert_eq!(lookup("virtualservices").unwrap().kind, "VirtualService");
    }

    #[test]
    fn test_lookup_unknown_kind() {
        let err = lookup("FluxCapacitor").unwrap_err();
        assert!(err.to_string().contains("FluxCapacitor"));
    }

    #[test]
    fn test_envoy_filter_stays_on_alpha_api() {
        let ty = lookup("EnvoyFilter").unwrap();
        assert_eq!(ty.api_version(), "networking.istio.io/v1alpha3");
    }

    #[test]
    fn test_all_types_share_the_istio_group() {
        for ty in TYPES {
            assert_eq!(ty.group, "networking.istio.io");
        }
    }
}
