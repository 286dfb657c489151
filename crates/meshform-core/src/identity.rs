//! Composite resource identity and import-identifier parsing
//!
//! Every managed resource is addressed by `namespace/name`. The same string
//! is used for the computed `id` attribute, for `get`/`delete` lookups, and
//! as the import identifier, so an id printed by one operation can always be
//! fed back into another verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maximum length of a DNS-1123 label (namespace names)
const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a DNS-1123 subdomain (resource names)
const MAX_SUBDOMAIN_LEN: usize = 253;

/// Composite identity of a namespaced resource: `namespace/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    name: String,
}

impl ResourceId {
    /// Build an identity from validated parts
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();

        validate_namespace(&namespace)?;
        validate_name(&name)?;

        Ok(Self { namespace, name })
    }

    /// Parse an import identifier of the form `namespace/name`
    ///
    /// Exactly one `/` separator, both halves non-empty. Anything else is
    /// rejected before any state is touched.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split('/');
        let (namespace, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ns), Some(n), None) => (ns, n),
            _ => {
                return Err(CoreError::InvalidIdentifier {
                    input: input.to_string(),
                    reason: "expected exactly one '/' separator (namespace/name)".to_string(),
                });
            }
        };

        if namespace.is_empty() || name.is_empty() {
            return Err(CoreError::InvalidIdentifier {
                input: input.to_string(),
                reason: "namespace and name must both be non-empty".to_string(),
            });
        }

        Self::new(namespace, name).map_err(|e| CoreError::InvalidIdentifier {
            input: input.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

/// Validate a namespace as a DNS-1123 label
///
/// Lowercase alphanumeric or '-', starting and ending alphanumeric, at most
/// 63 characters.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    validate_dns1123(namespace, MAX_LABEL_LEN, false).map_err(|message| CoreError::InvalidName {
        field: "metadata.namespace".to_string(),
        message,
    })
}

/// Validate a resource name as a DNS-1123 subdomain
///
/// Like a label but '.' is allowed and the limit is 253 characters.
pub fn validate_name(name: &str) -> Result<()> {
    validate_dns1123(name, MAX_SUBDOMAIN_LEN, true).map_err(|message| CoreError::InvalidName {
        field: "metadata.name".to_string(),
        message,
    })
}

fn validate_dns1123(value: &str, max_len: usize, allow_dots: bool) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > max_len {
        return Err(format!("must be at most {} characters", max_len));
    }

    let valid_char =
        |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_dots && c == '.');
    if let Some(bad) = value.chars().find(|c| !valid_char(*c)) {
        return Err(format!(
            "contains invalid character '{}' (allowed: lowercase alphanumeric, '-'{})",
            bad,
            if allow_dots { ", '.'" } else { "" }
        ));
    }

    let boundary_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !boundary_ok(value.chars().next()) || !boundary_ok(value.chars().last()) {
        return Err("must start and end with an alphanumeric character".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_identifier() {
        let id = ResourceId::parse("istio-system/ingress-gateway").unwrap();
        assert_eq!(id.namespace(), "istio-system");
        assert_eq!(id.name(), "ingress-gateway");
        assert_eq!(id.to_string(), "istio-system/ingress-gateway");
    }

    #[test]
    fn test_parse_name_with_dots() {
        // Names may be DNS subdomains
        let id = ResourceId::parse("default/api.example.com").unwrap();
        assert_eq!(id.name(), "api.example.com");
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        assert!(ResourceId::parse("").is_err());
        assert!(ResourceId::parse("no-separator").is_err());
        assert!(ResourceId::parse("a/b/c").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(ResourceId::parse("a/").is_err());
        assert!(ResourceId::parse("/b").is_err());
        assert!(ResourceId::parse("/").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        assert!(ResourceId::parse("Default/name").is_err());
        assert!(ResourceId::parse("default/Name").is_err());
        assert!(ResourceId::parse("default/na_me").is_err());
        assert!(ResourceId::parse("default/-leading").is_err());
        assert!(ResourceId::parse("default/trailing-").is_err());
    }

    #[test]
    fn test_namespace_is_a_label_not_a_subdomain() {
        // Dots are fine in names but not namespaces
        assert!(ResourceId::parse("my.ns/name").is_err());
    }

    #[test]
    fn test_new_validates_parts() {
        assert!(ResourceId::new("default", "gw").is_ok());
        assert!(ResourceId::new("", "gw").is_err());
        assert!(ResourceId::new("default", "").is_err());
    }

    #[test]
    fn test_length_limits() {
        let long_label = "a".repeat(64);
        assert!(ResourceId::new(long_label, "name").is_err());

        let long_name = "a".repeat(254);
        assert!(ResourceId::new("default", long_name).is_err());

        let max_name = "a".repeat(253);
        assert!(ResourceId::new("default", max_name).is_ok());
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let id = ResourceId::parse("default/gw").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"default/gw\"");

        let back: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
