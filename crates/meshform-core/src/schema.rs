//! Attribute-tree schema tables
//!
//! Each managed kind declares a static [`Schema`]: the attribute tree a plan
//! for that kind may populate, with per-attribute mode (required, optional,
//! computed), description, and declarative validators. Schemas are pure
//! data; nothing here touches the network.

use crate::error::{CoreError, Result};
use crate::identity::{validate_name, validate_namespace};

/// Value shape of an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
    String,
    Bool,
    Int,
    /// List of elements of one shape
    List(Box<AttrKind>),
    /// String-keyed map with values of one shape
    Map(Box<AttrKind>),
    /// Nested block with its own attributes
    Object(Vec<Attribute>),
    /// Free-form JSON (EnvoyFilter patch values)
    Dynamic,
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMode {
    Required,
    Optional,
    /// Provider-populated; never taken from the plan
    Computed,
}

/// Declarative value validators attached to string attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Closed vocabulary; value must be one of the listed members
    OneOf(&'static [&'static str]),
    Dns1123Label,
    Dns1123Subdomain,
}

impl Validator {
    /// Check a candidate value, reporting the attribute path on failure
    pub fn check(&self, path: &str, value: &str) -> Result<()> {
        match self {
            Validator::OneOf(members) => {
                if members.contains(&value) {
                    Ok(())
                } else {
                    Err(CoreError::InvalidName {
                        field: path.to_string(),
                        message: format!("'{}' is not one of {}", value, members.join(", ")),
                    })
                }
            }
            Validator::Dns1123Label => validate_namespace(value).map_err(|e| CoreError::InvalidName {
                field: path.to_string(),
                message: e.to_string(),
            }),
            Validator::Dns1123Subdomain => validate_name(value).map_err(|e| CoreError::InvalidName {
                field: path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// One attribute in a schema tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttrKind,
    pub mode: AttrMode,
    pub description: &'static str,
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttrKind) -> Self {
        Self {
            name,
            kind,
            mode: AttrMode::Optional,
            description: "",
            validators: Vec::new(),
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttrKind::String)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttrKind::Bool)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, AttrKind::Int)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, AttrKind::List(Box::new(AttrKind::String)))
    }

    pub fn string_map(name: &'static str) -> Self {
        Self::new(name, AttrKind::Map(Box::new(AttrKind::String)))
    }

    pub fn int_map(name: &'static str) -> Self {
        Self::new(name, AttrKind::Map(Box::new(AttrKind::Int)))
    }

    pub fn object(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttrKind::Object(attributes))
    }

    pub fn object_list(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttrKind::List(Box::new(AttrKind::Object(attributes))))
    }

    pub fn dynamic(name: &'static str) -> Self {
        Self::new(name, AttrKind::Dynamic)
    }

    pub fn required(mut self) -> Self {
        self.mode = AttrMode::Required;
        self
    }

    pub fn computed(mut self) -> Self {
        self.mode = AttrMode::Computed;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn one_of(mut self, members: &'static [&'static str]) -> Self {
        self.validators.push(Validator::OneOf(members));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// Schema table for one resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Exposed type name, `meshform_<group>_<kind>_<version>`
    pub type_name: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(type_name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes,
        }
    }

    /// Check a wire document against the schema's validators
    ///
    /// Walks the value tree alongside the attribute tree and runs the
    /// declared validators on every string leaf found. Keys are matched
    /// ignoring case, `_` and `-`, so camelCase wire keys line up with the
    /// snake_case attribute names. Unknown keys and absent attributes pass;
    /// vocabulary and format violations do not.
    pub fn check(&self, value: &serde_json::Value) -> Result<()> {
        check_attributes(&self.attributes, value, "")
    }

    /// Look up an attribute by dotted path, descending through objects and
    /// list-of-object elements
    pub fn find(&self, path: &str) -> Option<&Attribute> {
        let mut attrs = &self.attributes;
        let mut found = None;

        for segment in path.split('.') {
            let attr = attrs.iter().find(|a| a.name == segment)?;
            attrs = match &attr.kind {
                AttrKind::Object(children) => children,
                AttrKind::List(inner) | AttrKind::Map(inner) => match inner.as_ref() {
                    AttrKind::Object(children) => children,
                    _ => &EMPTY,
                },
                _ => &EMPTY,
            };
            found = Some(attr);
        }

        found
    }
}

static EMPTY: Vec<Attribute> = Vec::new();

fn check_attributes(attrs: &[Attribute], value: &serde_json::Value, path: &str) -> Result<()> {
    let Some(map) = value.as_object() else {
        return Ok(());
    };
    for attr in attrs {
        if let Some(found) = lookup_key(map, attr.name) {
            check_attribute(attr, found, &join_path(path, attr.name))?;
        }
    }
    Ok(())
}

fn check_attribute(attr: &Attribute, value: &serde_json::Value, path: &str) -> Result<()> {
    if value.is_null() {
        return Ok(());
    }
    match &attr.kind {
        AttrKind::Object(children) => check_attributes(children, value, path),
        AttrKind::List(inner) => {
            if let Some(items) = value.as_array() {
                for item in items {
                    check_element(attr, inner, item, path)?;
                }
            }
            Ok(())
        }
        AttrKind::Map(inner) => {
            if let Some(entries) = value.as_object() {
                for entry in entries.values() {
                    check_element(attr, inner, entry, path)?;
                }
            }
            Ok(())
        }
        AttrKind::Dynamic => Ok(()),
        AttrKind::String | AttrKind::Bool | AttrKind::Int => check_scalar(attr, value, path),
    }
}

fn check_element(
    attr: &Attribute,
    inner: &AttrKind,
    value: &serde_json::Value,
    path: &str,
) -> Result<()> {
    match inner {
        AttrKind::Object(children) => check_attributes(children, value, path),
        _ => check_scalar(attr, value, path),
    }
}

fn check_scalar(attr: &Attribute, value: &serde_json::Value, path: &str) -> Result<()> {
    if let Some(s) = value.as_str() {
        for validator in &attr.validators {
            validator.check(path, s)?;
        }
    }
    Ok(())
}

/// Wire documents carry camelCase keys while attribute names are snake_case;
/// both normalize to the same lookup key
fn lookup_key<'a>(
    map: &'a serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Option<&'a serde_json::Value> {
    let want = normalize_key(name);
    map.iter()
        .find(|(key, _)| normalize_key(key) == want)
        .map(|(_, value)| value)
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Shared attributes every kind's schema starts with: computed id plus the
/// metadata block
pub fn common_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("id")
            .computed()
            .describe("Composite identity, namespace/name"),
        Attribute::object(
            "metadata",
            vec![
                Attribute::string("name")
                    .required()
                    .validator(Validator::Dns1123Subdomain)
                    .describe("Resource name"),
                Attribute::string("namespace")
                    .required()
                    .validator(Validator::Dns1123Label)
                    .describe("Resource namespace"),
                Attribute::string_map("labels").describe("Kubernetes labels"),
                Attribute::string_map("annotations").describe("Kubernetes annotations"),
            ],
        )
        .required(),
        Attribute::string("field_manager")
            .describe("Overrides the provider field manager for this resource"),
        Attribute::bool("force_conflicts")
            .describe("Overrides the provider force-conflicts setting for this resource"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        let mut attrs = common_attributes();
        attrs.push(Attribute::object(
            "spec",
            vec![
                Attribute::string("host").required(),
                Attribute::object_list(
                    "servers",
                    vec![
                        Attribute::string_list("hosts"),
                        Attribute::object(
                            "tls",
                            vec![Attribute::string("mode").one_of(&["SIMPLE", "MUTUAL"])],
                        ),
                    ],
                ),
            ],
        ));
        Schema::new("meshform_networking_gateway_v1", attrs)
    }

    #[test]
    fn test_find_top_level() {
        let schema = sample();
        let id = schema.find("id").unwrap();
        assert_eq!(id.mode, AttrMode::Computed);
    }

    #[test]
    fn test_find_nested_through_objects_and_lists() {
        let schema = sample();
        let mode = schema.find("spec.servers.tls.mode").unwrap();
        assert_eq!(mode.kind, AttrKind::String);
        assert_eq!(mode.validators.len(), 1);
    }

    #[test]
    fn test_find_missing_path() {
        assert!(sample().find("spec.nope").is_none());
        assert!(sample().find("spec.host.deeper").is_none());
    }

    #[test]
    fn test_one_of_validator() {
        let v = Validator::OneOf(&["SIMPLE", "MUTUAL"]);
        assert!(v.check("spec.servers.tls.mode", "SIMPLE").is_ok());

        let err = v.check("spec.servers.tls.mode", "PLAINTEXT").unwrap_err();
        assert!(err.to_string().contains("PLAINTEXT"));
        assert!(err.to_string().contains("spec.servers.tls.mode"));
    }

    #[test]
    fn test_check_rejects_vocabulary_violation() {
        let doc = serde_json::json!({
            "metadata": { "name": "gw", "namespace": "default" },
            "spec": {
                "servers": [
                    { "tls": { "mode": "SIMPLE" } },
                    { "tls": { "mode": "PLAINTEXT" } }
                ]
            }
        });
        let err = sample().check(&doc).unwrap_err();
        assert!(err.to_string().contains("PLAINTEXT"));
        assert!(err.to_string().contains("spec.servers.tls.mode"));
    }

    #[test]
    fn test_check_matches_camel_case_wire_keys() {
        // Wire key trafficPolicy must hit the traffic_policy attribute
        let attrs = vec![Attribute::object(
            "spec",
            vec![Attribute::object(
                "traffic_policy",
                vec![Attribute::object(
                    "tls",
                    vec![Attribute::string("mode").one_of(&["DISABLE", "SIMPLE"])],
                )],
            )],
        )];
        let schema = Schema::new("t", attrs);

        let doc = serde_json::json!({
            "spec": { "trafficPolicy": { "tls": { "mode": "MUTUAL" } } }
        });
        assert!(schema.check(&doc).is_err());

        let ok = serde_json::json!({
            "spec": { "trafficPolicy": { "tls": { "mode": "SIMPLE" } } }
        });
        assert!(schema.check(&ok).is_ok());
    }

    #[test]
    fn test_check_validates_metadata_formats() {
        let doc = serde_json::json!({
            "metadata": { "name": "Bad_Name", "namespace": "default" }
        });
        let err = sample().check(&doc).unwrap_err();
        assert!(err.to_string().contains("metadata.name"));
    }

    #[test]
    fn test_check_ignores_unknown_keys_and_absent_attributes() {
        let doc = serde_json::json!({
            "apiVersion": "networking.istio.io/v1",
            "kind": "Gateway",
            "metadata": { "name": "gw", "namespace": "default" },
            "somethingElse": { "mode": "PLAINTEXT" }
        });
        assert!(sample().check(&doc).is_ok());
    }

    #[test]
    fn test_metadata_validators_present_in_common_attributes() {
        let schema = Schema::new("t", common_attributes());
        let name = schema.find("metadata.name").unwrap();
        assert_eq!(name.validators, vec![Validator::Dns1123Subdomain]);
        assert_eq!(name.mode, AttrMode::Required);
    }
}
