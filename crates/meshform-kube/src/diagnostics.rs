//! User-facing diagnostics
//!
//! Every handler failure is classified into one of four diagnostic classes:
//! not-found, API/transport, serialization (a provider bug), or pre-flight
//! validation. Diagnostics are fatal to the single resource they concern;
//! nothing here retries or swallows errors.

use std::fmt;

use crate::error::KubeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic class, used to keep the four error families distinguishable
/// in tests and exit-code mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticClass {
    NotFound,
    Api,
    Serialization,
    Validation,
}

/// A structured, user-facing report of one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub class: DiagnosticClass,
    /// One-line problem statement
    pub summary: String,
    /// Underlying cause and any remediation hint
    pub detail: String,
}

impl Diagnostic {
    pub fn error(class: DiagnosticClass, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            class,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// Classify a handler error into a diagnostic
pub fn classify(operation: &str, err: &KubeError) -> Diagnostic {
    match err {
        KubeError::NotFound { kind, id } => Diagnostic::error(
            DiagnosticClass::NotFound,
            format!("{} not found", kind),
            format!("no {} exists at '{}'", kind, id),
        ),
        KubeError::Serialization(msg) => Diagnostic::error(
            DiagnosticClass::Serialization,
            format!("unable to {} resource", operation),
            format!(
                "serialization failed: {}. This is a bug in meshform, please report this issue",
                msg
            ),
        ),
        KubeError::InvalidConfig(msg) => Diagnostic::error(
            DiagnosticClass::Validation,
            format!("unable to {} resource", operation),
            msg.clone(),
        ),
        KubeError::Validation(core_err) => Diagnostic::error(
            DiagnosticClass::Validation,
            "invalid resource configuration".to_string(),
            core_err.to_string(),
        ),
        other => Diagnostic::error(
            DiagnosticClass::Api,
            format!("unable to {} resource", operation),
            format!("{} ({})", other, error_kind_name(other)),
        ),
    }
}

/// Short type tag embedded in API diagnostics for debugging
fn error_kind_name(err: &KubeError) -> &'static str {
    match err {
        KubeError::Api(_) => "KubeError::Api",
        KubeError::NotFound { .. } => "KubeError::NotFound",
        KubeError::Serialization(_) => "KubeError::Serialization",
        KubeError::InvalidConfig(_) => "KubeError::InvalidConfig",
        KubeError::Validation(_) => "KubeError::Validation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_its_own_class() {
        let err = KubeError::NotFound {
            kind: "Gateway".to_string(),
            id: "default/gw".to_string(),
        };
        let diag = classify("read", &err);
        assert_eq!(diag.class, DiagnosticClass::NotFound);
        assert!(diag.detail.contains("default/gw"));
    }

    #[test]
    fn test_serialization_errors_ask_for_a_bug_report() {
        let err = KubeError::Serialization("unexpected token".to_string());
        let diag = classify("create", &err);
        assert_eq!(diag.class, DiagnosticClass::Serialization);
        assert!(diag.detail.contains("please report this issue"));
    }

    #[test]
    fn test_api_errors_embed_the_raw_error() {
        let resp = kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: "admission webhook denied".to_string(),
            reason: "Invalid".to_string(),
            code: 422,
        };
        let err = KubeError::Api(kube::Error::Api(resp));
        let diag = classify("create", &err);
        assert_eq!(diag.class, DiagnosticClass::Api);
        assert!(diag.detail.contains("admission webhook denied"));
        assert!(diag.detail.contains("KubeError::Api"));
    }

    #[test]
    fn test_validation_errors_are_distinct_from_api_errors() {
        let err = KubeError::Validation(meshform_core::CoreError::MissingField {
            field: "metadata.name".to_string(),
        });
        let diag = classify("create", &err);
        assert_eq!(diag.class, DiagnosticClass::Validation);
    }
}
