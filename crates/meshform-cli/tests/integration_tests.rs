//! Integration tests for CLI commands
//!
//! Only offline commands run here; commands that contact a cluster are
//! covered by handler tests against the mock client.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run meshform command
fn meshform(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_meshform"))
        .args(args)
        .output()
        .expect("Failed to execute meshform")
}

fn write_document(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

const WORKLOAD_ENTRY: &str = r#"apiVersion: networking.istio.io/v1
kind: WorkloadEntry
metadata:
  name: vm-billing
  namespace: default
spec:
  address: 10.0.0.12
  serviceAccount: billing
"#;

mod render_command {
    use super::*;

    #[test]
    fn test_render_prints_stamped_manifest() {
        let dir = TempDir::new().unwrap();
        let file = write_document(&dir, "we.yaml", WORKLOAD_ENTRY);

        let output = meshform(&["render", "-f", &file]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("apiVersion: networking.istio.io/v1"));
        assert!(stdout.contains("kind: WorkloadEntry"));
        assert!(stdout.contains("serviceAccount: billing"));
    }

    #[test]
    fn test_render_overrides_user_supplied_api_version() {
        let dir = TempDir::new().unwrap();
        let file = write_document(
            &dir,
            "we.yaml",
            &WORKLOAD_ENTRY.replace("networking.istio.io/v1", "bogus/v9"),
        );

        let output = meshform(&["render", "-f", &file]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("apiVersion: networking.istio.io/v1"));
        assert!(!stdout.contains("bogus"));
    }

    #[test]
    fn test_render_writes_to_output_file() {
        let dir = TempDir::new().unwrap();
        let file = write_document(&dir, "we.yaml", WORKLOAD_ENTRY);
        let out = dir.path().join("manifest.yaml");

        let output = meshform(&["render", "-f", &file, "-o", &out.to_string_lossy()]);
        assert!(output.status.success());

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("kind: WorkloadEntry"));
    }

    #[test]
    fn test_render_missing_kind_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let file = write_document(&dir, "bad.yaml", "metadata:\n  name: x\n");

        let output = meshform(&["render", "-f", &file]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_render_unknown_kind_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let file = write_document(&dir, "bad.yaml", "kind: Deployment\n");

        let output = meshform(&["render", "-f", &file]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_render_invalid_metadata_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let file = write_document(
            &dir,
            "bad.yaml",
            &WORKLOAD_ENTRY.replace("vm-billing", "Bad_Name"),
        );

        let output = meshform(&["render", "-f", &file]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_render_rejects_values_outside_schema_vocabulary() {
        let doc = r#"apiVersion: networking.istio.io/v1
kind: Gateway
metadata:
  name: gw
  namespace: default
spec:
  servers:
    - hosts:
        - "*.example.com"
      tls:
        mode: PLAINTEXT
"#;
        let dir = TempDir::new().unwrap();
        let file = write_document(&dir, "gw.yaml", doc);

        let output = meshform(&["render", "-f", &file]);
        assert_eq!(output.status.code(), Some(2));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("PLAINTEXT"), "stderr: {}", stderr);
    }

    #[test]
    fn test_render_missing_file_is_io_error() {
        let output = meshform(&["render", "-f", "/nonexistent/we.yaml"]);
        assert_eq!(output.status.code(), Some(5));
    }
}

mod import_command {
    use super::*;

    #[test]
    fn test_import_seeds_namespace_and_name() {
        let output = meshform(&["import", "Gateway", "istio-system/ingress"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("namespace: istio-system"));
        assert!(stdout.contains("name: ingress"));
    }

    #[test]
    fn test_import_accepts_plural_kind_aliases() {
        let output = meshform(&["import", "virtualservices", "default/reviews"]);
        assert!(output.status.success());
    }

    #[test]
    fn test_import_malformed_identifier_fails_cleanly() {
        for bad in ["no-separator", "a/b/c", "/b", "a/"] {
            let output = meshform(&["import", "Gateway", bad]);
            assert_eq!(output.status.code(), Some(2), "identifier: {}", bad);
        }
    }

    #[test]
    fn test_import_unknown_kind_lists_known_kinds() {
        let output = meshform(&["import", "Deployment", "default/x"]);
        assert_eq!(output.status.code(), Some(2));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Gateway"));
    }
}

mod argument_validation {
    use super::*;

    // Kind and identifier checks run before any connection attempt, so
    // these fail fast even without a kubeconfig.

    #[test]
    fn test_get_with_malformed_identifier_fails_offline() {
        let output = meshform(&["get", "Gateway", "not-an-id"]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_delete_with_unknown_kind_fails_offline() {
        let output = meshform(&["delete", "Deployment", "default/x"]);
        assert_eq!(output.status.code(), Some(2));
    }
}
