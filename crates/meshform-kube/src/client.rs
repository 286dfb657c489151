//! Dynamic Kubernetes client
//!
//! [`DynamicClient`] is the capability the lifecycle handlers need from a
//! cluster: Get, server-side-apply Patch, and Delete over unstructured
//! documents identified by group/version/kind. [`ApiClient`] implements it
//! over `kube::Api<DynamicObject>`; tests use the mock in
//! [`crate::testing`].

use async_trait::async_trait;
use kube::api::{Api, DeleteParams, DynamicObject, Patch, PatchParams, ValidationDirective};
use kube::discovery::ApiResource;

use meshform_core::ResourceType;

use crate::config::ApplyOptions;
use crate::error::{KubeError, Result};

/// Get/Apply/Delete over unstructured namespaced resources
///
/// Every method is exactly one HTTP round trip, no client-side retry or
/// backoff. Apply patches are idempotent on the Kubernetes side, so a caller
/// retrying at a higher layer is safe.
#[async_trait]
pub trait DynamicClient: Send + Sync {
    async fn get(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<DynamicObject>;

    /// Server-side-apply the payload, with strict field validation
    async fn apply(
        &self,
        ty: &ResourceType,
        namespace: &str,
        name: &str,
        payload: serde_json::Value,
        options: &ApplyOptions,
    ) -> Result<DynamicObject>;

    async fn delete(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<()>;
}

/// `DynamicClient` backed by a real cluster connection
///
/// The underlying `kube::Client` is a cheap handle; one `ApiClient` is safe
/// to share across concurrent handler invocations.
#[derive(Clone)]
pub struct ApiClient {
    client: kube::Client,
}

impl ApiClient {
    /// Connect using the ambient kubeconfig or in-cluster environment
    pub async fn try_default() -> Result<Self> {
        let client = kube::Client::try_default().await?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    fn api(&self, ty: &ResourceType, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &api_resource(ty))
    }
}

#[async_trait]
impl DynamicClient for ApiClient {
    async fn get(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<DynamicObject> {
        self.api(ty, namespace)
            .get(name)
            .await
            .map_err(|e| classify(ty, namespace, name, e))
    }

    async fn apply(
        &self,
        ty: &ResourceType,
        namespace: &str,
        name: &str,
        payload: serde_json::Value,
        options: &ApplyOptions,
    ) -> Result<DynamicObject> {
        let mut params = PatchParams::apply(&options.field_manager);
        params.force = options.force;
        params.field_validation = Some(ValidationDirective::Strict);

        self.api(ty, namespace)
            .patch(name, &params, &Patch::Apply(&payload))
            .await
            .map_err(KubeError::Api)
    }

    async fn delete(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<()> {
        self.api(ty, namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(|e| classify(ty, namespace, name, e))
    }
}

/// Build a kube `ApiResource` from a meshform type descriptor
pub fn api_resource(ty: &ResourceType) -> ApiResource {
    ApiResource {
        group: ty.group.to_string(),
        version: ty.version.to_string(),
        api_version: ty.api_version(),
        kind: ty.kind.to_string(),
        plural: ty.plural.to_string(),
    }
}

/// Map a kube error, pulling HTTP 404 out as the typed not-found case
fn classify(ty: &ResourceType, namespace: &str, name: &str, err: kube::Error) -> KubeError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => KubeError::NotFound {
            kind: ty.kind.to_string(),
            id: format!("{}/{}", namespace, name),
        },
        e => KubeError::Api(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshform_core::lookup;

    #[test]
    fn test_api_resource_fields() {
        let ty = lookup("Gateway").unwrap();
        let ar = api_resource(&ty);
        assert_eq!(ar.group, "networking.istio.io");
        assert_eq!(ar.api_version, "networking.istio.io/v1");
        assert_eq!(ar.plural, "gateways");
    }

    #[test]
    fn test_classify_404_becomes_typed_not_found() {
        let ty = lookup("Gateway").unwrap();
        let resp = kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: "gateways.networking.istio.io \"gw\" not found".to_string(),
            reason: "NotFound".to_string(),
            code: 404,
        };
        let err = classify(&ty, "default", "gw", kube::Error::Api(resp));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("default/gw"));
    }

    #[test]
    fn test_classify_other_codes_pass_through() {
        let ty = lookup("Gateway").unwrap();
        let resp = kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: "conflict".to_string(),
            reason: "Conflict".to_string(),
            code: 409,
        };
        let err = classify(&ty, "default", "gw", kube::Error::Api(resp));
        assert!(!err.is_not_found());
        assert!(err.is_conflict());
    }
}
