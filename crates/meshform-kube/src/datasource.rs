//! Read-only data-source handler
//!
//! Same dependency shape as the resource handler but strictly Get: never
//! mutates the cluster. A missing resource is the typed not-found case and
//! leaves the spec tree unpopulated.

use std::marker::PhantomData;

use tracing::debug;

use meshform_core::{CrdKind, ResourceId, ResourceModel};

use crate::client::DynamicClient;
use crate::error::Result;
use crate::resource::decode;

/// Read-only view over one resource kind
pub struct DataSource<'a, K: CrdKind, C: DynamicClient> {
    client: &'a C,
    _kind: PhantomData<K>,
}

impl<'a, K: CrdKind, C: DynamicClient> DataSource<'a, K, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// Fetch the resource at `id` and return it as a populated model
    pub async fn read(&self, id: &ResourceId) -> Result<ResourceModel<K>> {
        let obj = self
            .client
            .get(&K::resource_type(), id.namespace(), id.name())
            .await?;
        let remote = decode::<K>(obj)?;

        debug!(kind = K::KIND, id = %id, "read data source");
        let mut model = ResourceModel::imported(id.clone());
        model.merge_remote(remote);
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshform_core::kinds::{WorkloadEntry, WorkloadEntrySpec};
    use meshform_core::Metadata;

    use crate::config::ProviderConfig;
    use crate::resource::ResourceHandler;
    use crate::testing::MockClient;

    #[tokio::test]
    async fn test_read_returns_populated_model() {
        let client = MockClient::new();
        let config = ProviderConfig::default();

        let spec = WorkloadEntrySpec {
            address: Some("10.0.0.12".to_string()),
            ..Default::default()
        };
        let model = ResourceModel::<WorkloadEntry>::with_spec(Metadata::new("default", "vm-1"), spec);
        ResourceHandler::<WorkloadEntry, _>::new(&client, &config)
            .create(&model)
            .await
            .unwrap();

        let id = ResourceId::parse("default/vm-1").unwrap();
        let found = DataSource::<WorkloadEntry, _>::new(&client).read(&id).await.unwrap();
        assert_eq!(found.spec.unwrap().address.as_deref(), Some("10.0.0.12"));
        assert_eq!(found.id.unwrap(), id);
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found_and_spec_stays_empty() {
        let client = MockClient::new();
        let id = ResourceId::parse("default/absent").unwrap();

        let err = DataSource::<WorkloadEntry, _>::new(&client)
            .read(&id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        // Distinct from other API failures
        assert!(!err.is_conflict());
    }

    #[tokio::test]
    async fn test_data_source_never_writes() {
        let client = MockClient::new();
        let id = ResourceId::parse("default/absent").unwrap();
        let _ = DataSource::<WorkloadEntry, _>::new(&client).read(&id).await;

        let calls = client.calls();
        assert!(calls.iter().all(|c| c.operation == "get"));
    }
}
