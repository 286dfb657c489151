//! Generic resource lifecycle handler
//!
//! One handler instance drives Create/Read/Update/Delete/Import for a single
//! resource kind against an injected [`DynamicClient`]. Every operation is
//! synchronous from the caller's perspective and performs exactly one
//! network round trip; there is no internal retry, and a transport failure
//! surfaces immediately.

use std::marker::PhantomData;

use kube::api::DynamicObject;
use tracing::{debug, info};

use meshform_core::{CrdKind, ResourceDocument, ResourceId, ResourceModel};

use crate::client::DynamicClient;
use crate::config::ProviderConfig;
use crate::error::{KubeError, Result};

/// Lifecycle handler for one resource kind
pub struct ResourceHandler<'a, K: CrdKind, C: DynamicClient> {
    client: &'a C,
    config: &'a ProviderConfig,
    _kind: PhantomData<K>,
}

impl<'a, K: CrdKind, C: DynamicClient> ResourceHandler<'a, K, C> {
    pub fn new(client: &'a C, config: &'a ProviderConfig) -> Self {
        Self {
            client,
            config,
            _kind: PhantomData,
        }
    }

    /// Create the resource via server-side apply
    ///
    /// Synthesizes the composite id, stamps `apiVersion`/`kind`, and merges
    /// the server's response back over the local model; the server is
    /// authoritative for defaulted and computed fields.
    pub async fn create(&self, model: &ResourceModel<K>) -> Result<ResourceModel<K>> {
        model.metadata.validate()?;
        let id = model.metadata.id()?;

        let remote = self.patch(model, &id).await?;

        info!(kind = K::KIND, id = %id, "created resource");
        let mut merged = model.clone();
        merged.id = Some(id);
        merged.merge_remote(remote);
        Ok(merged)
    }

    /// Refresh local state from the cluster
    ///
    /// A missing resource is a typed not-found error, never a silent state
    /// drop; the caller decides how to handle drift.
    pub async fn read(&self, model: &ResourceModel<K>) -> Result<ResourceModel<K>> {
        let id = self.identity(model)?;

        let obj = self
            .client
            .get(&K::resource_type(), id.namespace(), id.name())
            .await?;
        let remote = decode::<K>(obj)?;

        debug!(kind = K::KIND, id = %id, "read resource");
        let mut merged = model.clone();
        merged.id = Some(id);
        merged.merge_remote(remote);
        Ok(merged)
    }

    /// Apply changes to an existing resource
    ///
    /// Same apply-patch path as [`create`](Self::create) but the id must
    /// already exist and is not re-synthesized.
    pub async fn update(&self, model: &ResourceModel<K>) -> Result<ResourceModel<K>> {
        model.metadata.validate()?;
        let id = model.id.clone().ok_or_else(|| {
            KubeError::InvalidConfig("cannot update a resource that has no id".to_string())
        })?;

        let remote = self.patch(model, &id).await?;

        info!(kind = K::KIND, id = %id, "updated resource");
        let mut merged = model.clone();
        merged.merge_remote(remote);
        Ok(merged)
    }

    /// Create or update, depending on whether the resource already exists
    ///
    /// Checks the cluster with a Get first; an existing resource takes the
    /// [`update`](Self::update) path with its current id, a missing one the
    /// [`create`](Self::create) path. Any other Get failure is surfaced.
    pub async fn apply(&self, model: &ResourceModel<K>) -> Result<ResourceModel<K>> {
        model.metadata.validate()?;
        let id = self.identity(model)?;

        match self
            .client
            .get(&K::resource_type(), id.namespace(), id.name())
            .await
        {
            Ok(_) => {
                let mut existing = model.clone();
                existing.id = Some(id);
                self.update(&existing).await
            }
            Err(err) if err.is_not_found() => self.create(model).await,
            Err(err) => Err(err),
        }
    }

    /// Delete the resource
    ///
    /// Fire-and-forget: no completion polling beyond what the API server
    /// itself performs. Any error is fatal and surfaced verbatim.
    pub async fn delete(&self, model: &ResourceModel<K>) -> Result<()> {
        let id = self.identity(model)?;

        self.client
            .delete(&K::resource_type(), id.namespace(), id.name())
            .await?;

        info!(kind = K::KIND, id = %id, "deleted resource");
        Ok(())
    }

    /// Seed state from an operator-supplied `namespace/name` identifier
    ///
    /// Pure parsing, no API call; a malformed identifier fails before any
    /// state exists.
    pub fn import(identifier: &str) -> Result<ResourceModel<K>> {
        let id = ResourceId::parse(identifier)?;
        Ok(ResourceModel::imported(id))
    }

    async fn patch(&self, model: &ResourceModel<K>, id: &ResourceId) -> Result<ResourceDocument<K::Spec>> {
        let payload = serde_json::to_value(model.to_document())?;
        let options = self
            .config
            .apply_options(model.field_manager.as_deref(), model.force_conflicts);

        let obj = self
            .client
            .apply(&K::resource_type(), id.namespace(), id.name(), payload, &options)
            .await?;
        decode::<K>(obj)
    }

    fn identity(&self, model: &ResourceModel<K>) -> Result<ResourceId> {
        match &model.id {
            Some(id) => Ok(id.clone()),
            None => Ok(model.metadata.id()?),
        }
    }
}

/// Decode a server response into the kind's typed document
pub(crate) fn decode<K: CrdKind>(obj: DynamicObject) -> Result<ResourceDocument<K::Spec>> {
    let value = serde_json::to_value(&obj)?;
    Ok(serde_json::from_value(value)?)
}
