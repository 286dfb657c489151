//! In-memory `DynamicClient` for handler tests
//!
//! Stores objects keyed by kind and `namespace/name`, records every call
//! with its effective apply options, and can simulate server-side
//! defaulting by injecting labels into apply responses.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use kube::api::DynamicObject;

use meshform_core::ResourceType;

use crate::config::ApplyOptions;
use crate::error::{KubeError, Result};

/// One observed client call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub kind: String,
    pub id: String,
    /// Payload sent for apply calls
    pub payload: Option<serde_json::Value>,
    /// Effective options for apply calls
    pub options: Option<ApplyOptions>,
}

/// In-memory mock cluster
#[derive(Default)]
pub struct MockClient {
    objects: Mutex<HashMap<(String, String), serde_json::Value>>,
    calls: Mutex<Vec<RecordedCall>>,
    server_labels: Vec<(String, String)>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a label into every apply response, simulating a server that
    /// adds defaulted metadata
    pub fn with_server_label(mut self, key: &str, value: &str) -> Self {
        self.server_labels.push((key.to_string(), value.to_string()));
        self
    }

    /// Snapshot of all calls made so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn key(ty: &ResourceType, namespace: &str, name: &str) -> (String, String) {
        (ty.kind.to_string(), format!("{}/{}", namespace, name))
    }
}

#[async_trait]
impl crate::client::DynamicClient for MockClient {
    async fn get(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<DynamicObject> {
        let key = Self::key(ty, namespace, name);
        self.record(RecordedCall {
            operation: "get",
            kind: key.0.clone(),
            id: key.1.clone(),
            payload: None,
            options: None,
        });

        let stored = self.objects.lock().unwrap().get(&key).cloned();
        match stored {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(KubeError::NotFound {
                kind: key.0,
                id: key.1,
            }),
        }
    }

    async fn apply(
        &self,
        ty: &ResourceType,
        namespace: &str,
        name: &str,
        payload: serde_json::Value,
        options: &ApplyOptions,
    ) -> Result<DynamicObject> {
        let key = Self::key(ty, namespace, name);
        self.record(RecordedCall {
            operation: "apply",
            kind: key.0.clone(),
            id: key.1.clone(),
            payload: Some(payload.clone()),
            options: Some(options.clone()),
        });

        let mut stored = payload;
        for (label, value) in &self.server_labels {
            stored["metadata"]["labels"][label] = serde_json::Value::String(value.clone());
        }
        self.objects.lock().unwrap().insert(key, stored.clone());

        Ok(serde_json::from_value(stored)?)
    }

    async fn delete(&self, ty: &ResourceType, namespace: &str, name: &str) -> Result<()> {
        let key = Self::key(ty, namespace, name);
        self.record(RecordedCall {
            operation: "delete",
            kind: key.0.clone(),
            id: key.1.clone(),
            payload: None,
            options: None,
        });

        match self.objects.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(KubeError::NotFound {
                kind: key.0,
                id: key.1,
            }),
        }
    }
}
