// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the Kubernetes API and the secret receiver.

use crate::error::{PublisherError, Result};
use crate::receiver::Receiver;
use crate::types::{RemoteState, SyncRecord};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, Response};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        // Query strings (labelSelector) are ignored when matching
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json(&path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Wrap serialized objects into a `<kind>List` response body
pub fn list_json<T: serde::Serialize>(kind: &str, items: &[T]) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": format!("{}List", kind),
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
    .to_string()
}

fn string_map(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

pub fn make_secret(
    name: &str,
    namespace: &str,
    data: &[(&str, &str)],
    labels: &[(&str, &str)],
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: string_map(labels),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
                .collect(),
        ),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

pub fn make_config_map(
    name: &str,
    namespace: &str,
    data: &[(&str, &str)],
    labels: &[(&str, &str)],
) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: string_map(labels),
            ..Default::default()
        },
        data: string_map(data),
        ..Default::default()
    }
}

/// A call observed by [`RecordingReceiver`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch { name: String, namespace: String },
    Upsert { method: Method, name: String, body: Vec<u8> },
    Remove { name: String, namespace: String },
}

/// In-memory receiver that records every call and echoes back stored checksums.
#[derive(Default)]
pub struct RecordingReceiver {
    calls: Mutex<Vec<Call>>,
    stored: Mutex<HashMap<(String, String), String>>,
    failing_writes: HashSet<String>,
    fetch_failure: Option<String>,
}

impl RecordingReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the receiver already holds `checksum` for `namespace/name`
    pub fn with_stored(self, namespace: &str, name: &str, checksum: &str) -> Self {
        self.stored.lock().unwrap().insert(
            (namespace.to_string(), name.to_string()),
            checksum.to_string(),
        );
        self
    }

    /// Make every POST/PUT for `name` fail with a 500
    pub fn fail_writes_for(mut self, name: &str) -> Self {
        self.failing_writes.insert(name.to_string());
        self
    }

    /// Make every GET fail with `status`
    pub fn fail_fetch(mut self, status: &str) -> Self {
        self.fetch_failure = Some(status.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upserts(&self, method: &Method) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Upsert { method: m, .. } if m == method))
            .count()
    }

    pub fn removes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Remove { .. }))
            .count()
    }

    /// Records received by POST/PUT, in call order
    pub fn written(&self) -> Vec<SyncRecord> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                Call::Upsert { body, .. } => serde_json::from_slice(body).ok(),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Receiver for RecordingReceiver {
    async fn fetch(&self, name: &str, namespace: &str) -> Result<RemoteState> {
        self.calls.lock().unwrap().push(Call::Fetch {
            name: name.to_string(),
            namespace: namespace.to_string(),
        });

        if let Some(status) = &self.fetch_failure {
            return Err(PublisherError::ReceiverError {
                context: format!("GET {}/{}", namespace, name),
                status: status.clone(),
            });
        }

        Ok(self
            .stored
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .map(|sum| RemoteState::Found(format!("\"{}\"\n", sum)))
            .unwrap_or(RemoteState::NotFound))
    }

    async fn upsert(&self, method: Method, name: &str, body: Bytes) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Upsert {
            method: method.clone(),
            name: name.to_string(),
            body: body.to_vec(),
        });

        if self.failing_writes.contains(name) {
            return Err(PublisherError::ReceiverError {
                context: format!("{} {}", method, name),
                status: "500 Internal Server Error".to_string(),
            });
        }

        let record: SyncRecord = serde_json::from_slice(&body)?;
        self.stored
            .lock()
            .unwrap()
            .insert((record.namespace, name.to_string()), record.checksum);
        Ok(())
    }

    async fn remove(&self, name: &str, namespace: &str) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Remove {
            name: name.to_string(),
            namespace: namespace.to_string(),
        });
        self.stored
            .lock()
            .unwrap()
            .remove(&(namespace.to_string(), name.to_string()));
        Ok(())
    }
}
