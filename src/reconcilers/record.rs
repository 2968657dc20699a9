// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Record reconciler - decides whether a record must be created, updated or left alone.

use crate::error::Result;
use crate::receiver::Receiver;
use crate::types::{Outcome, RemoteState, SyncRecord};
use bytes::Bytes;
use http::Method;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Checksum-based sync of single records against the receiver.
///
/// The receiver is injected at construction so tests can swap in a double.
/// Nothing is re-read after a write: a successful create or update is taken
/// to mean the receiver now holds the record.
#[derive(Clone)]
pub struct Reconciler {
    receiver: Arc<dyn Receiver>,
}

impl Reconciler {
    pub fn new(receiver: Arc<dyn Receiver>) -> Self {
        Self { receiver }
    }

    /// Fetch the receiver's current state for `namespace/name`
    pub async fn check(&self, name: &str, namespace: &str) -> Result<RemoteState> {
        self.receiver.fetch(name, namespace).await
    }

    /// Create the record if absent, update it if its checksum differs, otherwise do nothing
    #[instrument(skip(self, record), fields(namespace = %record.namespace))]
    pub async fn reconcile(&self, name: &str, record: &SyncRecord) -> Result<Outcome> {
        let remote = self.check(name, &record.namespace).await?;

        let outcome = match remote {
            RemoteState::NotFound => {
                debug!("{} not found in receiver, creating", name);
                self.create(name, record).await?;
                Outcome::Created
            }
            ref found if found.matches(&record.checksum) => Outcome::Unchanged,
            RemoteState::Found(body) => {
                debug!(
                    "Checksum mismatch for {}: local {}, remote {}",
                    name,
                    record.checksum,
                    body.trim_end()
                );
                self.update(name, record).await?;
                Outcome::Updated
            }
        };

        info!("[OK] {} {}", name, outcome);
        Ok(outcome)
    }

    pub async fn create(&self, name: &str, record: &SyncRecord) -> Result<()> {
        self.write(Method::POST, name, record).await
    }

    pub async fn update(&self, name: &str, record: &SyncRecord) -> Result<()> {
        self.write(Method::PUT, name, record).await
    }

    pub async fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        self.receiver.remove(name, namespace).await?;
        info!("[OK] {}/{} deleted", namespace, name);
        Ok(())
    }

    async fn write(&self, method: Method, name: &str, record: &SyncRecord) -> Result<()> {
        let body = Bytes::from(record.to_wire()?);
        self.receiver.upsert(method, name, body).await
    }
}
