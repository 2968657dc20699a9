// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label-selector scans that publish every matching object to the receiver.

use crate::config::ScanOptions;
use crate::error::{PublisherError, Result};
use crate::kubernetes::{list_config_maps, list_secrets, SourceObject};
use crate::reconcilers::Reconciler;
use crate::types::{Outcome, SyncRecord};
use kube::Client;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{error, info, instrument, warn};

const SECRETS: &str = "secrets";
const CONFIG_MAPS: &str = "config maps";

/// Result of a scan in which no item failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport {
    /// The selector matched nothing; informational, not an error
    NotFound { kind: &'static str, selector: String },
    Completed {
        /// Destination name and action, in listing order
        synced: Vec<(String, Outcome)>,
        /// Source names skipped by the disabled-label filter
        skipped: Vec<String>,
    },
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanReport::NotFound { kind, selector } => {
                write!(f, "No {} found with label {}", kind, selector)
            }
            ScanReport::Completed { .. } => write!(f, "OK"),
        }
    }
}

/// Publishes label-selected Secrets and ConfigMaps one at a time, in listing order.
///
/// A failing item never stops the scan; failures are collected and reported
/// together once every item has been attempted.
pub struct Scanner<'a> {
    client: &'a Client,
    reconciler: &'a Reconciler,
    options: &'a ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(client: &'a Client, reconciler: &'a Reconciler, options: &'a ScanOptions) -> Self {
        Self {
            client,
            reconciler,
            options,
        }
    }

    /// Publish each matching Secret as-is
    #[instrument(skip(self))]
    pub async fn scan_secrets(&self, selector: &str) -> Result<ScanReport> {
        let items = list_secrets(self.client, &self.options.namespace, selector).await?;
        self.publish_all(SECRETS, selector, items, |item| Ok(self.mirror_record(item)))
            .await
    }

    /// Publish each matching ConfigMap as-is
    #[instrument(skip(self))]
    pub async fn scan_config_maps(&self, selector: &str) -> Result<ScanReport> {
        let items = list_config_maps(self.client, &self.options.namespace, selector).await?;
        self.publish_all(CONFIG_MAPS, selector, items, |item| Ok(self.mirror_record(item)))
            .await
    }

    /// Publish one sub-field of a YAML document stored in each matching Secret
    #[instrument(skip(self))]
    pub async fn scan_subvalues(&self, selector: &str) -> Result<ScanReport> {
        let (key, subkey) = self.options.split_match_key()?;
        let items = list_secrets(self.client, &self.options.namespace, selector).await?;
        self.publish_all(SECRETS, selector, items, |item| {
            self.subvalue_record(item, key, subkey)
        })
        .await
    }

    async fn publish_all<F>(
        &self,
        kind: &'static str,
        selector: &str,
        items: Vec<SourceObject>,
        build: F,
    ) -> Result<ScanReport>
    where
        F: Fn(&SourceObject) -> Result<SyncRecord>,
    {
        if items.is_empty() {
            info!("No {} found with label {}", kind, selector);
            return Ok(ScanReport::NotFound {
                kind,
                selector: selector.to_string(),
            });
        }

        let mut synced = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        for item in &items {
            if let Some(filter) = self.options.disabled_label.as_deref() {
                if item.is_disabled(filter) {
                    info!(
                        "Skipping {}/{}: disabled by label {}",
                        item.namespace, item.name, filter
                    );
                    skipped.push(item.name.clone());
                    continue;
                }
            }

            let result = match build(item) {
                Ok(record) => self
                    .reconciler
                    .reconcile(&record.name, &record)
                    .await
                    .map(|outcome| (record.name.clone(), outcome)),
                Err(e) => Err(e),
            };

            match result {
                Ok(entry) => synced.push(entry),
                Err(e) => {
                    error!("Failed to publish {}/{}: {}", item.namespace, item.name, e);
                    failed.push(item.name.clone());
                }
            }
        }

        if !failed.is_empty() {
            return Err(PublisherError::PartialBatchFailure {
                kind,
                names: failed,
            });
        }

        Ok(ScanReport::Completed { synced, skipped })
    }

    fn destination_namespace(&self, item: &SourceObject) -> String {
        self.options
            .destination_namespace
            .clone()
            .unwrap_or_else(|| item.namespace.clone())
    }

    /// Copy of the source object under its (optionally suffixed) name
    fn mirror_record(&self, item: &SourceObject) -> SyncRecord {
        let name = match self.options.name_suffix.as_deref() {
            Some(suffix) => format!("{}-{}", item.name, suffix),
            None => item.name.clone(),
        };

        SyncRecord::new(
            name,
            self.destination_namespace(item),
            item.data.clone(),
            item.labels.clone(),
            item.annotations.clone(),
        )
    }

    /// Record holding the single value `item.data[key]` → YAML → `subkey`.
    ///
    /// The record is named `<item>-<subkey>-<marker>` and its entry is keyed
    /// `<subkey>[-<middle>]-<marker>`, where the marker is read from the data
    /// field named by `name_suffix`.
    fn subvalue_record(&self, item: &SourceObject, key: &str, subkey: &str) -> Result<SyncRecord> {
        let marker = self.marker(item);

        let raw = item.data.get(key).ok_or_else(|| {
            PublisherError::ParseError(format!("{} has no data key {}", item.name, key))
        })?;
        let value = extract_subvalue(raw, subkey)
            .map_err(|e| PublisherError::ParseError(format!("{} key {}: {}", item.name, key, e)))?;

        let middle = self.options.middle_name.as_deref();
        let entry_key = join_segments(&[Some(subkey), middle, marker]);
        let name = join_segments(&[Some(item.name.as_str()), Some(subkey), marker]);

        Ok(SyncRecord::new(
            name,
            self.destination_namespace(item),
            BTreeMap::from([(entry_key, value)]),
            self.options.new_labels.clone(),
            self.options.new_annotations.clone(),
        ))
    }

    fn marker<'i>(&self, item: &'i SourceObject) -> Option<&'i str> {
        let field = self.options.name_suffix.as_deref()?;
        let marker = item.data.get(field).map(|v| v.trim());
        if marker.is_none() {
            warn!(
                "{} has no data key {}, publishing without marker",
                item.name, field
            );
        }
        marker.filter(|m| !m.is_empty())
    }
}

/// Parse `raw` as a YAML mapping and render the scalar at `subkey` as a string
fn extract_subvalue(raw: &str, subkey: &str) -> std::result::Result<String, String> {
    let document: BTreeMap<String, Value> =
        serde_yaml::from_str(raw).map_err(|e| format!("invalid YAML: {}", e))?;

    match document.get(subkey) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) => Ok(String::new()),
        Some(_) => Err(format!("{} is not a scalar value", subkey)),
        None => Err(format!("missing sub-key {}", subkey)),
    }
}

fn join_segments(segments: &[Option<&str>]) -> String {
    segments
        .iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
}
