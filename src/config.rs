// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{signing, DEFAULT_TIMEOUT_SECS};
use crate::error::{PublisherError, Result};
use crate::types::SyncRecord;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Process-wide settings, read once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the secret receiver
    pub receiver_url: Url,
    /// HMAC key for request signing, `None` when signing is disabled
    pub signing_secret: Option<String>,
    /// Per-request timeout against the receiver
    pub timeout: Duration,
    /// Use ~/.kube/config instead of the in-cluster service account
    pub local_kubeconfig: bool,
    pub debug: bool,
}

impl Config {
    pub fn new(
        receiver_url: Option<&str>,
        encoding_request: Option<&str>,
        command_timeout: Option<&str>,
        local_kubeconfig: bool,
        debug: bool,
    ) -> Result<Self> {
        let receiver_url = match receiver_url.map(str::trim) {
            Some(url) if !url.is_empty() => Url::parse(url).map_err(|e| {
                PublisherError::ConfigurationError(format!("Invalid receiver URL {}: {}", url, e))
            })?,
            _ => {
                return Err(PublisherError::ConfigurationError(
                    "ReceiverURL is empty".to_string(),
                ))
            }
        };

        let signing_secret = encoding_request
            .filter(|s| !s.is_empty() && *s != signing::DISABLED)
            .map(str::to_string);

        let timeout_secs = command_timeout
            .and_then(|t| t.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Config {
            receiver_url,
            signing_secret,
            timeout: Duration::from_secs(timeout_secs),
            local_kubeconfig,
            debug,
        })
    }

    pub fn signing_enabled(&self) -> bool {
        self.signing_secret.is_some()
    }
}

/// Inputs for the single-object commands (exist, create, update)
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    pub namespace: String,
    pub data: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl RecordOptions {
    pub fn to_record(&self, name: &str) -> SyncRecord {
        SyncRecord::new(
            name,
            self.namespace.clone(),
            self.data.clone(),
            self.labels.clone(),
            self.annotations.clone(),
        )
    }
}

/// Inputs shared by the label-selector scans
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Namespace to list from; empty lists across all namespaces
    pub namespace: String,
    /// Namespace to publish into; defaults to the source object's namespace
    pub destination_namespace: Option<String>,
    /// Name suffix for secret/configmap scans. For sub-value scans this
    /// names the data field that holds the marker value instead.
    pub name_suffix: Option<String>,
    /// `key` or `key=value`; matching objects are skipped
    pub disabled_label: Option<String>,
    /// `key.subkey` for sub-value scans
    pub match_key: Option<String>,
    pub middle_name: Option<String>,
    pub new_labels: BTreeMap<String, String>,
    pub new_annotations: BTreeMap<String, String>,
}

impl ScanOptions {
    /// Split `match_key` into its data key and embedded sub-key
    pub fn split_match_key(&self) -> Result<(&str, &str)> {
        self.match_key
            .as_deref()
            .and_then(|k| k.split_once('.'))
            .filter(|(key, subkey)| !key.is_empty() && !subkey.is_empty())
            .ok_or_else(|| {
                PublisherError::ConfigurationError("--matchKey must be key.subkey".to_string())
            })
    }
}

/// Parse `a=b,c=d` into a sorted map. Pairs without exactly one `=` are dropped.
pub fn parse_key_values(input: &str) -> BTreeMap<String, String> {
    input
        .split(',')
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(k), Some(v), None) if !k.trim().is_empty() => {
                    Some((k.trim().to_string(), v.trim().to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Treat empty strings coming from unset env vars as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
