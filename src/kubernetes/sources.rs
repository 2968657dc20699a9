// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listing Secrets and ConfigMaps by label selector

use crate::error::Result;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::NamespaceResourceScope;
use kube::{api::ListParams, Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::{info, instrument};

/// The parts of a Secret or ConfigMap that get published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub name: String,
    pub namespace: String,
    pub data: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl SourceObject {
    /// Check the object against a `key` or `key=value` disabled-label filter
    pub fn is_disabled(&self, filter: &str) -> bool {
        match filter.split_once('=') {
            Some((key, value)) => self.labels.get(key).is_some_and(|v| v == value),
            None => self.labels.contains_key(filter),
        }
    }
}

impl From<Secret> for SourceObject {
    fn from(secret: Secret) -> Self {
        let name = secret.name_any();
        let namespace = secret.namespace().unwrap_or_default();
        let data = secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, String::from_utf8_lossy(&v.0).into_owned()))
            .collect();

        SourceObject {
            name,
            namespace,
            data,
            labels: secret.metadata.labels.unwrap_or_default(),
            annotations: secret.metadata.annotations.unwrap_or_default(),
        }
    }
}

impl From<ConfigMap> for SourceObject {
    fn from(config_map: ConfigMap) -> Self {
        SourceObject {
            name: config_map.name_any(),
            namespace: config_map.namespace().unwrap_or_default(),
            data: config_map.data.unwrap_or_default(),
            labels: config_map.metadata.labels.unwrap_or_default(),
            annotations: config_map.metadata.annotations.unwrap_or_default(),
        }
    }
}

/// List Secrets in `namespace` (all namespaces when empty) matching `selector`
#[instrument(skip(client))]
pub async fn list_secrets(
    client: &Client,
    namespace: &str,
    selector: &str,
) -> Result<Vec<SourceObject>> {
    let secrets = list::<Secret>(client, namespace, selector).await?;
    info!("Number of kubernetes secrets found: {}", secrets.len());
    Ok(secrets.into_iter().map(SourceObject::from).collect())
}

/// List ConfigMaps in `namespace` (all namespaces when empty) matching `selector`
#[instrument(skip(client))]
pub async fn list_config_maps(
    client: &Client,
    namespace: &str,
    selector: &str,
) -> Result<Vec<SourceObject>> {
    let config_maps = list::<ConfigMap>(client, namespace, selector).await?;
    info!("Number of kubernetes config maps found: {}", config_maps.len());
    Ok(config_maps.into_iter().map(SourceObject::from).collect())
}

async fn list<K>(client: &Client, namespace: &str, selector: &str) -> Result<Vec<K>>
where
    K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
    K::DynamicType: Default,
{
    let api: Api<K> = if namespace.is_empty() {
        Api::all(client.clone())
    } else {
        Api::namespaced(client.clone(), namespace)
    };

    let mut lp = ListParams::default();
    if !selector.is_empty() {
        lp = lp.labels(selector);
    }

    Ok(api.list(&lp).await?.items)
}
