// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation

use crate::config::Config;
use crate::error::{PublisherError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::env;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Create a client from the in-cluster service account, or from
/// `~/.kube/config` when `local_kubeconfig` is set.
#[instrument(skip(config), fields(local = config.local_kubeconfig))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = if config.local_kubeconfig {
        local_config().await?
    } else {
        KConfig::incluster().map_err(|e| {
            PublisherError::KubeconfigError(format!("Failed to load in-cluster config: {}", e))
        })?
    };

    debug!("Using Kubernetes API at {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| PublisherError::KubeconfigError(format!("Failed to create client: {}", e)))
}

async fn local_config() -> Result<KConfig> {
    let path = kubeconfig_path().ok_or_else(|| {
        PublisherError::KubeconfigError("Neither HOME nor USERPROFILE is set".to_string())
    })?;
    debug!("Reading kubeconfig from {}", path.display());

    let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
        PublisherError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| PublisherError::KubeconfigError(format!("Failed to create config: {}", e)))
}

fn kubeconfig_path() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".kube").join("config"))
}
