// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and listing source objects.

pub mod client;
pub mod sources;

pub use client::create_client;
pub use sources::{list_config_maps, list_secrets, SourceObject};
