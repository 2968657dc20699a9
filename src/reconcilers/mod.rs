// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation of records against the secret receiver.

pub mod record;

pub use record::Reconciler;
