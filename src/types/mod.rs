// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Data published to the secret receiver.

pub mod record;

pub use record::{checksum, strip_quotes, Outcome, RemoteState, SyncRecord};
