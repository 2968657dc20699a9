// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::collections::BTreeMap;
use std::fmt;

/// The object published to the secret receiver.
///
/// `checksum` is derived from `data` and is the only field compared against
/// the receiver's copy. Build records through [`SyncRecord::new`] so the two
/// cannot drift apart.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SyncRecord {
    pub name: String,
    pub namespace: String,
    pub checksum: String,
    pub data: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl SyncRecord {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        data: BTreeMap<String, String>,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> Self {
        SyncRecord {
            name: name.into(),
            namespace: namespace.into(),
            checksum: checksum(&data),
            data,
            labels,
            annotations,
        }
    }

    /// JSON body sent on POST/PUT
    pub fn to_wire(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Hex SHA-512 of all values concatenated in ascending key order.
///
/// Same output as `echo -n "$values" | shasum -a 512`.
pub fn checksum(data: &BTreeMap<String, String>) -> String {
    let mut hasher = Sha512::new();
    for value in data.values() {
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Drop every double quote and any trailing newlines from a receiver body
pub fn strip_quotes(body: &str) -> String {
    body.replace('"', "").trim_end_matches('\n').to_string()
}

/// What the receiver holds for a given name/namespace
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteState {
    /// Raw response body, usually the stored checksum as a JSON string
    Found(String),
    NotFound,
}

impl RemoteState {
    /// True iff the receiver's copy has exactly this checksum
    pub fn matches(&self, checksum: &str) -> bool {
        match self {
            RemoteState::Found(body) => strip_quotes(body) == checksum,
            RemoteState::NotFound => false,
        }
    }
}

/// Action taken by a reconciliation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created => write!(f, "Created"),
            Outcome::Updated => write!(f, "Updated"),
            Outcome::Unchanged => write!(f, "already exist"),
        }
    }
}
