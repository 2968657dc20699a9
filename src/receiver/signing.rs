// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HMAC-SHA256 request signing

use crate::constants::signing::{BASE_STRING_VERSION, SIGNATURE_VERSION};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Message that gets signed for a request about `name`
pub fn base_string(timestamp: &str, name: &str) -> String {
    format!("{}:{}:{}", BASE_STRING_VERSION, timestamp, name)
}

/// Compute `v0=<hex hmac-sha256(secret, message)>`.
///
/// Returns an empty string if the MAC cannot be keyed; callers must refuse
/// to send a request with an empty signature.
pub fn sign(timestamp: &str, message: &str, secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            warn!("Failed to key HMAC for timestamp {}: {}", timestamp, e);
            return String::new();
        }
    };
    mac.update(message.as_bytes());
    format!(
        "{}={}",
        SIGNATURE_VERSION,
        hex::encode(mac.finalize().into_bytes())
    )
}
