// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// HTTP headers attached to signed receiver requests
pub mod headers {
    /// Unix timestamp (seconds) the signature was computed for
    pub const REQUEST_TIMESTAMP: &str = "X-Request-Timestamp";
    /// `v0=<hex hmac>` signature over the base string
    pub const SIGNATURE: &str = "X-Signature";
}

/// Signature scheme markers
pub mod signing {
    /// Prefix of the signed base string (`v1:<timestamp>:<name>`)
    pub const BASE_STRING_VERSION: &str = "v1";
    /// Prefix of the produced signature (`v0=<hex>`)
    pub const SIGNATURE_VERSION: &str = "v0";
    /// Value of ENCODING_REQUEST that turns signing off
    pub const DISABLED: &str = "disabled";
}

/// What `check` prints when the receiver has no copy of the object
pub const NOT_FOUND_OUTPUT: &str = "notFound";

/// Request timeout used when COMMAND_TIMEOUT is missing or unparsable
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
