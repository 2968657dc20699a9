// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label-selector scans over Secrets and ConfigMaps.

pub mod scanner;

pub use scanner::{ScanReport, Scanner};
