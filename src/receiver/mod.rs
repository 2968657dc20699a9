// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Signed HTTP access to the secret receiver.

pub mod client;
pub mod signing;

pub use client::{HttpReceiver, Receiver};
pub use signing::{base_string, sign};
