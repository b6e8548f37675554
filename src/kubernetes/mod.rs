// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, kind discovery, and dynamic object access.

pub mod client;
pub mod discovery;
pub mod objects;

pub use client::create_client;
pub use discovery::missing_kinds;
pub use objects::ObjectStore;
