// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply when none is configured
pub const FIELD_MANAGER: &str = "karmada-provider";

/// Namespace assigned to namespaced manifests that do not set one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Karmada policy API group and version
pub mod policy {
    pub const GROUP: &str = "policy.karmada.io";
    pub const VERSION: &str = "v1alpha1";
}

/// Wait polling defaults
pub mod wait {
    /// Maximum time to wait for a condition, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Delay between successive checks, in seconds
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
    /// Lower bound on the delay between checks, in milliseconds
    pub const MIN_POLL_INTERVAL_MILLIS: u64 = 100;
}
