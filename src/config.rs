// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{DEFAULT_NAMESPACE, FIELD_MANAGER};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Provider configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit kubeconfig file; when unset the client is inferred from the environment
    pub kubeconfig: Option<PathBuf>,
    /// Inline kubeconfig document, preferred over `kubeconfig` when set
    pub kubeconfig_data: Option<String>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    /// Field manager name for server-side apply
    pub field_manager: String,
    /// Take ownership of fields managed by other field managers
    pub force_conflicts: bool,
    /// Namespace for namespaced manifests without metadata.namespace
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kubeconfig: None,
            kubeconfig_data: None,
            context: None,
            field_manager: FIELD_MANAGER.to_string(),
            force_conflicts: true,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let force_conflicts = match lookup("KARMADA_FORCE_CONFLICTS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("KARMADA_FORCE_CONFLICTS must be true or false, got '{}'", raw))?,
            None => defaults.force_conflicts,
        };

        Ok(Config {
            kubeconfig: lookup("KARMADA_KUBECONFIG").map(PathBuf::from),
            kubeconfig_data: lookup("KARMADA_KUBECONFIG_DATA"),
            context: lookup("KARMADA_CONTEXT"),
            field_manager: lookup("KARMADA_FIELD_MANAGER").unwrap_or(defaults.field_manager),
            force_conflicts,
            default_namespace: lookup("KARMADA_DEFAULT_NAMESPACE")
                .unwrap_or(defaults.default_namespace),
        })
    }
}
