// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("timeout exceeded while waiting for {description} (after {timeout}s)")]
    Timeout { description: String, timeout: u64 },

    #[error("wait cancelled while waiting for {0}")]
    Cancelled(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid field path '{path}': {reason}")]
    InvalidFieldPath { path: String, reason: String },

    #[error("Invalid resource id: {0}")]
    InvalidResourceId(String),

    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    #[error("Resource must be replaced: {0}")]
    RequiresReplace(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
