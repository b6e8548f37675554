// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from provider configuration

use crate::config::Config;
use crate::error::{ProviderError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client for the Karmada API server
#[instrument(skip(config))]
pub async fn create_client(config: &Config) -> Result<Client> {
    if let Some(kubeconfig) = &config.kubeconfig_data {
        info!("Using inline kubeconfig");
        return create_client_from_kubeconfig(kubeconfig, config.context.as_deref()).await;
    }

    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..Default::default()
    };

    let client_config = match &config.kubeconfig {
        Some(path) => {
            info!("Loading kubeconfig from {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                ProviderError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            KConfig::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| {
                    ProviderError::KubeconfigError(format!("Failed to create config: {}", e))
                })?
        }
        None if config.context.is_some() => KConfig::from_kubeconfig(&options)
            .await
            .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create config: {}", e)))?,
        None => KConfig::infer()
            .await
            .map_err(|e| ProviderError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    debug!("Using cluster URL {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Create a client from an in-memory kubeconfig document
pub async fn create_client_from_kubeconfig(kubeconfig: &str, context: Option<&str>) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig).map_err(|e| {
        ProviderError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e))
    })?;

    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let client_config = KConfig::from_custom_kubeconfig(kubeconfig_parsed, &options)
        .await
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    Client::try_from(client_config)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create client: {}", e)))
}
