// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use karmada_provider::config::Config;
use karmada_provider::error::ProviderError;
use karmada_provider::kubernetes::{create_client, missing_kinds};
use karmada_provider::provider::{manifest, KarmadaProvider};
use karmada_provider::types::kinds::{self, KindDescriptor, KINDS};
use karmada_provider::types::{ResourceConfig, ResourceId};

/// Manage Karmada policy objects with waits on their observed state
#[derive(Parser, Debug)]
#[command(name = "karmada-provider")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update the resource described in a file
    Apply {
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },
    /// Look up an existing object
    Get {
        /// Kind name or provider type name
        kind: String,
        /// `namespace/name` or, for cluster-scoped kinds, `name`
        id: String,
    },
    /// Adopt an existing object and print its state
    Import { kind: String, id: String },
    /// Delete the resource described in a file
    Delete {
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },
    /// Verify the API server serves every policy kind
    Check,
    /// List the supported kinds
    Kinds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Command::Kinds = cli.command {
        for kind in KINDS.iter() {
            println!("{}\t{}\t{:?}\t{}", kind.kind, kind.api_version(), kind.scope, kind.type_name());
        }
        return Ok(());
    }

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: field_manager={}, default_namespace={}",
        config.field_manager, config.default_namespace
    );

    let client = create_client(&config)
        .await
        .context("Failed to create Kubernetes client")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_signal.cancel();
        }
    });

    let provider = KarmadaProvider::new(client.clone(), config);

    match cli.command {
        Command::Apply { file } => {
            let (kind, resource) = load_resource(&file)?;
            let id = manifest::prepare(kind, &resource.manifest, &provider.config().default_namespace)?.id;

            let state = match provider.lookup(kind, &id).await {
                Ok(_) => provider.update(kind, &id, &resource, &cancel).await?,
                Err(ProviderError::NotFound(_)) => provider.create(kind, &resource, &cancel).await?,
                Err(e) => return Err(e.into()),
            };
            print_yaml(&state)
        }
        Command::Get { kind, id } => {
            let kind = kinds::lookup(&kind)?;
            let id = ResourceId::parse_for(kind, &id)?;
            print_yaml(&provider.lookup(kind, &id).await?)
        }
        Command::Import { kind, id } => {
            let kind = kinds::lookup(&kind)?;
            print_yaml(&provider.import_state(kind, &id).await?)
        }
        Command::Delete { file } => {
            let (kind, resource) = load_resource(&file)?;
            let id = manifest::prepare(kind, &resource.manifest, &provider.config().default_namespace)?.id;
            provider
                .delete(kind, &id, resource.delete_wait.as_ref(), &cancel)
                .await?;
            info!("Deleted {} {}", kind.kind, id);
            Ok(())
        }
        Command::Check => {
            let missing = missing_kinds(&client).await?;
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|k| k.kind).collect();
                bail!("API server does not serve: {}", names.join(", "));
            }
            Ok(())
        }
        Command::Kinds => Ok(()),
    }
}

fn load_resource(path: &Path) -> Result<(&'static KindDescriptor, ResourceConfig)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let resource = ResourceConfig::from_yaml(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let field = |name: &str| {
        resource
            .manifest
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let kind = kinds::for_manifest(&field("apiVersion"), &field("kind"))?;
    Ok((kind, resource))
}

fn print_yaml(value: &impl Serialize) -> Result<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}
