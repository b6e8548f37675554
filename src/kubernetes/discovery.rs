// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Checks that the API server serves the Karmada policy kinds

use crate::constants::policy::GROUP;
use crate::error::Result;
use crate::types::kinds::{KindDescriptor, KINDS};
use kube::api::ApiResource;
use kube::{discovery::Discovery, Client};
use tracing::{info, instrument, warn};

/// Return the registered kinds the API server does not serve.
#[instrument(skip(client))]
pub async fn missing_kinds(client: &Client) -> Result<Vec<&'static KindDescriptor>> {
    let discovery = Discovery::new(client.clone())
        .filter(&[GROUP])
        .run()
        .await?;

    let served: Vec<ApiResource> = discovery
        .groups()
        .filter(|group| group.name() == GROUP)
        .flat_map(|group| group.versions().flat_map(move |version| group.versioned_resources(version)))
        .map(|(ar, _)| ar)
        .collect();

    let missing = missing_from(&served);
    for kind in &missing {
        warn!("{} ({}) is not served by the API server", kind.kind, kind.api_version());
    }
    if missing.is_empty() {
        info!("All {} policy kinds are served", KINDS.len());
    }

    Ok(missing)
}

/// Registered kinds with no matching kind and version among `served`
pub fn missing_from(served: &[ApiResource]) -> Vec<&'static KindDescriptor> {
    KINDS
        .iter()
        .filter(|kind| {
            !served
                .iter()
                .any(|ar| ar.kind == kind.kind && ar.api_version == kind.api_version())
        })
        .collect()
}
