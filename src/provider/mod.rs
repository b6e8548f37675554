// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The generic resource engine and data sources for every registered kind.

pub mod data_source;
pub mod manifest;
pub mod resource;

use crate::config::Config;
use crate::kubernetes::ObjectStore;
use crate::types::kinds::KindDescriptor;
use kube::Client;
use std::sync::Arc;

/// Entry point for all provider operations.
///
/// Owns the API client; every operation receives the kind it acts on, so a
/// single instance serves all kinds.
#[derive(Clone)]
pub struct KarmadaProvider {
    client: Client,
    config: Arc<Config>,
}

impl KarmadaProvider {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn store(&self, kind: &'static KindDescriptor, namespace: Option<&str>) -> ObjectStore {
        ObjectStore::new(self.client.clone(), kind, namespace)
    }
}
