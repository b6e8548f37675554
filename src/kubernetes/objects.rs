// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Dynamic-object access for one kind in one namespace

use crate::error::Result;
use crate::types::kinds::KindDescriptor;
use kube::{
    api::{DeleteParams, DynamicObject, Patch, PatchParams},
    Api, Client,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct ObjectStore {
    api: Api<DynamicObject>,
    kind: &'static str,
}

impl ObjectStore {
    pub fn new(client: Client, descriptor: &'static KindDescriptor, namespace: Option<&str>) -> Self {
        let ar = descriptor.api_resource();
        let api = match namespace {
            Some(namespace) => Api::namespaced_with(client, namespace, &ar),
            None => Api::all_with(client, &ar),
        };
        Self {
            api,
            kind: descriptor.kind,
        }
    }

    /// Fetch an object, `None` when the API server reports it missing
    pub async fn get(&self, name: &str) -> Result<Option<DynamicObject>> {
        Ok(self.api.get_opt(name).await?)
    }

    /// Fetch an object as JSON, `None` when it is missing
    pub async fn observe(&self, name: &str) -> Result<Option<Value>> {
        match self.get(name).await? {
            Some(object) => Ok(Some(serde_json::to_value(object)?)),
            None => Ok(None),
        }
    }

    /// Create or update an object with server-side apply
    #[instrument(skip(self, object), fields(kind = self.kind))]
    pub async fn apply(
        &self,
        name: &str,
        object: &DynamicObject,
        field_manager: &str,
        force: bool,
    ) -> Result<DynamicObject> {
        let mut pp = PatchParams::apply(field_manager);
        if force {
            pp = pp.force();
        }

        let applied = self.api.patch(name, &pp, &Patch::Apply(object)).await?;
        info!("Applied {} {}", self.kind, name);
        Ok(applied)
    }

    /// Delete an object; returns `false` when it was already gone
    #[instrument(skip(self), fields(kind = self.kind))]
    pub async fn delete(&self, name: &str) -> Result<bool> {
        match self.api.delete(name, &DeleteParams::default()).await {
            Ok(_) => {
                info!("Deleted {} {}", self.kind, name);
                Ok(true)
            }
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("{} {} already deleted", self.kind, name);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
