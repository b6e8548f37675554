// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create, read, update, delete and import for managed policy objects.

use crate::error::{ProviderError, Result};
use crate::kubernetes::ObjectStore;
use crate::provider::manifest::{self, PreparedManifest};
use crate::provider::KarmadaProvider;
use crate::types::kinds::KindDescriptor;
use crate::types::resource::{ResourceConfig, ResourceId, ResourceState};
use crate::wait::{observe, wait_for, DeleteWait, WaitSpec};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

impl KarmadaProvider {
    /// Apply a new object and wait for its `wait_for` conditions
    #[instrument(skip(self, kind, resource, cancel), fields(kind = kind.kind))]
    pub async fn create(
        &self,
        kind: &'static KindDescriptor,
        resource: &ResourceConfig,
        cancel: &CancellationToken,
    ) -> Result<ResourceState> {
        let prepared =
            manifest::prepare(kind, &resource.manifest, &self.config.default_namespace)?;
        info!("Creating {} {}", kind.kind, prepared.id);
        self.upsert(kind, prepared, resource, cancel).await
    }

    /// Re-apply an existing object; name and namespace cannot change in place
    #[instrument(skip(self, kind, prior, resource, cancel), fields(kind = kind.kind, id = %prior))]
    pub async fn update(
        &self,
        kind: &'static KindDescriptor,
        prior: &ResourceId,
        resource: &ResourceConfig,
        cancel: &CancellationToken,
    ) -> Result<ResourceState> {
        let prepared =
            manifest::prepare(kind, &resource.manifest, &self.config.default_namespace)?;
        if prepared.id != *prior {
            return Err(ProviderError::RequiresReplace(format!(
                "{} '{}' would become '{}'",
                kind.kind, prior, prepared.id
            )));
        }
        info!("Updating {} {}", kind.kind, prepared.id);
        self.upsert(kind, prepared, resource, cancel).await
    }

    /// Refresh state from the API server; `None` when the object no longer exists
    #[instrument(skip(self, kind, prior), fields(kind = kind.kind, id = %prior.id))]
    pub async fn read(
        &self,
        kind: &'static KindDescriptor,
        prior: &ResourceState,
    ) -> Result<Option<ResourceState>> {
        prior.id.ensure_scope(kind)?;
        let store = self.store(kind, prior.id.namespace.as_deref());

        let Some(object) = store.get(&prior.id.name).await? else {
            info!("{} {} no longer exists", kind.kind, prior.id);
            return Ok(None);
        };

        Ok(Some(ResourceState {
            id: prior.id.clone(),
            manifest: prior.manifest.clone(),
            object: manifest::observed(&object)?,
        }))
    }

    /// Delete the object, then wait for it to disappear when `delete_wait` is set
    #[instrument(skip(self, kind, id, delete_wait, cancel), fields(kind = kind.kind, id = %id))]
    pub async fn delete(
        &self,
        kind: &'static KindDescriptor,
        id: &ResourceId,
        delete_wait: Option<&DeleteWait>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        id.ensure_scope(kind)?;
        let store = self.store(kind, id.namespace.as_deref());

        store.delete(&id.name).await?;

        if let Some(wait) = delete_wait {
            await_target(&store, &id.name, &wait.to_spec(), cancel).await?;
        }
        Ok(())
    }

    /// Adopt an existing object into state from its id string
    #[instrument(skip(self, kind), fields(kind = kind.kind))]
    pub async fn import_state(
        &self,
        kind: &'static KindDescriptor,
        raw_id: &str,
    ) -> Result<ResourceState> {
        let id = ResourceId::parse_for(kind, raw_id)?;
        let store = self.store(kind, id.namespace.as_deref());

        let object = store
            .get(&id.name)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("{} {}", kind.kind, id)))?;
        let object = manifest::observed(&object)?;

        info!("Imported {} {}", kind.kind, id);
        Ok(ResourceState {
            id,
            manifest: manifest::strip_server_fields(&object),
            object,
        })
    }

    async fn upsert(
        &self,
        kind: &'static KindDescriptor,
        prepared: PreparedManifest,
        resource: &ResourceConfig,
        cancel: &CancellationToken,
    ) -> Result<ResourceState> {
        let PreparedManifest {
            id,
            manifest: applied_manifest,
            object,
        } = prepared;
        let store = self.store(kind, id.namespace.as_deref());

        let field_manager = resource
            .field_manager
            .as_deref()
            .unwrap_or(&self.config.field_manager);
        let force = resource
            .force_conflicts
            .unwrap_or(self.config.force_conflicts);

        let applied = store.apply(&id.name, &object, field_manager, force).await?;

        // Conditions are awaited one after another, each with its own budget
        for wait in &resource.wait_for {
            await_target(&store, &id.name, &wait.to_spec(), cancel).await?;
        }

        let latest = if resource.wait_for.is_empty() {
            applied
        } else {
            store.get(&id.name).await?.unwrap_or(applied)
        };

        Ok(ResourceState {
            id,
            manifest: applied_manifest,
            object: manifest::observed(&latest)?,
        })
    }
}

async fn await_target(
    store: &ObjectStore,
    name: &str,
    spec: &WaitSpec,
    cancel: &CancellationToken,
) -> Result<()> {
    debug!(
        "Waiting up to {}s for {} on {}",
        spec.timeout, spec.target, name
    );
    let target = &spec.target;
    wait_for(spec, cancel, || async move {
        let object = store.observe(name).await?;
        Ok(observe(target, object.as_ref()))
    })
    .await
}
