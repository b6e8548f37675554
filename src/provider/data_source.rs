// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only lookups of policy objects the provider does not manage.

use crate::error::{ProviderError, Result};
use crate::provider::{manifest, KarmadaProvider};
use crate::types::kinds::KindDescriptor;
use crate::types::resource::ResourceId;
use serde_json::Value;
use tracing::{debug, instrument};

impl KarmadaProvider {
    /// Fetch a single object by id; a missing object is an error for data sources
    #[instrument(skip(self, kind, id), fields(kind = kind.kind, id = %id))]
    pub async fn lookup(&self, kind: &'static KindDescriptor, id: &ResourceId) -> Result<Value> {
        id.ensure_scope(kind)?;
        let store = self.store(kind, id.namespace.as_deref());

        let object = store
            .get(&id.name)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("{} {}", kind.kind, id)))?;

        debug!("Found {} {}", kind.kind, id);
        manifest::observed(&object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_utils::{policy_json, MockService};
    use crate::types::kinds::{CLUSTER_PROPAGATION_POLICY, OVERRIDE_POLICY};
    use serde_json::json;

    const OP_PATH: &str =
        "/apis/policy.karmada.io/v1alpha1/namespaces/apps/overridepolicies/nginx-override";

    #[tokio::test]
    async fn test_lookup_returns_object() {
        let mock = MockService::new().on_get(
            OP_PATH,
            200,
            &policy_json(
                "OverridePolicy",
                Some("apps"),
                "nginx-override",
                json!({
                    "resourceSelectors": [{ "apiVersion": "apps/v1", "kind": "Deployment", "name": "nginx" }],
                    "overrideRules": [{
                        "targetCluster": { "clusterNames": ["member1"] },
                        "overriders": {
                            "imageOverrider": [{ "component": "Registry", "operator": "replace", "value": "registry.local" }]
                        }
                    }]
                }),
                None,
            ),
        );
        let provider = KarmadaProvider::new(mock.clone().into_client(), Config::default());

        let object = provider
            .lookup(&OVERRIDE_POLICY, &ResourceId::new(Some("apps"), "nginx-override"))
            .await
            .unwrap();

        assert_eq!(object["kind"], "OverridePolicy");
        assert_eq!(
            object["spec"]["overrideRules"][0]["targetCluster"]["clusterNames"][0],
            "member1"
        );
        assert_eq!(mock.calls("GET", OP_PATH), 1);
    }

    #[tokio::test]
    async fn test_lookup_of_missing_object_fails() {
        let provider = KarmadaProvider::new(MockService::new().into_client(), Config::default());

        let result = provider
            .lookup(&OVERRIDE_POLICY, &ResourceId::new(Some("apps"), "nginx-override"))
            .await;

        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_lookup_checks_scope() {
        let provider = KarmadaProvider::new(MockService::new().into_client(), Config::default());

        let result = provider
            .lookup(&CLUSTER_PROPAGATION_POLICY, &ResourceId::new(Some("apps"), "all"))
            .await;

        assert!(matches!(result, Err(ProviderError::InvalidResourceId(_))));
    }
}
