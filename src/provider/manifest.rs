// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest checks and conversions between user manifests and dynamic objects.

use crate::error::{ProviderError, Result};
use crate::types::kinds::KindDescriptor;
use crate::types::resource::ResourceId;
use kube::api::DynamicObject;
use serde_json::Value;

/// Metadata fields populated by the API server
const SERVER_METADATA: &[&str] = &[
    "uid",
    "resourceVersion",
    "generation",
    "creationTimestamp",
    "deletionTimestamp",
    "deletionGracePeriodSeconds",
    "managedFields",
    "selfLink",
];

/// A manifest that passed every check and is ready to apply
#[derive(Debug, Clone)]
pub struct PreparedManifest {
    pub id: ResourceId,
    /// The manifest with defaults filled in
    pub manifest: Value,
    pub object: DynamicObject,
}

/// Parse a YAML or JSON document into a manifest value
pub fn parse_manifest(text: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(text)?)
}

fn invalid(message: impl Into<String>) -> ProviderError {
    ProviderError::InvalidManifest(message.into())
}

/// Check a manifest against its kind and turn it into an object to apply
pub fn prepare(
    kind: &'static KindDescriptor,
    manifest: &Value,
    default_namespace: &str,
) -> Result<PreparedManifest> {
    if !manifest.is_object() {
        return Err(invalid("manifest must be a mapping"));
    }

    let api_version = manifest.get("apiVersion").and_then(Value::as_str);
    if api_version != Some(kind.api_version().as_str()) {
        return Err(invalid(format!(
            "apiVersion must be '{}', got {:?}",
            kind.api_version(),
            api_version
        )));
    }

    let declared_kind = manifest.get("kind").and_then(Value::as_str);
    if declared_kind != Some(kind.kind) {
        return Err(invalid(format!(
            "kind must be '{}', got {:?}",
            kind.kind, declared_kind
        )));
    }

    let name = manifest
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| invalid("metadata.name is required"))?
        .to_string();

    let namespace = manifest
        .pointer("/metadata/namespace")
        .and_then(Value::as_str)
        .filter(|ns| !ns.is_empty());

    let namespace = match (kind.is_namespaced(), namespace) {
        (true, Some(ns)) => Some(ns.to_string()),
        (true, None) => Some(default_namespace.to_string()),
        (false, None) => None,
        (false, Some(ns)) => {
            return Err(invalid(format!(
                "{} is cluster-scoped and cannot set metadata.namespace ('{}')",
                kind.kind, ns
            )))
        }
    };

    kind.validate(manifest)?;

    let mut manifest = manifest.clone();
    if let Some(ns) = &namespace {
        manifest["metadata"]["namespace"] = Value::String(ns.clone());
    }

    let object: DynamicObject = serde_json::from_value(manifest.clone())?;

    Ok(PreparedManifest {
        id: ResourceId::new(namespace.as_deref(), &name),
        manifest,
        object,
    })
}

/// The observed object without managed-fields bookkeeping
pub fn observed(object: &DynamicObject) -> Result<Value> {
    let mut value = serde_json::to_value(object)?;
    if let Some(metadata) = value.get_mut("metadata").and_then(Value::as_object_mut) {
        metadata.remove("managedFields");
    }
    Ok(value)
}

/// A manifest reconstructed from a live object, for import
pub fn strip_server_fields(object: &Value) -> Value {
    let mut manifest = object.clone();
    if let Some(map) = manifest.as_object_mut() {
        map.remove("status");
        if let Some(metadata) = map.get_mut("metadata").and_then(Value::as_object_mut) {
            for field in SERVER_METADATA {
                metadata.remove(*field);
            }
            let empty_annotations = metadata
                .get("annotations")
                .and_then(Value::as_object)
                .is_some_and(|a| a.is_empty());
            if empty_annotations {
                metadata.remove("annotations");
            }
        }
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::kinds::{CLUSTER_PROPAGATION_POLICY, FEDERATED_RESOURCE_QUOTA};
    use serde_json::json;

    fn quota(metadata: Value) -> Value {
        json!({
            "apiVersion": "policy.karmada.io/v1alpha1",
            "kind": "FederatedResourceQuota",
            "metadata": metadata,
            "spec": { "overall": { "cpu": "10" } }
        })
    }

    #[test]
    fn test_parse_manifest_yaml() {
        let manifest = parse_manifest(
            "apiVersion: policy.karmada.io/v1alpha1\nkind: OverridePolicy\nmetadata:\n  name: nginx\n",
        )
        .unwrap();
        assert_eq!(manifest["metadata"]["name"], "nginx");
    }

    #[test]
    fn test_namespace_defaults_for_namespaced_kind() {
        let prepared = prepare(&FEDERATED_RESOURCE_QUOTA, &quota(json!({"name": "team-a"})), "default").unwrap();

        assert_eq!(prepared.id, ResourceId::new(Some("default"), "team-a"));
        assert_eq!(prepared.manifest["metadata"]["namespace"], "default");
        assert_eq!(prepared.object.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(prepared.object.data["spec"]["overall"]["cpu"], "10");
    }

    #[test]
    fn test_explicit_namespace_is_kept() {
        let prepared = prepare(
            &FEDERATED_RESOURCE_QUOTA,
            &quota(json!({"name": "team-a", "namespace": "team-a"})),
            "default",
        )
        .unwrap();

        assert_eq!(prepared.id.to_string(), "team-a/team-a");
    }

    #[test]
    fn test_cluster_scoped_kind_rejects_namespace() {
        let manifest = json!({
            "apiVersion": "policy.karmada.io/v1alpha1",
            "kind": "ClusterPropagationPolicy",
            "metadata": { "name": "all", "namespace": "default" },
            "spec": { "resourceSelectors": [{ "apiVersion": "v1", "kind": "ConfigMap" }] }
        });

        let err = prepare(&CLUSTER_PROPAGATION_POLICY, &manifest, "default").unwrap_err();
        assert!(err.to_string().contains("cluster-scoped"), "{}", err);
    }

    #[test]
    fn test_kind_and_version_must_match() {
        let mut manifest = quota(json!({"name": "team-a"}));
        manifest["kind"] = json!("OverridePolicy");
        assert!(prepare(&FEDERATED_RESOURCE_QUOTA, &manifest, "default").is_err());

        let mut manifest = quota(json!({"name": "team-a"}));
        manifest["apiVersion"] = json!("policy.karmada.io/v1beta1");
        assert!(prepare(&FEDERATED_RESOURCE_QUOTA, &manifest, "default").is_err());
    }

    #[test]
    fn test_name_is_required() {
        let err = prepare(&FEDERATED_RESOURCE_QUOTA, &quota(json!({})), "default").unwrap_err();
        assert!(err.to_string().contains("metadata.name"), "{}", err);
    }

    #[test]
    fn test_kind_rules_are_applied() {
        let mut manifest = quota(json!({"name": "team-a"}));
        manifest["spec"] = json!({});
        let err = prepare(&FEDERATED_RESOURCE_QUOTA, &manifest, "default").unwrap_err();
        assert!(err.to_string().contains("spec.overall is required"), "{}", err);
    }

    #[test]
    fn test_strip_server_fields() {
        let live = json!({
            "apiVersion": "policy.karmada.io/v1alpha1",
            "kind": "FederatedResourceQuota",
            "metadata": {
                "name": "team-a",
                "namespace": "team-a",
                "uid": "0b7c",
                "resourceVersion": "4711",
                "generation": 3,
                "creationTimestamp": "2026-10-01T10:00:00Z",
                "managedFields": [{ "manager": "karmada-provider" }],
                "labels": { "team": "a" },
                "annotations": {}
            },
            "spec": { "overall": { "cpu": "10" } },
            "status": { "overall": { "cpu": "10" } }
        });

        let manifest = strip_server_fields(&live);

        assert_eq!(
            manifest,
            json!({
                "apiVersion": "policy.karmada.io/v1alpha1",
                "kind": "FederatedResourceQuota",
                "metadata": {
                    "name": "team-a",
                    "namespace": "team-a",
                    "labels": { "team": "a" }
                },
                "spec": { "overall": { "cpu": "10" } }
            })
        );
    }

    #[test]
    fn test_observed_drops_managed_fields() {
        let object: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "policy.karmada.io/v1alpha1",
            "kind": "OverridePolicy",
            "metadata": {
                "name": "nginx",
                "namespace": "apps",
                "managedFields": [{ "manager": "karmada-provider", "operation": "Apply" }]
            },
            "spec": {}
        }))
        .unwrap();

        let value = observed(&object).unwrap();
        assert!(value["metadata"].get("managedFields").is_none());
        assert_eq!(value["metadata"]["name"], "nginx");
    }
}
