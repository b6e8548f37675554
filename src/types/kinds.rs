// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Declarative descriptions of the Karmada policy kinds the provider manages.
//!
//! Every kind goes through the same engine; what differs between kinds is
//! captured here as data.

use crate::constants::policy::{GROUP, VERSION};
use crate::error::{ProviderError, Result};
use crate::wait::field_path::{render_scalar, FieldPath};
use kube::api::ApiResource;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Namespaced,
    Cluster,
}

/// A constraint checked against a manifest before it is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// The field must be present and non-empty
    Required(&'static str),
    /// When present, the field must hold one of the listed values
    OneOf(&'static str, &'static [&'static str]),
}

#[derive(Debug, PartialEq, Eq)]
pub struct KindDescriptor {
    pub kind: &'static str,
    pub plural: &'static str,
    pub scope: Scope,
    pub rules: &'static [FieldRule],
}

pub const CLUSTER_PROPAGATION_POLICY: KindDescriptor = KindDescriptor {
    kind: "ClusterPropagationPolicy",
    plural: "clusterpropagationpolicies",
    scope: Scope::Cluster,
    rules: &[
        FieldRule::Required("spec.resourceSelectors"),
        FieldRule::OneOf("spec.conflictResolution", &["Abort", "Overwrite"]),
        FieldRule::OneOf("spec.preemption", &["Always", "Never"]),
        FieldRule::OneOf(
            "spec.placement.replicaScheduling.replicaSchedulingType",
            &["Duplicated", "Divided"],
        ),
    ],
};

pub const FEDERATED_RESOURCE_QUOTA: KindDescriptor = KindDescriptor {
    kind: "FederatedResourceQuota",
    plural: "federatedresourcequotas",
    scope: Scope::Namespaced,
    rules: &[FieldRule::Required("spec.overall")],
};

pub const OVERRIDE_POLICY: KindDescriptor = KindDescriptor {
    kind: "OverridePolicy",
    plural: "overridepolicies",
    scope: Scope::Namespaced,
    rules: &[FieldRule::Required("spec")],
};

pub static KINDS: [KindDescriptor; 3] = [
    CLUSTER_PROPAGATION_POLICY,
    FEDERATED_RESOURCE_QUOTA,
    OVERRIDE_POLICY,
];

impl KindDescriptor {
    pub fn api_version(&self) -> String {
        format!("{}/{}", GROUP, VERSION)
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: GROUP.to_string(),
            version: VERSION.to_string(),
            api_version: self.api_version(),
            kind: self.kind.to_string(),
            plural: self.plural.to_string(),
        }
    }

    pub fn is_namespaced(&self) -> bool {
        self.scope == Scope::Namespaced
    }

    /// Provider type name, e.g. `karmada_policy_override_policy_v1alpha1`
    pub fn type_name(&self) -> String {
        let mut snake = String::new();
        for (i, c) in self.kind.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        }
        format!("karmada_policy_{}_{}", snake, VERSION)
    }

    /// Check every rule against the manifest, reporting all violations together
    pub fn validate(&self, manifest: &Value) -> Result<()> {
        let mut violations = Vec::new();

        for rule in self.rules {
            match *rule {
                FieldRule::Required(path) => {
                    let found = path.parse::<FieldPath>()?.resolve(manifest).map(render_scalar);
                    if !found.is_some_and(|v| !v.is_empty()) {
                        violations.push(format!("{} is required", path));
                    }
                }
                FieldRule::OneOf(path, allowed) => {
                    let found = path.parse::<FieldPath>()?.resolve(manifest).map(render_scalar);
                    if let Some(value) = found.filter(|v| !v.is_empty()) {
                        if !allowed.contains(&value.as_str()) {
                            violations.push(format!(
                                "{} must be one of [{}], got '{}'",
                                path,
                                allowed.join(", "),
                                value
                            ));
                        }
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::InvalidManifest(format!(
                "{}: {}",
                self.kind,
                violations.join("; ")
            )))
        }
    }
}

/// Find a kind by its kind name (case-insensitive) or provider type name
pub fn lookup(name: &str) -> Result<&'static KindDescriptor> {
    KINDS
        .iter()
        .find(|k| k.kind.eq_ignore_ascii_case(name) || k.type_name() == name)
        .ok_or_else(|| ProviderError::UnknownKind(name.to_string()))
}

/// Find the kind a manifest declares through its apiVersion and kind
pub fn for_manifest(api_version: &str, kind: &str) -> Result<&'static KindDescriptor> {
    KINDS
        .iter()
        .find(|k| k.kind == kind && k.api_version() == api_version)
        .ok_or_else(|| ProviderError::UnknownKind(format!("{}/{}", api_version, kind)))
}
