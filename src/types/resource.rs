// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ProviderError, Result};
use crate::types::kinds::KindDescriptor;
use crate::wait::{DeleteWait, UpsertWait};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identity of a managed object: `namespace/name` or, for cluster-scoped kinds, `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        ResourceId {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Parse an id the way the given kind's scope requires
    pub fn parse_for(kind: &KindDescriptor, raw: &str) -> Result<Self> {
        let id: ResourceId = raw.to_string().try_into()?;
        id.ensure_scope(kind)?;
        Ok(id)
    }

    /// Fail unless the id carries a namespace exactly when the kind is namespaced
    pub fn ensure_scope(&self, kind: &KindDescriptor) -> Result<()> {
        match (kind.is_namespaced(), &self.namespace) {
            (true, None) => Err(ProviderError::InvalidResourceId(format!(
                "{} is namespaced, expected 'namespace/name' but got '{}'",
                kind.kind, self
            ))),
            (false, Some(_)) => Err(ProviderError::InvalidResourceId(format!(
                "{} is cluster-scoped, expected 'name' but got '{}'",
                kind.kind, self
            ))),
            _ => Ok(()),
        }
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ProviderError;

    fn try_from(raw: String) -> Result<Self> {
        let parts: Vec<&str> = raw.split('/').collect();
        match parts.as_slice() {
            [name] if !name.is_empty() => Ok(ResourceId::new(None, name)),
            [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
                Ok(ResourceId::new(Some(*namespace), name))
            }
            _ => Err(ProviderError::InvalidResourceId(format!(
                "'{}' is neither 'name' nor 'namespace/name'",
                raw
            ))),
        }
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A resource block: the desired manifest plus how to apply and wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub manifest: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wait_for: Vec<UpsertWait>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_wait: Option<DeleteWait>,
    /// Overrides the provider-level field manager
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    /// Overrides the provider-level conflict forcing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,
}

impl ResourceConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// What the provider records after an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: ResourceId,
    /// The manifest as applied
    pub manifest: Value,
    /// The object as last observed on the API server
    pub object: Value,
}
