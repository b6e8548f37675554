// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wait configuration: the user-facing blocks and the spec the poller consumes.

use crate::constants::wait::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};
use crate::wait::field_path::{render_scalar, FieldPath};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// Accept any scalar as an expected value, compared in its rendered form
fn scalar_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
            Ok(Some(render_scalar(&value)))
        }
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, number or boolean, got {}",
            other
        ))),
    }
}

/// A field that must resolve, optionally to a specific value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub path: FieldPath,
    /// When unset, any non-empty value satisfies the condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// What a wait is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitTarget {
    /// The object is gone
    Deletion,
    /// The object exists and the field condition holds
    Field(FieldCondition),
}

/// One wait operation, built per Create/Update/Delete call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSpec {
    /// Seconds; 0 means check once
    pub timeout: u64,
    /// Seconds between checks
    pub poll_interval: u64,
    pub target: WaitTarget,
}

impl WaitSpec {
    pub fn deletion(timeout: u64, poll_interval: u64) -> Self {
        WaitSpec {
            timeout,
            poll_interval,
            target: WaitTarget::Deletion,
        }
    }

    pub fn field(condition: FieldCondition, timeout: u64, poll_interval: u64) -> Self {
        WaitSpec {
            timeout,
            poll_interval,
            target: WaitTarget::Field(condition),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTarget::Deletion => f.write_str("deletion"),
            WaitTarget::Field(FieldCondition { path, value: None }) => {
                write!(f, "field '{}' to be set", path)
            }
            WaitTarget::Field(FieldCondition {
                path,
                value: Some(value),
            }) => write!(f, "field '{}' to equal '{}'", path, value),
        }
    }
}

/// A `wait_for` entry on a resource: poll after create/update until a field matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpsertWait {
    pub path: FieldPath,
    #[serde(
        default,
        deserialize_with = "scalar_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl UpsertWait {
    pub fn condition(&self) -> FieldCondition {
        FieldCondition {
            path: self.path.clone(),
            value: self.value.clone(),
        }
    }

    pub fn to_spec(&self) -> WaitSpec {
        WaitSpec::field(self.condition(), self.timeout, self.poll_interval)
    }
}

/// The `delete_wait` block on a resource: poll after delete until the object is gone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteWait {
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for DeleteWait {
    fn default() -> Self {
        DeleteWait {
            timeout: DEFAULT_TIMEOUT_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl DeleteWait {
    pub fn to_spec(&self) -> WaitSpec {
        WaitSpec::deletion(self.timeout, self.poll_interval)
    }
}
