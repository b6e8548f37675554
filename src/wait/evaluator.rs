// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Turns a single observation of an object into a condition result.

use crate::wait::field_path::render_scalar;
use crate::wait::spec::{FieldCondition, WaitTarget};
use serde_json::Value;

/// Outcome of one check against the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionResult {
    Satisfied,
    NotYetSatisfied,
    ResourceAbsent,
}

impl WaitTarget {
    /// Whether a check result ends the wait successfully
    pub fn is_met_by(&self, result: ConditionResult) -> bool {
        match self {
            WaitTarget::Deletion => result == ConditionResult::ResourceAbsent,
            WaitTarget::Field(_) => result == ConditionResult::Satisfied,
        }
    }
}

/// Evaluate a field condition against an observed object.
///
/// A path that does not resolve is not an error: the field may not exist
/// until the controllers behind the object converge.
pub fn evaluate(object: &Value, condition: &FieldCondition) -> ConditionResult {
    let Some(found) = condition.path.resolve(object) else {
        return ConditionResult::NotYetSatisfied;
    };

    let observed = render_scalar(found);
    let satisfied = match &condition.value {
        Some(expected) => observed == *expected,
        None => !observed.is_empty(),
    };

    if satisfied {
        ConditionResult::Satisfied
    } else {
        ConditionResult::NotYetSatisfied
    }
}

/// Map an observation (or its absence) to a result for the given target
pub fn observe(target: &WaitTarget, object: Option<&Value>) -> ConditionResult {
    match (target, object) {
        (_, None) => ConditionResult::ResourceAbsent,
        (WaitTarget::Deletion, Some(_)) => ConditionResult::NotYetSatisfied,
        (WaitTarget::Field(condition), Some(object)) => evaluate(object, condition),
    }
}
