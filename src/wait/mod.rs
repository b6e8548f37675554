// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for objects to converge after upsert or disappear after delete.

pub mod evaluator;
pub mod field_path;
pub mod poller;
pub mod spec;

pub use evaluator::{evaluate, observe, ConditionResult};
pub use field_path::FieldPath;
pub use poller::wait_for;
pub use spec::{DeleteWait, FieldCondition, UpsertWait, WaitSpec, WaitTarget};
