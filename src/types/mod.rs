// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kind descriptors and the resource model shared by the provider operations.

pub mod kinds;
pub mod resource;

pub use kinds::{KindDescriptor, Scope, KINDS};
pub use resource::{ResourceConfig, ResourceId, ResourceState};
