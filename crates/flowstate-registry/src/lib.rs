// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Flowstate Registry - descriptor aggregation and `Any` resolution
//!
//! State payloads embed type-erased values (`Variable::value`,
//! `NodeInstance::content`) as `google.protobuf.Any`. Decoding one requires
//! a registry that maps the envelope's type URL back to a schema descriptor.
//! This crate builds that registry by merging:
//!
//! - the well-known Google types (wrappers, `Timestamp`, `Empty`, `Any`),
//! - the `flowstate.process` state schema from `flowstate-protocol`,
//! - descriptor sets from explicitly registered providers (sibling schemas,
//!   application extensions).
//!
//! # Usage
//!
//! ```
//! use flowstate_registry::TypeRegistry;
//!
//! let registry = TypeRegistry::new().unwrap();
//! assert!(registry.contains("flowstate.process.WorkflowContext"));
//! ```
//!
//! The registry is constructed once at application start, then shared
//! read-only. There is no global instance and no runtime provider
//! discovery; the composition root decides what goes in.

pub mod provider;
pub mod registry;
pub mod well_known;

// Re-export main types
pub use provider::{
    DescriptorProvider, ProcessStateProvider, StaticDescriptorProvider, WellKnownTypesProvider,
};
pub use registry::{ConflictPolicy, RegistryError, TypeRegistry, TypeRegistryBuilder, pack};
