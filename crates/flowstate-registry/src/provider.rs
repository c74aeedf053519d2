// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Descriptor providers.
//!
//! A provider contributes one or more file descriptors to the registry.
//! Providers are registered explicitly on the [`crate::TypeRegistryBuilder`]
//! by the application's composition root; there is no runtime discovery.
//! Sibling schemas (process-instance metadata, node-instance content, work
//! items) plug in here as external providers and round-trip through the same
//! registry.

use prost_types::FileDescriptorProto;

use crate::well_known;

/// A source of file descriptors for the registry.
///
/// `file_descriptors` is called exactly once, during registry construction.
/// Files must be ordered so that a file appears after every file it imports,
/// unless the import is already satisfied by a built-in or an earlier
/// provider.
pub trait DescriptorProvider {
    /// Provider name used in logs and conflict errors.
    fn name(&self) -> &str;

    /// The file descriptors this provider contributes.
    fn file_descriptors(&self) -> Vec<FileDescriptorProto>;
}

/// Built-in provider for the `flowstate.process` state schema.
#[derive(Debug, Default)]
pub struct ProcessStateProvider;

impl DescriptorProvider for ProcessStateProvider {
    fn name(&self) -> &str {
        "flowstate-process-state"
    }

    fn file_descriptors(&self) -> Vec<FileDescriptorProto> {
        vec![flowstate_protocol::descriptor::file_descriptor()]
    }
}

/// Built-in provider for the well-known Google types.
#[derive(Debug, Default)]
pub struct WellKnownTypesProvider;

impl DescriptorProvider for WellKnownTypesProvider {
    fn name(&self) -> &str {
        "google-well-known"
    }

    fn file_descriptors(&self) -> Vec<FileDescriptorProto> {
        well_known::file_descriptors()
    }
}

/// Adapter for supplying descriptors without a dedicated provider type,
/// e.g. a descriptor set loaded from configuration.
pub struct StaticDescriptorProvider {
    name: String,
    files: Vec<FileDescriptorProto>,
}

impl StaticDescriptorProvider {
    pub fn new(name: impl Into<String>, files: Vec<FileDescriptorProto>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

impl DescriptorProvider for StaticDescriptorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn file_descriptors(&self) -> Vec<FileDescriptorProto> {
        self.files.clone()
    }
}
