// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The descriptor registry.
//!
//! One registry maps fully-qualified message-type names to their schema
//! descriptors so that `google.protobuf.Any` payloads can be resolved back
//! to a concrete type at decode time. It is built once at startup from the
//! built-in descriptors plus any explicitly registered providers, and is
//! read-only afterwards; share it by reference (or `Arc`) wherever `Any`
//! resolution happens.

use std::collections::HashSet;

use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor};
use prost_types::{Any, DescriptorProto, FileDescriptorProto};
use thiserror::Error;
use tracing::{debug, warn};

use crate::provider::{DescriptorProvider, ProcessStateProvider, WellKnownTypesProvider};

/// Errors from registry construction and `Any` resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no descriptor registered for type '{type_url}'")]
    NotFound { type_url: String },

    #[error("malformed payload: {0}")]
    Malformed(#[from] prost::DecodeError),

    #[error("invalid descriptor set: {0}")]
    Descriptor(#[from] prost_reflect::DescriptorError),

    #[error("provider '{provider}' redefines type '{full_name}'")]
    DuplicateType {
        full_name: String,
        provider: String,
    },

    #[error("failed to pack message: {0}")]
    Encode(#[from] prost::EncodeError),
}

/// What to do when a provider contributes a type name that is already
/// registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep the earlier registration and skip the conflicting file, with a
    /// warning. Registration order is: well-known types, the process-state
    /// schema, then external providers in the order they were added.
    #[default]
    FirstWins,
    /// Fail registry construction on the first conflict.
    Reject,
}

/// Builder for [`TypeRegistry`].
#[derive(Default)]
pub struct TypeRegistryBuilder {
    providers: Vec<Box<dyn DescriptorProvider>>,
    conflict_policy: ConflictPolicy,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an external descriptor provider. Providers are consulted in
    /// registration order, after the built-in descriptors.
    pub fn with_provider(mut self, provider: impl DescriptorProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Build the registry. Succeeds with only the built-in types when no
    /// external providers were registered.
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        let mut pool = DescriptorPool::new();
        let mut registered: HashSet<String> = HashSet::new();

        let built_ins: [&dyn DescriptorProvider; 2] =
            [&WellKnownTypesProvider, &ProcessStateProvider];
        for provider in built_ins {
            add_provider_files(&mut pool, &mut registered, provider, self.conflict_policy)?;
        }
        for provider in &self.providers {
            add_provider_files(
                &mut pool,
                &mut registered,
                provider.as_ref(),
                self.conflict_policy,
            )?;
        }

        debug!(
            files = pool.files().count(),
            messages = pool.all_messages().count(),
            providers = self.providers.len(),
            "type registry built"
        );
        Ok(TypeRegistry { pool })
    }
}

fn add_provider_files(
    pool: &mut DescriptorPool,
    registered: &mut HashSet<String>,
    provider: &dyn DescriptorProvider,
    policy: ConflictPolicy,
) -> Result<(), RegistryError> {
    for file in provider.file_descriptors() {
        let type_names = message_full_names(&file);
        let conflict = type_names.iter().find(|name| registered.contains(*name));
        if let Some(full_name) = conflict {
            match policy {
                ConflictPolicy::FirstWins => {
                    warn!(
                        provider = provider.name(),
                        file = file.name(),
                        type_name = full_name.as_str(),
                        "skipping descriptor file: type already registered"
                    );
                    continue;
                }
                ConflictPolicy::Reject => {
                    return Err(RegistryError::DuplicateType {
                        full_name: full_name.clone(),
                        provider: provider.name().to_string(),
                    });
                }
            }
        }
        pool.add_file_descriptor_proto(file)?;
        registered.extend(type_names);
    }
    Ok(())
}

/// Collect the fully-qualified names of all messages declared in a file,
/// including nested messages.
fn message_full_names(file: &FileDescriptorProto) -> Vec<String> {
    fn walk(prefix: &str, msg: &DescriptorProto, out: &mut Vec<String>) {
        let full = if prefix.is_empty() {
            msg.name().to_string()
        } else {
            format!("{prefix}.{}", msg.name())
        };
        for nested in &msg.nested_type {
            walk(&full, nested, out);
        }
        out.push(full);
    }

    let mut out = Vec::new();
    for msg in &file.message_type {
        walk(file.package(), msg, &mut out);
    }
    out
}

/// The trailing fully-qualified type name of an `Any` type URL
/// (`type.googleapis.com/pkg.Msg` -> `pkg.Msg`).
fn type_name_from_url(type_url: &str) -> &str {
    type_url.rsplit('/').next().unwrap_or(type_url)
}

/// An immutable mapping from fully-qualified type names to descriptors.
pub struct TypeRegistry {
    pool: DescriptorPool,
}

impl TypeRegistry {
    /// Build a registry with only the built-in types.
    pub fn new() -> Result<Self, RegistryError> {
        TypeRegistryBuilder::new().build()
    }

    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Look up a descriptor by fully-qualified type name.
    pub fn get(&self, full_name: &str) -> Option<MessageDescriptor> {
        self.pool.get_message_by_name(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.get(full_name).is_some()
    }

    /// Fully-qualified names of every registered message type.
    pub fn message_names(&self) -> Vec<String> {
        self.pool
            .all_messages()
            .map(|m| m.full_name().to_string())
            .collect()
    }

    /// Resolve an `Any` payload into a dynamic message.
    ///
    /// The dynamic message preserves unknown fields: bytes for field numbers
    /// the registered schema does not know survive a decode/re-encode cycle
    /// unchanged, so intermediaries do not strip data written by newer
    /// schema revisions.
    pub fn resolve_any(&self, any: &Any) -> Result<DynamicMessage, RegistryError> {
        let full_name = type_name_from_url(&any.type_url);
        let descriptor = self.get(full_name).ok_or_else(|| RegistryError::NotFound {
            type_url: any.type_url.clone(),
        })?;
        Ok(DynamicMessage::decode(descriptor, any.value.as_slice())?)
    }

    /// Unpack an `Any` into a concrete message type, verifying the type is
    /// registered first.
    pub fn unpack<M>(&self, any: &Any) -> Result<M, RegistryError>
    where
        M: Message + prost::Name + Default,
    {
        let full_name = type_name_from_url(&any.type_url);
        if !self.contains(full_name) {
            return Err(RegistryError::NotFound {
                type_url: any.type_url.clone(),
            });
        }
        Ok(any.to_msg::<M>()?)
    }

    /// Re-encode a resolved dynamic message, unknown fields included.
    pub fn reencode(&self, message: &DynamicMessage) -> Vec<u8> {
        message.encode_to_vec()
    }
}

/// Pack a message into an `Any` envelope using its registered type URL.
pub fn pack<M>(msg: &M) -> Result<Any, RegistryError>
where
    M: Message + prost::Name,
{
    Ok(Any::from_msg(msg)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_from_url_variants() {
        assert_eq!(
            type_name_from_url("type.googleapis.com/flowstate.process.Variable"),
            "flowstate.process.Variable"
        );
        assert_eq!(type_name_from_url("/pkg.Msg"), "pkg.Msg");
        assert_eq!(type_name_from_url("pkg.Msg"), "pkg.Msg");
        assert_eq!(type_name_from_url(""), "");
    }

    #[test]
    fn test_message_full_names_includes_nested() {
        let file = FileDescriptorProto {
            package: Some("pkg".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("Outer".to_string()),
                nested_type: vec![DescriptorProto {
                    name: Some("Inner".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let names = message_full_names(&file);
        assert!(names.contains(&"pkg.Outer".to_string()));
        assert!(names.contains(&"pkg.Outer.Inner".to_string()));
    }

    #[test]
    fn test_message_full_names_without_package() {
        let file = FileDescriptorProto {
            message_type: vec![DescriptorProto {
                name: Some("Bare".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(message_full_names(&file), vec!["Bare".to_string()]);
    }
}
