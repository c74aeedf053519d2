// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The state schema as a `FileDescriptorProto`.
//!
//! This mirrors the hand-written structs in [`crate::state`] field-for-field
//! so reflection-based consumers (the type registry, dynamic decoding of
//! `Any` payloads) see exactly the schema the typed structs encode. The two
//! views must stay in lock step: a field added in one place is added in the
//! other, with the same number and type.
//!
//! Declared as proto2 so optional scalar fields carry explicit presence
//! without synthetic oneofs.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::state::PACKAGE;

/// Virtual file name the schema is registered under.
pub const FILE_NAME: &str = "flowstate/process/process_state.proto";

/// Fully-qualified names of every message in the schema, in declaration order.
pub const MESSAGE_NAMES: [&str; 7] = [
    "flowstate.process.Variable",
    "flowstate.process.NodeInstance",
    "flowstate.process.WorkflowContext",
    "flowstate.process.SwimlaneContext",
    "flowstate.process.SLAContext",
    "flowstate.process.IterationLevel",
    "flowstate.process.NodeInstanceGroup",
];

fn scalar(name: &str, number: i32, label: Label, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn message(name: &str, number: i32, label: Label, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(Type::Message as i32),
        type_name: Some(type_name.to_string()),
        ..Default::default()
    }
}

fn message_type(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

/// Build the schema's file descriptor.
///
/// Depends on `google/protobuf/any.proto`, which must already be present in
/// any descriptor pool this file is added to.
pub fn file_descriptor() -> FileDescriptorProto {
    use Label::{Optional, Repeated};

    FileDescriptorProto {
        name: Some(FILE_NAME.to_string()),
        package: Some(PACKAGE.to_string()),
        dependency: vec!["google/protobuf/any.proto".to_string()],
        syntax: Some("proto2".to_string()),
        message_type: vec![
            message_type(
                "Variable",
                vec![
                    scalar("name", 1, Optional, Type::String),
                    scalar("data_type", 2, Optional, Type::String),
                    message("value", 3, Optional, ".google.protobuf.Any"),
                ],
            ),
            message_type(
                "NodeInstance",
                vec![
                    scalar("id", 1, Optional, Type::String),
                    scalar("node_id", 2, Optional, Type::Int64),
                    message("content", 3, Optional, ".google.protobuf.Any"),
                    scalar("level", 4, Optional, Type::Int32),
                    scalar("trigger_date", 5, Optional, Type::Int64),
                    message("sla", 6, Optional, ".flowstate.process.SLAContext"),
                ],
            ),
            message_type(
                "WorkflowContext",
                vec![
                    message("variable", 1, Repeated, ".flowstate.process.Variable"),
                    message(
                        "node_instance",
                        2,
                        Repeated,
                        ".flowstate.process.NodeInstance",
                    ),
                    message(
                        "exclusive_group",
                        3,
                        Repeated,
                        ".flowstate.process.NodeInstanceGroup",
                    ),
                    message(
                        "iteration_levels",
                        4,
                        Repeated,
                        ".flowstate.process.IterationLevel",
                    ),
                ],
            ),
            message_type(
                "SwimlaneContext",
                vec![
                    scalar("swimlane", 1, Optional, Type::String),
                    scalar("actor_id", 2, Optional, Type::String),
                ],
            ),
            message_type(
                "SLAContext",
                vec![
                    scalar("sla_timer_id", 1, Optional, Type::String),
                    scalar("sla_due_date", 2, Optional, Type::Int64),
                    scalar("sla_compliance", 3, Optional, Type::Int32),
                ],
            ),
            message_type(
                "IterationLevel",
                vec![
                    scalar("id", 1, Optional, Type::String),
                    scalar("level", 2, Optional, Type::Int32),
                ],
            ),
            message_type(
                "NodeInstanceGroup",
                vec![scalar("group_node_instance_id", 1, Repeated, Type::String)],
            ),
        ],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_lists_all_messages() {
        let file = file_descriptor();
        let declared: Vec<String> = file
            .message_type
            .iter()
            .map(|m| format!("{}.{}", PACKAGE, m.name()))
            .collect();
        assert_eq!(declared, MESSAGE_NAMES);
    }

    #[test]
    fn test_field_numbers_are_sequential_from_one() {
        for msg in file_descriptor().message_type {
            for (i, field) in msg.field.iter().enumerate() {
                assert_eq!(
                    field.number(),
                    (i + 1) as i32,
                    "field {} of {}",
                    field.name(),
                    msg.name()
                );
            }
        }
    }

    #[test]
    fn test_any_dependency_declared() {
        let file = file_descriptor();
        assert_eq!(file.dependency, vec!["google/protobuf/any.proto"]);
    }

    #[test]
    fn test_sla_reference_points_at_declared_type() {
        let file = file_descriptor();
        let node_instance = &file.message_type[1];
        let sla = node_instance.field.iter().find(|f| f.name() == "sla").unwrap();
        assert_eq!(sla.type_name(), ".flowstate.process.SLAContext");
    }
}
