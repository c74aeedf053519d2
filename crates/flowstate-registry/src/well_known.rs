// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Descriptors for the well-known Google types the registry always carries.
//!
//! Only the handful of files state payloads actually reference are declared:
//! `Any` (the envelope for type-erased values), `Timestamp`, `Empty`, and
//! the wrapper types peers use for boxed scalar variable values. Hand-built
//! like the schema descriptor in `flowstate-protocol`, so no `protoc` or
//! bundled descriptor blob is needed.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

fn field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn file(name: &str, message_type: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some("google.protobuf".to_string()),
        syntax: Some("proto3".to_string()),
        message_type,
        ..Default::default()
    }
}

/// File descriptors for the well-known types, in dependency-safe order.
pub fn file_descriptors() -> Vec<FileDescriptorProto> {
    vec![
        file(
            "google/protobuf/any.proto",
            vec![message(
                "Any",
                vec![
                    field("type_url", 1, Type::String),
                    field("value", 2, Type::Bytes),
                ],
            )],
        ),
        file(
            "google/protobuf/timestamp.proto",
            vec![message(
                "Timestamp",
                vec![
                    field("seconds", 1, Type::Int64),
                    field("nanos", 2, Type::Int32),
                ],
            )],
        ),
        file(
            "google/protobuf/empty.proto",
            vec![message("Empty", vec![])],
        ),
        file(
            "google/protobuf/wrappers.proto",
            vec![
                message("DoubleValue", vec![field("value", 1, Type::Double)]),
                message("FloatValue", vec![field("value", 1, Type::Float)]),
                message("Int64Value", vec![field("value", 1, Type::Int64)]),
                message("UInt64Value", vec![field("value", 1, Type::Uint64)]),
                message("Int32Value", vec![field("value", 1, Type::Int32)]),
                message("UInt32Value", vec![field("value", 1, Type::Uint32)]),
                message("BoolValue", vec![field("value", 1, Type::Bool)]),
                message("StringValue", vec![field("value", 1, Type::String)]),
                message("BytesValue", vec![field("value", 1, Type::Bytes)]),
            ],
        ),
    ]
}
