// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Registry construction, lookup, and Any-resolution tests.

use flowstate_protocol::descriptor::MESSAGE_NAMES;
use flowstate_protocol::{SlaContext, Variable};
use flowstate_registry::{
    ConflictPolicy, RegistryError, StaticDescriptorProvider, TypeRegistry, pack,
};
use prost::Message;
use prost_reflect::ReflectMessage;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{Any, DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

/// A single-message descriptor file, as an external provider would supply.
fn external_file(file_name: &str, package: &str, message: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(file_name.to_string()),
        package: Some(package.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some(message.to_string()),
            field: vec![FieldDescriptorProto {
                name: Some("id".to_string()),
                number: Some(1),
                label: Some(Label::Optional as i32),
                r#type: Some(Type::String as i32),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

// ========== Completeness ==========

#[test]
fn test_all_schema_types_resolvable() {
    let registry = TypeRegistry::new().unwrap();
    for name in MESSAGE_NAMES {
        let descriptor = registry
            .get(name)
            .unwrap_or_else(|| panic!("missing descriptor for {name}"));
        assert_eq!(descriptor.full_name(), name);
    }
}

#[test]
fn test_well_known_types_present() {
    let registry = TypeRegistry::new().unwrap();
    for name in [
        "google.protobuf.Any",
        "google.protobuf.Timestamp",
        "google.protobuf.Empty",
        "google.protobuf.StringValue",
        "google.protobuf.BoolValue",
    ] {
        assert!(registry.contains(name), "missing {name}");
    }
}

#[test]
fn test_unregistered_name_is_a_clean_miss() {
    let registry = TypeRegistry::new().unwrap();
    assert!(registry.get("com.example.NoSuchType").is_none());
    assert!(!registry.contains(""));
}

#[test]
fn test_empty_provider_build_succeeds() {
    // No external providers: built-ins only
    let registry = TypeRegistry::builder().build().unwrap();
    let names = registry.message_names();
    assert!(names.iter().any(|n| n == "flowstate.process.Variable"));
    assert!(names.iter().any(|n| n == "google.protobuf.Timestamp"));
}

// ========== External providers ==========

#[test]
fn test_external_provider_types_registered() {
    let provider = StaticDescriptorProvider::new(
        "work-items",
        vec![external_file(
            "flowstate/process/work_items.proto",
            "flowstate.workitems",
            "WorkItem",
        )],
    );
    let registry = TypeRegistry::builder().with_provider(provider).build().unwrap();

    assert!(registry.contains("flowstate.workitems.WorkItem"));
    // Built-ins still there
    assert!(registry.contains("flowstate.process.WorkflowContext"));
}

#[test]
fn test_conflicting_provider_first_wins() {
    // Redefines a built-in type name with a different shape
    let provider = StaticDescriptorProvider::new(
        "rogue",
        vec![external_file(
            "rogue/variable.proto",
            "flowstate.process",
            "Variable",
        )],
    );
    let registry = TypeRegistry::builder().with_provider(provider).build().unwrap();

    // The built-in Variable (three fields) won
    let descriptor = registry.get("flowstate.process.Variable").unwrap();
    assert_eq!(descriptor.fields().count(), 3);
}

#[test]
fn test_conflicting_provider_rejected() {
    let provider = StaticDescriptorProvider::new(
        "rogue",
        vec![external_file(
            "rogue/variable.proto",
            "flowstate.process",
            "Variable",
        )],
    );
    let result = TypeRegistry::builder()
        .with_provider(provider)
        .conflict_policy(ConflictPolicy::Reject)
        .build();

    match result {
        Err(RegistryError::DuplicateType {
            full_name,
            provider,
        }) => {
            assert_eq!(full_name, "flowstate.process.Variable");
            assert_eq!(provider, "rogue");
        }
        other => panic!("expected DuplicateType, got {:?}", other.err()),
    }
}

#[test]
fn test_providers_merge_in_order() {
    let first = StaticDescriptorProvider::new(
        "first",
        vec![external_file("ext/a.proto", "ext", "Shared")],
    );
    let second = StaticDescriptorProvider::new(
        "second",
        vec![
            external_file("ext/b.proto", "ext", "Shared"),
            external_file("ext/c.proto", "ext", "Unshared"),
        ],
    );
    let registry = TypeRegistry::builder()
        .with_provider(first)
        .with_provider(second)
        .build()
        .unwrap();

    // Conflicting file skipped, non-conflicting file from the same provider kept
    assert!(registry.contains("ext.Shared"));
    assert!(registry.contains("ext.Unshared"));
}

// ========== Any resolution ==========

#[test]
fn test_resolve_any_round_trip() {
    let registry = TypeRegistry::new().unwrap();
    let sla = SlaContext {
        sla_timer_id: Some("t-1".to_string()),
        sla_due_date: Some(1_700_000_000_000),
        sla_compliance: None,
    };
    let any = pack(&sla).unwrap();

    let dynamic = registry.resolve_any(&any).unwrap();
    assert_eq!(dynamic.descriptor().full_name(), "flowstate.process.SLAContext");

    let typed: SlaContext = registry.unpack(&any).unwrap();
    assert_eq!(typed, sla);
}

#[test]
fn test_resolve_any_unknown_type() {
    let registry = TypeRegistry::new().unwrap();
    let any = Any {
        type_url: "type.googleapis.com/com.example.Mystery".to_string(),
        value: vec![],
    };
    match registry.resolve_any(&any) {
        Err(RegistryError::NotFound { type_url }) => {
            assert!(type_url.contains("com.example.Mystery"));
        }
        other => panic!("expected NotFound, got {:?}", other.err()),
    }
}

#[test]
fn test_resolve_any_malformed_payload() {
    let registry = TypeRegistry::new().unwrap();
    let any = Any {
        type_url: "type.googleapis.com/flowstate.process.Variable".to_string(),
        value: vec![0xFF; 8],
    };
    assert!(matches!(
        registry.resolve_any(&any),
        Err(RegistryError::Malformed(_))
    ));
}

#[test]
fn test_resolve_well_known_payload() {
    let registry = TypeRegistry::new().unwrap();
    let ts = prost_types::Timestamp {
        seconds: 1_700_000_000,
        nanos: 500,
    };
    let any = pack(&ts).unwrap();
    let dynamic = registry.resolve_any(&any).unwrap();
    assert_eq!(dynamic.descriptor().full_name(), "google.protobuf.Timestamp");
}

// ========== Unknown-field preservation ==========

/// True if `haystack` contains `needle` as a contiguous subsequence.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_unknown_fields_survive_reencode() {
    let registry = TypeRegistry::new().unwrap();

    let var = Variable {
        name: "x".to_string(),
        data_type: "java.lang.Long".to_string(),
        value: None,
    };
    let mut bytes = var.encode_to_vec();
    // Append a field this schema revision does not know:
    // field 99, wire type 0 (varint), value 42
    let unknown = [0x98, 0x06, 0x2A];
    bytes.extend_from_slice(&unknown);

    let any = Any {
        type_url: "type.googleapis.com/flowstate.process.Variable".to_string(),
        value: bytes,
    };
    let dynamic = registry.resolve_any(&any).unwrap();
    let reencoded = registry.reencode(&dynamic);

    assert!(
        contains_bytes(&reencoded, &unknown),
        "unknown field bytes were dropped on re-encode"
    );
    // Known fields still intact
    let back: Variable = flowstate_protocol::decode(&reencoded).unwrap();
    assert_eq!(back.name, "x");
    assert_eq!(back.data_type, "java.lang.Long");
}

#[test]
fn test_unknown_length_delimited_field_survives() {
    let registry = TypeRegistry::new().unwrap();

    // field 200, wire type 2 (length-delimited), 4 payload bytes
    // tag = (200 << 3) | 2 = 1602 -> varint [0xC2, 0x0C]
    let unknown = [0xC2, 0x0C, 0x04, 0xDE, 0xAD, 0xBE, 0xEF];
    let any = Any {
        type_url: "type.googleapis.com/flowstate.process.SwimlaneContext".to_string(),
        value: unknown.to_vec(),
    };

    let dynamic = registry.resolve_any(&any).unwrap();
    let reencoded = registry.reencode(&dynamic);
    assert!(contains_bytes(&reencoded, &unknown));
}
