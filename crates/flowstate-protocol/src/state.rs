// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Process-instance state messages.
//!
//! These structs are the wire contract for checkpointed process state. Field
//! numbers are fixed and interoperability-critical: peers in other languages
//! decode the same payloads, so numbers and types must never change for an
//! existing field. New fields get new numbers.
//!
//! The structs are written by hand with `prost` derive rather than generated
//! from a `.proto` file, which keeps `protoc` out of the build. The same
//! schema is mirrored as a descriptor in [`crate::descriptor`] for dynamic
//! (reflection-based) consumers.
//!
//! Values are plain records: construct with struct literals or `Default`,
//! no builder indirection. Optional scalars use `Option<T>` and carry
//! explicit presence on the wire; unset is distinct from zero/empty.

use prost_types::Any;

/// Protobuf package all state messages live in.
pub const PACKAGE: &str = "flowstate.process";

/// Type URL domain used when packing messages into `google.protobuf.Any`.
pub const TYPE_URL_DOMAIN: &str = "type.googleapis.com";

/// A named process variable with its runtime value.
///
/// `value` is type-erased: the schema does not know variable payload types
/// ahead of time, so the value travels as `google.protobuf.Any` and is
/// resolved against a type registry at decode time.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Variable {
    #[prost(string, tag = "1")]
    pub name: String,
    /// Logical data type of the value, as recorded by the engine.
    #[prost(string, tag = "2")]
    pub data_type: String,
    #[prost(message, optional, tag = "3")]
    pub value: Option<Any>,
}

/// One active node instance inside a process instance.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeInstance {
    #[prost(string, tag = "1")]
    pub id: String,
    /// Identifier of the node definition this instance was spawned from.
    #[prost(int64, tag = "2")]
    pub node_id: i64,
    /// Node-type-specific state, type-erased like `Variable::value`.
    #[prost(message, optional, tag = "3")]
    pub content: Option<Any>,
    /// Iteration level for nodes inside multi-instance constructs.
    #[prost(int32, optional, tag = "4")]
    pub level: Option<i32>,
    /// Epoch millis of the pending timer trigger, if any.
    #[prost(int64, optional, tag = "5")]
    pub trigger_date: Option<i64>,
    #[prost(message, optional, tag = "6")]
    pub sla: Option<SlaContext>,
}

/// The variable and node-instance state of one process instance.
///
/// Repeated fields preserve insertion order through serialization.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WorkflowContext {
    #[prost(message, repeated, tag = "1")]
    pub variable: Vec<Variable>,
    #[prost(message, repeated, tag = "2")]
    pub node_instance: Vec<NodeInstance>,
    #[prost(message, repeated, tag = "3")]
    pub exclusive_group: Vec<NodeInstanceGroup>,
    #[prost(message, repeated, tag = "4")]
    pub iteration_levels: Vec<IterationLevel>,
}

/// Swimlane assignment for a human-task context.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SwimlaneContext {
    #[prost(string, optional, tag = "1")]
    pub swimlane: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub actor_id: Option<String>,
}

/// SLA tracking state attached to a node instance or process.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SlaContext {
    #[prost(string, optional, tag = "1")]
    pub sla_timer_id: Option<String>,
    /// Epoch millis the SLA expires at.
    #[prost(int64, optional, tag = "2")]
    pub sla_due_date: Option<i64>,
    #[prost(int32, optional, tag = "3")]
    pub sla_compliance: Option<i32>,
}

/// Iteration level of one multi-instance node, keyed by node id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IterationLevel {
    #[prost(string, optional, tag = "1")]
    pub id: Option<String>,
    #[prost(int32, optional, tag = "2")]
    pub level: Option<i32>,
}

/// Node instances belonging to one exclusive group.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeInstanceGroup {
    #[prost(string, repeated, tag = "1")]
    pub group_node_instance_id: Vec<String>,
}

macro_rules! impl_message_name {
    ($ty:ty, $name:literal) => {
        impl ::prost::Name for $ty {
            const NAME: &'static str = $name;
            const PACKAGE: &'static str = PACKAGE;

            fn full_name() -> String {
                format!("{PACKAGE}.{}", $name)
            }

            fn type_url() -> String {
                format!("{TYPE_URL_DOMAIN}/{PACKAGE}.{}", $name)
            }
        }
    };
}

impl_message_name!(Variable, "Variable");
impl_message_name!(NodeInstance, "NodeInstance");
impl_message_name!(WorkflowContext, "WorkflowContext");
impl_message_name!(SwimlaneContext, "SwimlaneContext");
impl_message_name!(SlaContext, "SLAContext");
impl_message_name!(IterationLevel, "IterationLevel");
impl_message_name!(NodeInstanceGroup, "NodeInstanceGroup");
