// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Flowstate Protocol - process-instance state schema and codec
//!
//! This crate is the wire contract for checkpointed process-instance state:
//! variables, node instances, exclusive groups, iteration levels, and the
//! SLA/swimlane contexts attached to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    flowstate-protocol                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  state:      typed messages (hand-written prost structs)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  descriptor: the same schema as a FileDescriptorProto       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  codec:      encode/decode wrappers with size guard         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use flowstate_protocol::{Variable, WorkflowContext};
//!
//! let ctx = WorkflowContext {
//!     variable: vec![Variable {
//!         name: "approved".to_string(),
//!         data_type: "java.lang.Boolean".to_string(),
//!         value: None,
//!     }],
//!     ..Default::default()
//! };
//!
//! let bytes = ctx.to_bytes().unwrap();
//! let back = WorkflowContext::from_bytes(&bytes).unwrap();
//! assert_eq!(back, ctx);
//! ```
//!
//! Type-erased fields (`Variable::value`, `NodeInstance::content`) travel as
//! `google.protobuf.Any` and are resolved against the descriptor registry in
//! `flowstate-registry` at decode time.

pub mod codec;
pub mod descriptor;
pub mod state;

// Re-export main types
pub use codec::{CodecError, MAX_STATE_SIZE, decode, encode};
pub use state::{
    IterationLevel, NodeInstance, NodeInstanceGroup, SlaContext, SwimlaneContext, Variable,
    WorkflowContext,
};
