// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Encode/decode helpers for state payloads.
//!
//! The wire format is plain Protobuf; all tagging, varint, and presence
//! handling is prost's. This module only adds a size guard and a single
//! error type, so callers never touch `prost::DecodeError` directly.

use bytes::Bytes;
use prost::Message;
use thiserror::Error;

use crate::state::WorkflowContext;

/// Maximum encoded size of a single state payload (64 MB).
/// Large enough for checkpoint snapshots with embedded variable values.
pub const MAX_STATE_SIZE: usize = 64 * 1024 * 1024;

/// Errors that can occur while encoding or decoding state payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("state payload too large: {0} bytes (max: {MAX_STATE_SIZE})")]
    StateTooLarge(usize),

    #[error("malformed state payload: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Encode a message to bytes, enforcing the payload size limit.
pub fn encode<M: Message>(msg: &M) -> Result<Bytes, CodecError> {
    let len = msg.encoded_len();
    if len > MAX_STATE_SIZE {
        return Err(CodecError::StateTooLarge(len));
    }
    Ok(Bytes::from(msg.encode_to_vec()))
}

/// Decode a message from bytes.
///
/// Truncated varints, invalid UTF-8 in string fields, and mismatched wire
/// types all surface as [`CodecError::Decode`]. Field numbers the schema
/// does not know are skipped by prost here; use the registry's dynamic path
/// when unknown fields must survive a rewrite.
pub fn decode<M: Message + Default>(bytes: &[u8]) -> Result<M, CodecError> {
    if bytes.len() > MAX_STATE_SIZE {
        return Err(CodecError::StateTooLarge(bytes.len()));
    }
    Ok(M::decode(bytes)?)
}

impl WorkflowContext {
    /// Encode this context for checkpointing.
    pub fn to_bytes(&self) -> Result<Bytes, CodecError> {
        encode(self)
    }

    /// Decode a context from a checkpointed payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        decode(bytes)
    }
}
