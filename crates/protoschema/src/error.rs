// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema resolution errors.
//!
//! All of these are configuration defects in the declared type. They are
//! raised at resolution time, never retried, and never yield a partial
//! schema.

use thiserror::Error;

/// Resolution failure modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Annotation-only selection in strict mode found no directive-bearing field.
    #[error("type '{owner}' has no field carrying a protobuf directive")]
    NoAnnotatedFields {
        owner: String,
    },

    /// A candidate field lacks a directive where the selection mode requires one.
    #[error("field '{field}' on type '{owner}' has no protobuf directive")]
    MissingDirective {
        owner: String,
        field: String,
    },

    /// Raw fixed-size array of a non-byte element type.
    #[error("array type of field '{field}' on type '{owner}' is not supported, use Vec<T> instead")]
    UnsupportedArrayType {
        owner: String,
        field: String,
    },

    /// Two fields claim the same explicit field number.
    #[error("order {order} on type '{owner}' is claimed by both '{first}' and '{second}'")]
    DuplicateOrder {
        owner: String,
        order: u32,
        /// Field that claimed the number first.
        first: String,
        /// Field that tried to claim it again.
        second: String,
    },

    /// A field number, explicit or assigned, exceeds the protobuf maximum.
    #[error("order {order} of field '{field}' on type '{owner}' exceeds the maximum field number {max}")]
    OrderOutOfRange {
        owner: String,
        field: String,
        order: u32,
        max: u32,
    },
}

impl SchemaError {
    /// Owning type the error was raised for.
    pub fn owner(&self) -> &str {
        match self {
            Self::NoAnnotatedFields { owner }
            | Self::MissingDirective { owner, .. }
            | Self::UnsupportedArrayType { owner, .. }
            | Self::DuplicateOrder { owner, .. }
            | Self::OrderOutOfRange { owner, .. } => owner,
        }
    }
}
