// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema resolver.
//!
//! `FieldSelector` picks the candidate fields of a type, `WireTypeResolver`
//! classifies each one, and `SchemaResolver` ties them together and assigns
//! field numbers. The output `Schema` is immutable and safe to cache.

mod field_info;
mod infer;
mod schema;
mod selector;

pub use field_info::{FieldInfo, FieldShape, Schema, MAX_FIELD_NUMBER};
pub use infer::{effective_type, WireTypeResolver};
pub use schema::{resolve, SchemaResolver};
pub use selector::FieldSelector;
