// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Message` trait implemented by `#[derive(Message)]`.

use crate::cache::global_cache;
use crate::error::SchemaError;
use crate::resolver::Schema;
use crate::types::{Described, TypeDeclaration};
use std::sync::Arc;

/// A record type that carries its own field declarations.
///
/// Usually derived:
///
/// ```ignore
/// use protoschema::{Enumeration, Message};
///
/// #[derive(Enumeration)]
/// enum Status { Active, Closed }
///
/// #[derive(Message)]
/// #[proto(zigzag)]
/// struct Account {
///     #[proto(order = 1, required)]
///     id: i64,
///     #[proto(description = "display name")]
///     name: String,
///     #[proto]
///     status: Status,
///     #[proto(ignore)]
///     session: Vec<u8>,
/// }
///
/// let schema = Account::schema()?;
/// ```
pub trait Message: Described {
    /// Field declarations in source order, plus type-level directives.
    fn declaration() -> TypeDeclaration;

    /// Resolved schema, cached process-wide after the first call.
    fn schema() -> Result<Arc<Schema>, SchemaError> {
        let ident = Self::type_ident();
        global_cache().get_or_resolve_with(ident.name(), Self::declaration)
    }
}
