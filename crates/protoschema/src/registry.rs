// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar type registry.
//!
//! Maps scalar type names to their canonical wire type. The table is built
//! once on first use and never mutated afterwards, so lookups need no lock.

use crate::types::{TypeClass, TypeIdent, WireType};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Base scalar table. Every sized entry also gets a nullable `Option<T>` form.
const SCALARS: &[(&str, WireType)] = &[
    ("i8", WireType::Int32),
    ("u8", WireType::Int32),
    ("i16", WireType::Int32),
    ("u16", WireType::Int32),
    ("i32", WireType::Int32),
    ("u32", WireType::Int32),
    ("i64", WireType::Int64),
    ("u64", WireType::Int64),
    ("isize", WireType::Int64),
    ("usize", WireType::Int64),
    ("String", WireType::String),
    ("str", WireType::String),
    ("Box<str>", WireType::String),
    ("Vec<u8>", WireType::Bytes),
    ("Vec<Option<u8>>", WireType::Bytes),
    ("Box<[u8]>", WireType::Bytes),
    ("[u8]", WireType::Bytes),
    ("Bytes", WireType::Bytes),
    ("f32", WireType::Float),
    ("f64", WireType::Double),
    ("bool", WireType::Bool),
];

/// Unsized entries have no `Option<T>` form.
const UNSIZED: &[&str] = &["str", "[u8]"];

static REGISTRY: OnceLock<ScalarTypeRegistry> = OnceLock::new();

/// Process-wide registry (built on first call).
pub fn registry() -> &'static ScalarTypeRegistry {
    REGISTRY.get_or_init(ScalarTypeRegistry::build)
}

/// Immutable scalar-name to wire-type table.
#[derive(Debug)]
pub struct ScalarTypeRegistry {
    table: HashMap<String, WireType>,
}

impl ScalarTypeRegistry {
    fn build() -> Self {
        let mut table = HashMap::with_capacity(SCALARS.len() * 2);
        for &(name, wire_type) in SCALARS {
            table.insert(name.to_string(), wire_type);
            if !UNSIZED.contains(&name) {
                table.insert(format!("Option<{name}>"), wire_type);
            }
        }
        Self { table }
    }

    /// Wire type of a scalar type, `None` for anything else.
    ///
    /// Raw arrays of the byte type count as byte sequences.
    pub fn lookup(&self, ty: &TypeIdent) -> Option<WireType> {
        match ty.class() {
            TypeClass::Plain => self.table.get(ty.name()).copied(),
            TypeClass::Array { element, .. } if element.is_byte() => Some(WireType::Bytes),
            TypeClass::Array { .. } | TypeClass::Enum | TypeClass::Sequence(_) => None,
        }
    }

    pub fn is_scalar(&self, ty: &TypeIdent) -> bool {
        self.lookup(ty).is_some()
    }

    /// Name-only check, used while describing container types.
    pub fn contains_name(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// All entries sorted by type name.
    pub fn entries(&self) -> Vec<(&str, WireType)> {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .map(|(name, wire_type)| (name.as_str(), *wire_type))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Shorthand for `registry().lookup(ty)`.
pub fn lookup(ty: &TypeIdent) -> Option<WireType> {
    registry().lookup(ty)
}

/// Shorthand for `registry().is_scalar(ty)`.
pub fn is_scalar(ty: &TypeIdent) -> bool {
    registry().is_scalar(ty)
}

/// Protobuf type name for a declared type.
///
/// Scalars render as their wire type name (`int32`, `bytes`, ...); every
/// other type renders as its own short name.
pub fn proto_type_name(ty: &TypeIdent) -> Cow<'_, str> {
    match lookup(ty) {
        Some(wire_type) => Cow::Borrowed(wire_type.proto_name()),
        None => Cow::Borrowed(ty.short_name()),
    }
}
