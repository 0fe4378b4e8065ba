// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved field descriptors and the schema that groups them.

use crate::types::{FieldDeclaration, WireFormat, WireType};
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Largest protobuf field number (29 bits), so `tag()` always fits a `u32`.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Collection shape of a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    Single,
    Repeated,
}

/// Immutable wire descriptor of one field.
///
/// Equality and hashing only look at the owning type and the field name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    #[serde(skip)]
    owner: Arc<str>,
    name: String,
    declared_type: String,
    /// Element type for repeated fields, declared type otherwise.
    value_type: String,
    wire_type: WireType,
    required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    order: u32,
    shape: FieldShape,
    position: usize,
}

impl FieldInfo {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name as registered (`Vec<String>`, `Option<i32>`, ...).
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Type whose wire type was resolved: the element for repeated fields.
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    /// Wire type of the field, or of each element when repeated.
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Wire field number.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn is_repeated(&self) -> bool {
        self.shape == FieldShape::Repeated
    }

    /// Element wire type of a repeated field.
    pub fn element_wire_type(&self) -> Option<WireType> {
        self.is_repeated().then_some(self.wire_type)
    }

    /// Declaration position of the source field.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Protobuf field key: `(order << 3) | wire_format`.
    ///
    /// Resolution caps `order` at [`MAX_FIELD_NUMBER`], so the shift is lossless.
    pub fn tag(&self) -> u32 {
        (self.order << 3) | self.wire_format().as_u32()
    }

    pub fn wire_format(&self) -> WireFormat {
        self.wire_type.wire_format()
    }
}

impl PartialEq for FieldInfo {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for FieldInfo {}

impl Hash for FieldInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

/// A resolved field still waiting for its field number.
pub(crate) struct FieldDraft {
    owner: Arc<str>,
    name: String,
    declared_type: String,
    value_type: String,
    wire_type: WireType,
    required: bool,
    description: String,
    shape: FieldShape,
    position: usize,
}

impl FieldDraft {
    pub(crate) fn new(field: &FieldDeclaration, wire_type: WireType) -> Self {
        let (required, description) = field
            .directive()
            .map_or((false, String::new()), |d| (d.required, d.description.clone()));
        let shape = if field.is_container() {
            FieldShape::Repeated
        } else {
            FieldShape::Single
        };
        let value_type = field.element().unwrap_or_else(|| field.ty()).name().to_string();

        Self {
            owner: Arc::clone(field.owner_arc()),
            name: field.name().to_string(),
            declared_type: field.ty().name().to_string(),
            value_type,
            wire_type,
            required,
            description,
            shape,
            position: field.position(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn finish(self, order: u32) -> FieldInfo {
        FieldInfo {
            owner: self.owner,
            name: self.name,
            declared_type: self.declared_type,
            value_type: self.value_type,
            wire_type: self.wire_type,
            required: self.required,
            description: self.description,
            order,
            shape: self.shape,
            position: self.position,
        }
    }
}

/// Resolved schema of one owning type.
///
/// Fields are listed in declaration order; field numbers need not be
/// monotonic in that order.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    owner: String,
    schema_defined: bool,
    zigzag: bool,
    fields: Vec<FieldInfo>,
}

impl Schema {
    pub(crate) fn new(owner: &str, schema_defined: bool, zigzag: bool, fields: Vec<FieldInfo>) -> Self {
        Self {
            owner: owner.to_string(),
            schema_defined,
            zigzag,
            fields,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_schema_defined(&self) -> bool {
        self.schema_defined
    }

    pub fn is_zigzag(&self) -> bool {
        self.zigzag
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn by_order(&self, order: u32) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.order == order)
    }

    /// Fields sorted by field number.
    pub fn sorted_by_order(&self) -> Vec<&FieldInfo> {
        let mut sorted: Vec<_> = self.fields.iter().collect();
        sorted.sort_by_key(|f| f.order);
        sorted
    }

    pub fn max_order(&self) -> u32 {
        self.fields.iter().map(|f| f.order).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<FieldInfo> {
        self.fields
    }
}
