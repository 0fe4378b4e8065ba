// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field and type declarations consumed by the resolver.
//!
//! Declarations are built once per owning type, either by
//! `#[derive(Message)]` or by the TOML manifest loader, and are read-only
//! afterwards. Field positions are captured when a field is pushed onto its
//! `TypeDeclaration`, so source (or file) order is the authoritative
//! declaration order.

use super::ident::{Described, TypeIdent};
use super::wire_type::WireType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Per-field directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Directive {
    /// Exclude the field from the schema entirely.
    pub ignore: bool,
    pub required: bool,
    pub description: String,
    /// Explicit wire type; `None` means infer.
    #[serde(with = "infer_sentinel")]
    pub wire_type: Option<WireType>,
    /// Explicit field number; absent or non-positive means auto-assign.
    pub order: Option<i32>,
}

impl Directive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directive that only marks the field as excluded.
    pub fn ignored() -> Self {
        Self {
            ignore: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn wire_type(mut self, wire_type: WireType) -> Self {
        self.wire_type = Some(wire_type);
        self
    }

    /// The explicit field number, if one was given and is positive.
    pub fn explicit_order(&self) -> Option<u32> {
        self.order
            .filter(|order| *order > 0)
            .and_then(|order| u32::try_from(order).ok())
    }
}

/// `"default"` (or a missing key) means "infer the wire type".
mod infer_sentinel {
    use super::WireType;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) const INFER: &str = "default";

    pub fn serialize<S: Serializer>(value: &Option<WireType>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(wire_type) => s.serialize_str(wire_type.proto_name()),
            None => s.serialize_str(INFER),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<WireType>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => super::parse_wire_type(&raw).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Parse an attribute or manifest wire type value, honouring the infer sentinel.
pub fn parse_wire_type(value: &str) -> Result<Option<WireType>, super::wire_type::UnknownWireType> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(infer_sentinel::INFER) {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// One declared field of an owning type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    name: Cow<'static, str>,
    owner: Arc<str>,
    ty: TypeIdent,
    position: usize,
    directive: Option<Directive>,
}

impl FieldDeclaration {
    /// Field without a directive. Owner and position are filled in when the
    /// field is added to a [`TypeDeclaration`].
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeIdent) -> Self {
        Self {
            name: name.into(),
            owner: Arc::from(""),
            ty,
            position: 0,
            directive: None,
        }
    }

    /// Field whose declared type describes itself.
    pub fn of<T: Described>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, T::type_ident())
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn owner_arc(&self) -> &Arc<str> {
        &self.owner
    }

    /// Declared type identity.
    pub fn ty(&self) -> &TypeIdent {
        &self.ty
    }

    /// Element type for container-shaped fields.
    pub fn element(&self) -> Option<&TypeIdent> {
        self.ty.element()
    }

    pub fn is_container(&self) -> bool {
        self.ty.is_container()
    }

    /// Ordinal of the field in declaration order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn directive(&self) -> Option<&Directive> {
        self.directive.as_ref()
    }

    pub fn is_ignored(&self) -> bool {
        self.directive.as_ref().is_some_and(|d| d.ignore)
    }
}

/// Declaration of an owning type: its fields plus type-level directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    name: Arc<str>,
    fields: Vec<FieldDeclaration>,
    schema_defined: bool,
    zigzag: bool,
}

impl TypeDeclaration {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            fields: Vec::new(),
            schema_defined: false,
            zigzag: false,
        }
    }

    /// Every non-ignored field is a candidate, directive or not.
    #[must_use]
    pub fn schema_defined(mut self, enabled: bool) -> Self {
        self.schema_defined = enabled;
        self
    }

    /// Rewrite inferred INT32/INT64 to SINT32/SINT64.
    #[must_use]
    pub fn zigzag(mut self, enabled: bool) -> Self {
        self.zigzag = enabled;
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.push_field(field);
        self
    }

    /// Append a field, stamping it with this owner and the next position.
    pub fn push_field(&mut self, mut field: FieldDeclaration) {
        field.owner = Arc::clone(&self.name);
        field.position = self.fields.len();
        self.fields.push(field);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn is_schema_defined(&self) -> bool {
        self.schema_defined
    }

    pub fn is_zigzag(&self) -> bool {
        self.zigzag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_field_stamps_owner_and_position() {
        let decl = TypeDeclaration::new("shop::Order")
            .field(FieldDeclaration::of::<u64>("id"))
            .field(FieldDeclaration::of::<String>("note"));

        let fields = decl.fields();
        assert_eq!(fields[0].owner(), "shop::Order");
        assert_eq!(fields[0].position(), 0);
        assert_eq!(fields[1].position(), 1);
        assert!(fields[1].directive().is_none());
    }

    #[test]
    fn explicit_order_ignores_non_positive_values() {
        assert_eq!(Directive::new().order(4).explicit_order(), Some(4));
        assert_eq!(Directive::new().order(0).explicit_order(), None);
        assert_eq!(Directive::new().order(-2).explicit_order(), None);
        assert_eq!(Directive::new().explicit_order(), None);
    }

    #[test]
    fn infer_sentinel_parses_to_none() {
        assert_eq!(parse_wire_type("default"), Ok(None));
        assert_eq!(parse_wire_type(""), Ok(None));
        assert_eq!(parse_wire_type("fixed32"), Ok(Some(WireType::Fixed32)));
        assert!(parse_wire_type("int128").is_err());
    }

    #[test]
    fn directive_wire_type_accepts_sentinel_in_any_case() {
        for raw in [r#"{"wire_type":"DEFAULT"}"#, r#"{"wire_type":"Default"}"#, "{}"] {
            let directive: Directive = serde_json::from_str(raw).expect(raw);
            assert_eq!(directive.wire_type, None, "{raw}");
        }

        let explicit: Directive = serde_json::from_str(r#"{"wire_type":"SINT32","order":4}"#)
            .expect("explicit");
        assert_eq!(explicit.wire_type, Some(WireType::Sint32));
        assert_eq!(explicit.explicit_order(), Some(4));

        assert!(serde_json::from_str::<Directive>(r#"{"wire_type":"int128"}"#).is_err());
    }
}
