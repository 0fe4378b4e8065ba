// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire type inference for a single field.
//!
//! Precedence:
//! 1. explicit directive wire type, used verbatim
//! 2. the element type stands in for a container
//! 3. scalar registry
//! 4. enumeration -> ENUM
//! 5. anything else -> OBJECT
//!
//! The zigzag overlay (INT32 -> SINT32, INT64 -> SINT64) only touches
//! inferred types.

use crate::error::SchemaError;
use crate::registry;
use crate::types::{FieldDeclaration, TypeClass, TypeIdent, WireType};

#[derive(Debug, Clone, Copy)]
pub struct WireTypeResolver {
    zigzag: bool,
}

impl WireTypeResolver {
    pub fn new(zigzag: bool) -> Self {
        Self { zigzag }
    }

    pub fn resolve(&self, field: &FieldDeclaration) -> WireType {
        if let Some(explicit) = field.directive().and_then(|d| d.wire_type) {
            return explicit;
        }

        let inferred = classify(effective_type(field));
        if self.zigzag {
            inferred.zigzag().unwrap_or(inferred)
        } else {
            inferred
        }
    }

    /// Reject raw arrays unless their element is the byte type.
    ///
    /// Checked on the declared type and on a container's element type.
    pub fn validate(field: &FieldDeclaration) -> Result<(), SchemaError> {
        let unsupported = is_unsupported_array(field.ty())
            || field.element().is_some_and(is_unsupported_array);
        if unsupported {
            return Err(SchemaError::UnsupportedArrayType {
                owner: field.owner().to_string(),
                field: field.name().to_string(),
            });
        }
        Ok(())
    }
}

/// Type whose wire type is resolved: the element for containers.
pub fn effective_type(field: &FieldDeclaration) -> &TypeIdent {
    field.element().unwrap_or_else(|| field.ty())
}

fn classify(ty: &TypeIdent) -> WireType {
    if let Some(scalar) = registry::lookup(ty) {
        scalar
    } else if ty.is_enum() {
        WireType::Enum
    } else {
        WireType::Object
    }
}

fn is_unsupported_array(ty: &TypeIdent) -> bool {
    matches!(ty.class(), TypeClass::Array { element, .. } if !element.is_byte())
}
