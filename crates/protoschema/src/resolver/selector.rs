// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Candidate field selection.

use crate::error::SchemaError;
use crate::types::{FieldDeclaration, TypeDeclaration};

/// Picks the fields of a type that take part in schema resolution.
///
/// - schema-defined types: every field not marked `ignore`
/// - otherwise: only fields carrying a directive
#[derive(Debug, Clone, Copy)]
pub struct FieldSelector {
    strict: bool,
}

impl FieldSelector {
    /// `strict` rejects annotation-only types with no directive-bearing field.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn select<'a>(
        &self,
        declaration: &'a TypeDeclaration,
    ) -> Result<Vec<&'a FieldDeclaration>, SchemaError> {
        self.select_fields(
            declaration.name(),
            declaration.fields(),
            declaration.is_schema_defined(),
        )
    }

    /// Selection over a bare field list, in declaration order.
    pub fn select_fields<'a>(
        &self,
        owner: &str,
        fields: &'a [FieldDeclaration],
        schema_defined: bool,
    ) -> Result<Vec<&'a FieldDeclaration>, SchemaError> {
        if schema_defined {
            return Ok(fields.iter().filter(|f| !f.is_ignored()).collect());
        }

        let selected: Vec<_> = fields.iter().filter(|f| f.directive().is_some()).collect();
        if selected.is_empty() && self.strict {
            return Err(SchemaError::NoAnnotatedFields {
                owner: owner.to_string(),
            });
        }
        Ok(selected)
    }
}
