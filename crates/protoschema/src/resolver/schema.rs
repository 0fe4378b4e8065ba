// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema resolution: selection, per-field inference, field numbering.

use super::field_info::{FieldDraft, FieldInfo, Schema, MAX_FIELD_NUMBER};
use super::infer::WireTypeResolver;
use super::selector::FieldSelector;
use crate::config::ResolverConfig;
use crate::error::SchemaError;
use crate::types::{Directive, FieldDeclaration, TypeDeclaration};
use std::collections::HashMap;

/// Turns a `TypeDeclaration` into an immutable `Schema`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver {
    config: ResolverConfig,
}

impl SchemaResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a whole type. Either every field resolves or nothing is returned.
    pub fn resolve(&self, declaration: &TypeDeclaration) -> Result<Schema, SchemaError> {
        let candidates = FieldSelector::new(self.config.strict).select(declaration)?;
        let fields = self.resolve_fields(
            declaration.name(),
            &candidates,
            declaration.is_schema_defined(),
            declaration.is_zigzag(),
        )?;

        log::debug!(
            "[schema] resolved '{}': {} field(s), max order {}",
            declaration.name(),
            fields.len(),
            fields.iter().map(FieldInfo::order).max().unwrap_or(0)
        );

        Ok(Schema::new(
            declaration.name(),
            declaration.is_schema_defined(),
            declaration.is_zigzag(),
            fields,
        ))
    }

    /// Resolve an already selected candidate list.
    ///
    /// Outside schema-defined mode every candidate must carry a directive.
    /// Fields are returned in candidate order; fields without an explicit
    /// order are numbered after the highest explicit order, in that order.
    pub fn resolve_fields(
        &self,
        owner: &str,
        candidates: &[&FieldDeclaration],
        schema_defined: bool,
        zigzag: bool,
    ) -> Result<Vec<FieldInfo>, SchemaError> {
        let wire = WireTypeResolver::new(zigzag);
        let mut drafts: Vec<(FieldDraft, Option<u32>)> = Vec::with_capacity(candidates.len());
        let mut claimed: HashMap<u32, &str> = HashMap::new();
        let mut max_order = 0u32;

        for field in candidates {
            if field.is_ignored() {
                log::debug!(
                    "[schema] field '{}' on '{}' is marked ignore, skipping",
                    field.name(),
                    owner
                );
                continue;
            }

            let directive = field.directive();
            if directive.is_none() && !schema_defined {
                return Err(SchemaError::MissingDirective {
                    owner: owner.to_string(),
                    field: field.name().to_string(),
                });
            }

            WireTypeResolver::validate(field)?;
            let draft = FieldDraft::new(field, wire.resolve(field));

            let order = match directive.and_then(Directive::explicit_order) {
                Some(order) => {
                    if order > MAX_FIELD_NUMBER {
                        return Err(out_of_range(owner, field.name(), order));
                    }
                    if let Some(first) = claimed.get(&order) {
                        return Err(SchemaError::DuplicateOrder {
                            owner: owner.to_string(),
                            order,
                            first: (*first).to_string(),
                            second: field.name().to_string(),
                        });
                    }
                    claimed.insert(order, field.name());
                    max_order = max_order.max(order);
                    Some(order)
                }
                None => None,
            };
            drafts.push((draft, order));
        }

        let mut next = max_order;
        let mut fields = Vec::with_capacity(drafts.len());
        for (draft, order) in drafts {
            let order = match order {
                Some(order) => order,
                None => {
                    next += 1;
                    if next > MAX_FIELD_NUMBER {
                        return Err(out_of_range(owner, draft.name(), next));
                    }
                    log::debug!(
                        "[schema] field '{}' on '{}' has no explicit order, assigned {}",
                        draft.name(),
                        owner,
                        next
                    );
                    next
                }
            };
            fields.push(draft.finish(order));
        }

        Ok(fields)
    }
}

fn out_of_range(owner: &str, field: &str, order: u32) -> SchemaError {
    SchemaError::OrderOutOfRange {
        owner: owner.to_string(),
        field: field.to_string(),
        order,
        max: MAX_FIELD_NUMBER,
    }
}

/// Resolve with the default (strict) configuration.
pub fn resolve(declaration: &TypeDeclaration) -> Result<Schema, SchemaError> {
    SchemaResolver::default().resolve(declaration)
}
