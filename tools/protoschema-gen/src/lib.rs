// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command implementations for `protoschema-gen`.

use anyhow::{bail, Context, Result};
use protoschema::{idl, FieldInfo, Manifest, Schema, SchemaError};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Default `--log-level` filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the `resolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let manifest = Manifest::from_file(path)
        .with_context(|| format!("failed to load manifest {}", path.display()))?;
    tracing::debug!(
        "loaded {} message(s), {} enum(s) from {}",
        manifest.messages.len(),
        manifest.enums.len(),
        path.display()
    );
    Ok(manifest)
}

/// Resolve every message, or only `only` when given.
pub fn resolve(manifest: &Manifest, only: Option<&str>) -> Result<Vec<Schema>> {
    let resolver = manifest.resolver();
    let declarations = match only {
        Some(name) => match manifest.declaration(name)? {
            Some(decl) => vec![decl],
            None => bail!("type '{name}' is not declared in the manifest"),
        },
        None => manifest.declarations()?,
    };

    declarations
        .iter()
        .map(|decl| {
            resolver
                .resolve(decl)
                .with_context(|| format!("failed to resolve '{}'", decl.name()))
        })
        .collect()
}

#[derive(Serialize)]
struct SchemaView<'a> {
    owner: &'a str,
    schema_defined: bool,
    zigzag: bool,
    fields: Vec<&'a FieldInfo>,
}

/// JSON array of schemas, fields sorted by number.
pub fn render_json(schemas: &[Schema]) -> Result<String> {
    let views: Vec<_> = schemas
        .iter()
        .map(|schema| SchemaView {
            owner: schema.owner(),
            schema_defined: schema.is_schema_defined(),
            zigzag: schema.is_zigzag(),
            fields: schema.sorted_by_order(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&views)?)
}

/// Human-readable field table per schema.
pub fn render_table(schemas: &[Schema]) -> String {
    let mut out = String::new();
    for schema in schemas {
        let mut flags = Vec::new();
        if schema.is_schema_defined() {
            flags.push("schema_defined");
        }
        if schema.is_zigzag() {
            flags.push("zigzag");
        }
        if flags.is_empty() {
            let _ = writeln!(out, "{}", schema.owner());
        } else {
            let _ = writeln!(out, "{} ({})", schema.owner(), flags.join(", "));
        }

        let _ = writeln!(
            out,
            "  {:<6} {:<20} {:<10} {:<9} {:<9} DECLARED",
            "ORDER", "NAME", "WIRE", "SHAPE", "REQUIRED"
        );
        for field in schema.sorted_by_order() {
            let _ = writeln!(
                out,
                "  {:<6} {:<20} {:<10} {:<9} {:<9} {}",
                field.order(),
                field.name(),
                field.wire_type(),
                if field.is_repeated() { "repeated" } else { "single" },
                if field.required() { "yes" } else { "no" },
                field.declared_type()
            );
        }
        out.push('\n');
    }
    out
}

/// `.proto` text for every message in the manifest.
pub fn render_proto(manifest: &Manifest, package: Option<&str>) -> Result<String> {
    let schemas = resolve(manifest, None)?;
    Ok(idl::render_file(package, &schemas))
}

/// Outcome of resolving one message during validation.
#[derive(Debug)]
pub struct ValidationEntry {
    pub message: String,
    pub outcome: Result<usize, SchemaError>,
}

/// Resolve every message, collecting failures instead of stopping at the first.
pub fn validate(manifest: &Manifest) -> Result<Vec<ValidationEntry>> {
    let resolver = manifest.resolver();
    let entries = manifest
        .declarations()?
        .iter()
        .map(|decl| ValidationEntry {
            message: decl.name().to_string(),
            outcome: resolver.resolve(decl).map(|schema| schema.len()),
        })
        .collect();
    Ok(entries)
}
