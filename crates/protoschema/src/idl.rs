// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `.proto` (proto2) rendering of resolved schemas.
//!
//! Used by code generation tooling and diagnostics. Fields are emitted in
//! field-number order; enumerations and nested messages are referenced by
//! their short name and are expected to be rendered alongside.

use crate::resolver::{FieldInfo, Schema};
use crate::types::short_name;
use std::fmt::Write as _;

/// Protobuf type name of a resolved field.
pub fn field_type_name(field: &FieldInfo) -> &str {
    if field.wire_type().is_named() {
        short_name(field.value_type())
    } else {
        field.wire_type().proto_name()
    }
}

fn label(field: &FieldInfo) -> &'static str {
    if field.is_repeated() {
        "repeated"
    } else if field.required() {
        "required"
    } else {
        "optional"
    }
}

/// Render one `message` block.
pub fn render_message(schema: &Schema) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "message {} {{", short_name(schema.owner()));
    for field in schema.sorted_by_order() {
        for line in field.description().lines() {
            let _ = writeln!(out, "  // {line}");
        }
        let _ = writeln!(
            out,
            "  {} {} {} = {};",
            label(field),
            field_type_name(field),
            field.name(),
            field.order()
        );
    }
    out.push_str("}\n");
    out
}

/// Render a complete `.proto` file for a set of schemas.
pub fn render_file<'a, I>(package: Option<&str>, schemas: I) -> String
where
    I: IntoIterator<Item = &'a Schema>,
{
    let mut out = String::from("syntax = \"proto2\";\n");
    if let Some(package) = package.filter(|p| !p.is_empty()) {
        let _ = write!(out, "\npackage {package};\n");
    }
    for schema in schemas {
        out.push('\n');
        out.push_str(&render_message(schema));
    }
    out
}
