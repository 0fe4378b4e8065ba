// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use protoschema::SchemaError;
use protoschema_gen::{
    load_manifest, render_json, render_proto, render_table, resolve, validate, DEFAULT_LOG_LEVEL,
};
use std::io::Write;
use tempfile::NamedTempFile;

const MANIFEST: &str = r#"
[[enum]]
name = "fleet::Mode"

[[message]]
name = "fleet::Vehicle"
zigzag = true

[[message.field]]
name = "id"
type = "u32"
proto = { order = 1, required = true }

[[message.field]]
name = "speed"
type = "i32"
proto = { description = "km/h" }

[[message.field]]
name = "mode"
type = "fleet::Mode"
proto = {}

[[message]]
name = "fleet::Depot"

[[message.field]]
name = "vehicles"
type = "Vec<fleet::Vehicle>"
proto = {}
"#;

fn manifest_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn resolve_single_type() {
    let file = manifest_file(MANIFEST);
    let manifest = load_manifest(file.path()).expect("load");

    let schemas = resolve(&manifest, Some("fleet::Vehicle")).expect("resolve");
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].len(), 3);

    assert!(resolve(&manifest, Some("fleet::Missing")).is_err());
}

#[test]
fn table_lists_fields_by_number() {
    let manifest = load_manifest(manifest_file(MANIFEST).path()).expect("load");
    let schemas = resolve(&manifest, None).expect("resolve");
    let table = render_table(&schemas);

    assert!(table.starts_with("fleet::Vehicle (zigzag)\n"));
    let id_line = table.lines().find(|l| l.contains(" id ")).expect("id row");
    // Inferred int32 is rewritten under zigzag even for unsigned sources.
    assert!(id_line.contains("sint32"));
    assert!(id_line.contains("yes"));
    let speed_line = table.lines().find(|l| l.contains(" speed ")).expect("speed row");
    assert!(speed_line.contains("sint32"));
    assert!(table.contains("fleet::Depot\n"));
}

#[test]
fn json_output_is_parseable() {
    let manifest = load_manifest(manifest_file(MANIFEST).path()).expect("load");
    let schemas = resolve(&manifest, None).expect("resolve");
    let json = render_json(&schemas).expect("json");

    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let vehicle = &value[0];
    assert_eq!(vehicle["owner"], "fleet::Vehicle");
    assert_eq!(vehicle["fields"][0]["name"], "id");
    assert_eq!(vehicle["fields"][1]["wire_type"], "sint32");
    assert_eq!(vehicle["fields"][1]["description"], "km/h");
    assert_eq!(value[1]["fields"][0]["shape"], "repeated");
}

#[test]
fn proto_output_has_package_and_messages() {
    let manifest = load_manifest(manifest_file(MANIFEST).path()).expect("load");
    let text = render_proto(&manifest, Some("fleet")).expect("proto");

    assert!(text.starts_with("syntax = \"proto2\";\n\npackage fleet;\n"));
    assert!(text.contains("message Vehicle {"));
    assert!(text.contains("  optional Mode mode = 3;"));
    assert!(text.contains("  repeated Vehicle vehicles = 1;"));
}

#[test]
fn validate_collects_every_failure() {
    let broken = format!(
        "{MANIFEST}\n[[message]]\nname = \"fleet::Broken\"\n\
         [[message.field]]\nname = \"grid\"\ntype = \"[i32; 4]\"\nproto = {{}}\n"
    );
    let manifest = load_manifest(manifest_file(&broken).path()).expect("load");
    let entries = validate(&manifest).expect("validate");

    assert_eq!(entries.len(), 3);
    assert!(entries[0].outcome.is_ok());
    assert!(matches!(
        entries[2].outcome,
        Err(SchemaError::UnsupportedArrayType { .. })
    ));
}

#[test]
fn unknown_manifest_path_reports_context() {
    let err = load_manifest(std::path::Path::new("/nonexistent/manifest.toml")).expect_err("missing");
    assert!(err.to_string().contains("failed to load manifest"));
}

#[test]
fn default_log_level_is_info() {
    assert_eq!(DEFAULT_LOG_LEVEL, "info");
    assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_LEVEL).is_ok());
}
