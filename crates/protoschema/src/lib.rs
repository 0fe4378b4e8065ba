// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # protoschema - protobuf field schemas for Rust record types
//!
//! Resolves the protobuf field layout of a record type from its declared
//! fields: which fields are serialized, the protobuf scalar type of each
//! field, and the field numbers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use protoschema::{Enumeration, Message};
//!
//! #[derive(Enumeration)]
//! enum Status { Active, Closed }
//!
//! #[derive(Message)]
//! #[proto(zigzag)]
//! struct Account {
//!     #[proto(order = 1, required)]
//!     id: i64,          // sint64 (zigzag), field 1
//!     #[proto]
//!     tags: Vec<String>, // repeated string, field 2
//!     #[proto]
//!     status: Status,   // enum, field 3
//! }
//!
//! let schema = Account::schema()?;
//! print!("{}", protoschema::idl::render_message(&schema));
//! ```
//!
//! ## Resolution Pipeline
//!
//! ```text
//! TypeDeclaration (derive / manifest)
//!   -> FieldSelector    : which fields take part
//!   -> WireTypeResolver : declared type -> WireType (+ zigzag overlay)
//!   -> SchemaResolver   : explicit orders, duplicate check, backfill
//!   -> Schema           : immutable, cached in SchemaCache
//! ```
//!
//! ## Modules Overview
//!
//! - [`types`] - declarations, type identities, wire types
//! - [`registry`] - scalar type registry
//! - [`resolver`] - schema resolution
//! - [`cache`] - concurrent schema cache
//! - [`idl`] - `.proto` rendering
//! - `manifest` - TOML type registration (feature `manifest`)

// Allow the derive macro to work inside this crate's tests
extern crate self as protoschema;

/// Concurrent schema cache.
pub mod cache;
/// Resolver configuration.
pub mod config;
/// Schema resolution errors.
pub mod error;
/// `.proto` text rendering.
pub mod idl;
/// TOML manifest for static type registration.
#[cfg(feature = "manifest")]
pub mod manifest;
mod message;
/// Scalar type registry.
pub mod registry;
/// Schema resolution.
pub mod resolver;
/// Declarations, type identities and wire types.
pub mod types;

pub use cache::{global_cache, LookupStats, SchemaCache};
pub use config::ResolverConfig;
pub use error::SchemaError;
pub use registry::{registry, ScalarTypeRegistry};
pub use resolver::{
    resolve, FieldInfo, FieldSelector, FieldShape, Schema, SchemaResolver, WireTypeResolver,
    MAX_FIELD_NUMBER,
};
pub use types::{
    Described, Directive, FieldDeclaration, TypeClass, TypeDeclaration, TypeIdent, WireFormat,
    WireType,
};

#[cfg(feature = "manifest")]
pub use manifest::{Manifest, ManifestError};

// Trait (for bounds) and derive macros share names, as with serde.
pub use message::Message;
pub use protoschema_codegen::{Enumeration, Message};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
