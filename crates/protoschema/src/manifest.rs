// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TOML manifest: static type registration without the derive macro.
//!
//! ```toml
//! [resolver]
//! strict = true
//!
//! [[enum]]
//! name = "Status"
//!
//! [[message]]
//! name = "Account"
//! zigzag = true
//!
//! [[message.field]]
//! name = "id"
//! type = "i64"
//! proto = { order = 1, required = true }
//!
//! [[message.field]]
//! name = "tags"
//! type = "Vec<String>"
//! proto = {}
//! ```
//!
//! Field order in the file is the declaration order.

use crate::config::ResolverConfig;
use crate::error::SchemaError;
use crate::resolver::{Schema, SchemaResolver};
use crate::types::{Directive, FieldDeclaration, TypeDeclaration, TypeIdent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Manifest errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid type '{ty}' for field '{field}': {message}")]
    InvalidType {
        field: String,
        ty: String,
        message: String,
    },

    #[error("invalid manifest: {0}")]
    Invalid(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Parsed manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default, rename = "enum")]
    pub enums: Vec<EnumEntry>,

    #[serde(default, rename = "message")]
    pub messages: Vec<MessageEntry>,
}

/// An enumeration type name referenced by message fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumEntry {
    pub name: String,
}

/// One owning type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageEntry {
    pub name: String,

    #[serde(default)]
    pub schema_defined: bool,

    #[serde(default)]
    pub zigzag: bool,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldEntry>,
}

/// One declared field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,

    /// Type expression, e.g. `i32`, `Option<String>`, `Vec<Item>`, `[u8; 16]`.
    #[serde(rename = "type")]
    pub ty: String,

    /// Field directive; absent means the field carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<Directive>,
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check for empty and duplicate names.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for name in self
            .enums
            .iter()
            .map(|e| &e.name)
            .chain(self.messages.iter().map(|m| &m.name))
        {
            if name.trim().is_empty() {
                return Err(ManifestError::Invalid("type with empty name".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ManifestError::Invalid(format!(
                    "type '{name}' is declared more than once"
                )));
            }
            if canonical_name(name).is_some() {
                return Err(ManifestError::Invalid(format!(
                    "type '{name}' shadows a built-in type"
                )));
            }
        }

        for message in &self.messages {
            let mut fields = HashSet::new();
            for field in &message.fields {
                if field.name.trim().is_empty() {
                    return Err(ManifestError::Invalid(format!(
                        "message '{}' has a field with an empty name",
                        message.name
                    )));
                }
                if !fields.insert(field.name.as_str()) {
                    return Err(ManifestError::Invalid(format!(
                        "field '{}' is declared more than once on '{}'",
                        field.name, message.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn declared_types(&self) -> DeclaredTypes<'_> {
        DeclaredTypes {
            enums: self.enums.iter().map(|e| e.name.as_str()).collect(),
            messages: self.messages.iter().map(|m| m.name.as_str()).collect(),
        }
    }

    /// Declarations for every message, in file order.
    pub fn declarations(&self) -> Result<Vec<TypeDeclaration>, ManifestError> {
        let declared = self.declared_types();
        self.messages
            .iter()
            .map(|message| Self::build_declaration(message, &declared))
            .collect()
    }

    /// Declaration of a single message by name.
    pub fn declaration(&self, name: &str) -> Result<Option<TypeDeclaration>, ManifestError> {
        let declared = self.declared_types();
        self.messages
            .iter()
            .find(|m| m.name == name)
            .map(|message| Self::build_declaration(message, &declared))
            .transpose()
    }

    fn build_declaration(
        message: &MessageEntry,
        declared: &DeclaredTypes<'_>,
    ) -> Result<TypeDeclaration, ManifestError> {
        let mut declaration = TypeDeclaration::new(&message.name)
            .schema_defined(message.schema_defined)
            .zigzag(message.zigzag);

        for entry in &message.fields {
            let ty = parse_type(&entry.ty, declared).map_err(|message| ManifestError::InvalidType {
                field: entry.name.clone(),
                ty: entry.ty.clone(),
                message,
            })?;
            let mut field = FieldDeclaration::new(entry.name.clone(), ty);
            if let Some(directive) = &entry.proto {
                field = field.with_directive(directive.clone());
            }
            declaration.push_field(field);
        }

        Ok(declaration)
    }

    pub fn resolver(&self) -> SchemaResolver {
        SchemaResolver::new(self.resolver)
    }

    /// Resolve every message with the manifest's resolver settings.
    pub fn resolve_all(&self) -> Result<Vec<Schema>, ManifestError> {
        let resolver = self.resolver();
        self.declarations()?
            .iter()
            .map(|decl| resolver.resolve(decl).map_err(ManifestError::from))
            .collect()
    }
}

/// Type names declared by a manifest. They take precedence over built-ins.
#[derive(Debug, Default)]
pub struct DeclaredTypes<'a> {
    pub enums: HashSet<&'a str>,
    pub messages: HashSet<&'a str>,
}

/// Unqualified names of the scalar and wrapper types.
const BUILTIN_NAMES: &[&str] = &[
    "i8", "u8", "i16", "u16", "i32", "u32", "i64", "u64", "isize", "usize", "f32", "f64", "bool",
    "String", "str", "Bytes", "Option", "Vec", "VecDeque", "Box",
];

/// Qualified std/bytes paths accepted for the same types.
const BUILTIN_PATHS: &[(&str, &str)] = &[
    ("std::string::String", "String"),
    ("alloc::string::String", "String"),
    ("bytes::Bytes", "Bytes"),
    ("std::option::Option", "Option"),
    ("core::option::Option", "Option"),
    ("std::vec::Vec", "Vec"),
    ("alloc::vec::Vec", "Vec"),
    ("std::collections::VecDeque", "VecDeque"),
    ("std::collections::vec_deque::VecDeque", "VecDeque"),
    ("alloc::collections::VecDeque", "VecDeque"),
    ("std::boxed::Box", "Box"),
    ("alloc::boxed::Box", "Box"),
];

/// Built-in name a path denotes, if any.
fn canonical_name(path: &str) -> Option<&'static str> {
    BUILTIN_NAMES
        .iter()
        .find(|name| **name == path)
        .or_else(|| {
            BUILTIN_PATHS
                .iter()
                .find(|(full, _)| *full == path)
                .map(|(_, name)| name)
        })
        .copied()
}

/// Parse a type expression into a `TypeIdent`.
///
/// Declared enums become enumerations and declared messages nested
/// messages, even when their last path segment matches a built-in name.
/// Any other unknown name is a nested message.
pub fn parse_type(expr: &str, declared: &DeclaredTypes<'_>) -> Result<TypeIdent, String> {
    let mut parser = TypeParser { src: expr, pos: 0 };
    let ty = parser.parse(declared)?;
    parser.skip_ws();
    if parser.pos != expr.len() {
        return Err(format!("unexpected input at offset {}", parser.pos));
    }
    Ok(ty)
}

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected '{token}' at offset {}", self.pos))
        }
    }

    fn ident(&mut self) -> Result<&'a str, String> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(idx, c)| {
                !(c == '_' || c.is_ascii_alphanumeric()) || (idx == 0 && c.is_ascii_digit())
            })
            .map_or(rest.len(), |(idx, _)| idx);
        if len == 0 {
            return Err(format!("expected identifier at offset {}", self.pos));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn path(&mut self) -> Result<String, String> {
        let mut path = self.ident()?.to_string();
        while self.eat("::") {
            path.push_str("::");
            path.push_str(self.ident()?);
        }
        Ok(path)
    }

    fn number(&mut self) -> Result<usize, String> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '_'))
            .unwrap_or(rest.len());
        let digits: String = rest[..len].chars().filter(|c| *c != '_').collect();
        let value = digits
            .parse()
            .map_err(|_| format!("expected array length at offset {}", self.pos))?;
        self.pos += len;
        Ok(value)
    }

    fn parse(&mut self, declared: &DeclaredTypes<'_>) -> Result<TypeIdent, String> {
        if self.eat("&") {
            return Err("references are not supported".into());
        }

        if self.eat("[") {
            let element = self.parse(declared)?;
            if self.eat(";") {
                let len = self.number()?;
                self.expect("]")?;
                return Ok(TypeIdent::array(element, len));
            }
            self.expect("]")?;
            return if element.name() == "u8" {
                Ok(TypeIdent::plain("[u8]"))
            } else {
                Err("slices other than [u8] are not supported".into())
            };
        }

        let path = self.path()?;
        let mut args = Vec::new();
        if self.eat("<") {
            loop {
                args.push(self.parse(declared)?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        let is_declared =
            declared.enums.contains(path.as_str()) || declared.messages.contains(path.as_str());
        if is_declared && !args.is_empty() {
            return Err(format!("unsupported generic type '{path}'"));
        }
        if declared.enums.contains(path.as_str()) {
            return Ok(TypeIdent::enumeration(path));
        }
        if is_declared {
            return Ok(TypeIdent::plain(path));
        }

        let mut args = args.into_iter();
        match (canonical_name(&path), args.len()) {
            (Some("Option"), 1) => Ok(TypeIdent::option_of(next_arg(&mut args)?)),
            (Some("Vec"), 1) => Ok(TypeIdent::vec_of(next_arg(&mut args)?)),
            (Some("VecDeque"), 1) => Ok(TypeIdent::vec_deque_of(next_arg(&mut args)?)),
            (Some("Box"), 1) => {
                let inner = next_arg(&mut args)?;
                Ok(match inner.name() {
                    "str" => TypeIdent::plain("Box<str>"),
                    "[u8]" => TypeIdent::plain("Box<[u8]>"),
                    _ => inner,
                })
            }
            (Some("Option" | "Vec" | "VecDeque" | "Box"), _) => {
                Err(format!("'{path}' takes exactly one generic argument"))
            }
            (Some(name), 0) => Ok(TypeIdent::plain(name)),
            (None, 0) => Ok(TypeIdent::plain(path)),
            _ => Err(format!("unsupported generic type '{path}'")),
        }
    }
}

fn next_arg(args: &mut impl Iterator<Item = TypeIdent>) -> Result<TypeIdent, String> {
    args.next()
        .ok_or_else(|| "missing generic argument".to_string())
}
