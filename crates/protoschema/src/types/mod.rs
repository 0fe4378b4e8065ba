// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declaration model: type identities, field/type declarations, wire types.

pub mod declaration;
pub mod ident;
pub mod wire_type;

pub use declaration::{parse_wire_type, Directive, FieldDeclaration, TypeDeclaration};
pub use ident::{short_name, Described, TypeClass, TypeIdent};
pub use wire_type::{UnknownWireType, WireFormat, WireType};
