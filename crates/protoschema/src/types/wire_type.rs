// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire types and their protobuf encoding categories.
//!
//! `WireType` is the closed set of encodings a resolved field can carry.
//! `WireFormat` is the 3-bit category written into every field key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protobuf wire format (low 3 bits of a field key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WireFormat {
    /// int32, int64, uint32, uint64, sint32, sint64, bool, enum
    Varint = 0,
    /// fixed64, sfixed64, double
    Fixed64 = 1,
    /// string, bytes, embedded messages
    LengthDelimited = 2,
    /// fixed32, sfixed32, float
    Fixed32 = 5,
}

impl WireFormat {
    /// Numeric value used when building a field key.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Canonical wire type assigned to a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Bytes,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    Enum,
    /// Nested message; the encoder resolves the nested type's own schema.
    Object,
}

impl WireType {
    /// Every wire type, in protobuf descriptor order.
    pub const ALL: [WireType; 17] = [
        Self::Double,
        Self::Float,
        Self::Int64,
        Self::Uint64,
        Self::Int32,
        Self::Fixed64,
        Self::Fixed32,
        Self::Bool,
        Self::String,
        Self::Bytes,
        Self::Uint32,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Sint32,
        Self::Sint64,
        Self::Enum,
        Self::Object,
    ];

    /// Protobuf IDL name (`int32`, `sint64`, ...).
    ///
    /// `Enum` and `Object` have no fixed name; IDL renderers use the
    /// referenced type's short name instead.
    pub const fn proto_name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Fixed64 => "fixed64",
            Self::Fixed32 => "fixed32",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uint32 => "uint32",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Enum => "enum",
            Self::Object => "object",
        }
    }

    pub const fn wire_format(self) -> WireFormat {
        match self {
            Self::Int32
            | Self::Int64
            | Self::Uint32
            | Self::Uint64
            | Self::Sint32
            | Self::Sint64
            | Self::Bool
            | Self::Enum => WireFormat::Varint,
            Self::Fixed64 | Self::Sfixed64 | Self::Double => WireFormat::Fixed64,
            Self::String | Self::Bytes | Self::Object => WireFormat::LengthDelimited,
            Self::Fixed32 | Self::Sfixed32 | Self::Float => WireFormat::Fixed32,
        }
    }

    /// Zigzag variant of a signed varint type, if it has one.
    pub const fn zigzag(self) -> Option<WireType> {
        match self {
            Self::Int32 => Some(Self::Sint32),
            Self::Int64 => Some(Self::Sint64),
            _ => None,
        }
    }

    /// True for wire types that reference another declared type.
    pub const fn is_named(self) -> bool {
        matches!(self, Self::Enum | Self::Object)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.proto_name())
    }
}

/// Error returned when parsing an unknown wire type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wire type '{0}'")]
pub struct UnknownWireType(pub String);

impl FromStr for WireType {
    type Err = UnknownWireType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|wt| wt.proto_name() == lower)
            .ok_or_else(|| UnknownWireType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_only_rewrites_signed_varints() {
        assert_eq!(WireType::Int32.zigzag(), Some(WireType::Sint32));
        assert_eq!(WireType::Int64.zigzag(), Some(WireType::Sint64));
        for wt in WireType::ALL {
            if !matches!(wt, WireType::Int32 | WireType::Int64) {
                assert_eq!(wt.zigzag(), None, "{wt} should not have a zigzag form");
            }
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("SINT32".parse::<WireType>(), Ok(WireType::Sint32));
        assert_eq!("bytes".parse::<WireType>(), Ok(WireType::Bytes));
        assert!("varchar".parse::<WireType>().is_err());
    }

    #[test]
    fn wire_formats_follow_protobuf_categories() {
        assert_eq!(WireType::Sint64.wire_format(), WireFormat::Varint);
        assert_eq!(WireType::Double.wire_format(), WireFormat::Fixed64);
        assert_eq!(WireType::Object.wire_format(), WireFormat::LengthDelimited);
        assert_eq!(WireType::Float.wire_format().as_u32(), 5);
    }
}
