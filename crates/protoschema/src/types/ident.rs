// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared type identities.
//!
//! A `TypeIdent` is what the introspection side (derive macro or manifest)
//! records for a field's declared type: a canonical name such as `i32`,
//! `Vec<u8>` or `Option<String>`, plus enough shape information for the
//! resolver to tell scalars, enumerations, containers and raw arrays apart.
//!
//! Rust types describe themselves through [`Described`]. Implementations for
//! the scalar types, `Option<T>`, `Box<T>`, `Vec<T>`, `VecDeque<T>` and `[T; N]` live
//! here; user messages and enums get theirs from `#[derive(Message)]` and
//! `#[derive(Enumeration)]`.

use crate::registry;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Scalar or nested message, classified by name.
    Plain,
    /// Enumeration type.
    Enum,
    /// Container of `element` (repeated field).
    Sequence(Box<TypeIdent>),
    /// Raw fixed-size array.
    Array {
        element: Box<TypeIdent>,
        len: usize,
    },
}

/// Identity of a declared type, captured at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdent {
    name: Cow<'static, str>,
    class: TypeClass,
}

impl TypeIdent {
    /// Scalar or message type identified by name.
    pub fn plain(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            class: TypeClass::Plain,
        }
    }

    pub fn enumeration(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            class: TypeClass::Enum,
        }
    }

    /// Container-shaped type; `name` is the container's own name (`Vec<T>`).
    pub fn sequence(name: impl Into<Cow<'static, str>>, element: TypeIdent) -> Self {
        Self {
            name: name.into(),
            class: TypeClass::Sequence(Box::new(element)),
        }
    }

    pub fn array(element: TypeIdent, len: usize) -> Self {
        Self {
            name: Cow::Owned(format!("[{}; {}]", element.name, len)),
            class: TypeClass::Array {
                element: Box::new(element),
                len,
            },
        }
    }

    /// Nullable wrapper: keeps the inner class, renames to `Option<T>`.
    pub fn option_of(inner: TypeIdent) -> Self {
        let name = format!("Option<{}>", inner.name);
        inner.renamed(name)
    }

    /// `Vec<T>`: an opaque scalar when the registry knows it (`Vec<u8>`),
    /// a repeated field of `T` otherwise.
    pub fn vec_of(element: TypeIdent) -> Self {
        let name = format!("Vec<{}>", element.name);
        if registry::registry().contains_name(&name) {
            Self::plain(name)
        } else {
            Self::sequence(name, element)
        }
    }

    pub fn vec_deque_of(element: TypeIdent) -> Self {
        Self::sequence(format!("VecDeque<{}>", element.name), element)
    }

    /// Same class under a different name (used for `Option<T>` wrappers).
    #[must_use]
    pub fn renamed(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            class: self.class,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &TypeClass {
        &self.class
    }

    /// Element type of a container, `None` for everything else.
    pub fn element(&self) -> Option<&TypeIdent> {
        match &self.class {
            TypeClass::Sequence(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.class, TypeClass::Sequence(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.class, TypeClass::Enum)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.class, TypeClass::Array { .. })
    }

    /// True for the byte element type, plain (`u8`) or nullable (`Option<u8>`).
    pub fn is_byte(&self) -> bool {
        matches!(self.class, TypeClass::Plain) && matches!(self.name(), "u8" | "Option<u8>")
    }

    /// Short name: generics and module path stripped (`a::b::Foo<T>` -> `Foo`).
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Strip generic arguments and the module path from a type name.
///
/// `Option<T>` wrappers are looked through, so `Option<shop::Item>` is `Item`.
pub fn short_name(name: &str) -> &str {
    let name = name.trim();
    if name.starts_with('[') {
        return name;
    }
    if let Some(inner) = name
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return short_name(inner);
    }
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base).trim()
}

/// Types that can describe their own identity to the resolver.
pub trait Described {
    fn type_ident() -> TypeIdent;
}

macro_rules! impl_described_plain {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Described for $ty {
                fn type_ident() -> TypeIdent {
                    TypeIdent::plain($name)
                }
            }
        )*
    };
}

impl_described_plain!(
    i8 => "i8",
    u8 => "u8",
    i16 => "i16",
    u16 => "u16",
    i32 => "i32",
    u32 => "u32",
    i64 => "i64",
    u64 => "u64",
    isize => "isize",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
    String => "String",
    Box<str> => "Box<str>",
    Box<[u8]> => "Box<[u8]>",
);

impl<T: Described> Described for Option<T> {
    fn type_ident() -> TypeIdent {
        TypeIdent::option_of(T::type_ident())
    }
}

/// Boxing is transparent: `Box<Node>` describes as `Node`, which is what
/// recursive messages (`Option<Box<Node>>`) need.
impl<T: Described> Described for Box<T> {
    fn type_ident() -> TypeIdent {
        T::type_ident()
    }
}

impl<T: Described> Described for Vec<T> {
    fn type_ident() -> TypeIdent {
        TypeIdent::vec_of(T::type_ident())
    }
}

impl<T: Described> Described for VecDeque<T> {
    fn type_ident() -> TypeIdent {
        TypeIdent::vec_deque_of(T::type_ident())
    }
}

impl<T: Described, const N: usize> Described for [T; N] {
    fn type_ident() -> TypeIdent {
        TypeIdent::array(T::type_ident(), N)
    }
}
