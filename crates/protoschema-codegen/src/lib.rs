// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitBool, LitInt, LitStr};

/// Wire type names accepted by `#[proto(wire_type = "...")]`, with their
/// `WireType` variant.
const WIRE_TYPES: &[(&str, &str)] = &[
    ("double", "Double"),
    ("float", "Float"),
    ("int64", "Int64"),
    ("uint64", "Uint64"),
    ("int32", "Int32"),
    ("fixed64", "Fixed64"),
    ("fixed32", "Fixed32"),
    ("bool", "Bool"),
    ("string", "String"),
    ("bytes", "Bytes"),
    ("uint32", "Uint32"),
    ("sfixed32", "Sfixed32"),
    ("sfixed64", "Sfixed64"),
    ("sint32", "Sint32"),
    ("sint64", "Sint64"),
    ("enum", "Enum"),
    ("object", "Object"),
];

/// Value of `wire_type` meaning "infer from the declared type".
const INFER: &str = "default";

/// Type-level `#[proto(...)]` options.
#[derive(Default)]
struct ContainerAttrs {
    schema_defined: bool,
    zigzag: bool,
}

/// Field-level `#[proto(...)]` directive.
#[derive(Default)]
struct FieldAttrs {
    ignore: bool,
    required: bool,
    description: Option<String>,
    wire_type: Option<syn::Ident>,
    order: Option<i32>,
}

/// `#[derive(Message)]`: generates `Described` + `Message` impls
///
/// Container attributes:
/// - `#[proto(schema_defined)]` - every field takes part unless ignored
/// - `#[proto(zigzag)]` - inferred int32/int64 become sint32/sint64
///
/// Field attributes (a bare `#[proto]` marks the field with defaults):
/// - `order = N` - explicit field number (values <= 0 mean "assign")
/// - `required`, `description = "..."`, `ignore`
/// - `wire_type = "sint32"` - explicit wire type (`"default"` infers)
///
/// Example:
/// ```ignore
/// use protoschema::Message;
///
/// #[derive(Message)]
/// struct Reading {
///     #[proto(order = 1, required)]
///     sensor: String,
///     #[proto(wire_type = "fixed32")]
///     value: u32,
/// }
/// ```
#[proc_macro_derive(Message, attributes(proto))]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_message(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[derive(Enumeration)]`: marks a fieldless enum as a protobuf enum
///
/// Example:
/// ```ignore
/// use protoschema::Enumeration;
///
/// #[derive(Enumeration)]
/// enum Level { Low, High }
/// ```
#[proc_macro_derive(Enumeration, attributes(proto))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_enumeration(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_message(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let name = &input.ident;
    let type_name = name.to_string();
    let container = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut field_decls = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let field_name = field_name.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name).to_string();
        let ty = &field.ty;

        let attrs = parse_field_attrs(&field.attrs)?;
        let participates = match &attrs {
            Some(attrs) => !attrs.ignore,
            None => container.schema_defined,
        };

        // Fields that can never be serialized keep a name-only identity, so
        // their type does not need to implement `Described`.
        let decl = if participates {
            quote! { ::protoschema::types::FieldDeclaration::of::<#ty>(#field_name) }
        } else {
            let ty_name = ty.to_token_stream().to_string().replace(' ', "");
            quote! {
                ::protoschema::types::FieldDeclaration::new(
                    #field_name,
                    ::protoschema::types::TypeIdent::plain(#ty_name),
                )
            }
        };

        let decl = match attrs {
            Some(attrs) => {
                let directive = directive_tokens(&attrs);
                quote! { #decl.with_directive(#directive) }
            }
            None => decl,
        };
        field_decls.push(decl);
    }

    let schema_defined = container.schema_defined;
    let zigzag = container.zigzag;

    Ok(quote! {
        impl ::protoschema::types::Described for #name {
            fn type_ident() -> ::protoschema::types::TypeIdent {
                ::protoschema::types::TypeIdent::plain(concat!(module_path!(), "::", #type_name))
            }
        }

        impl ::protoschema::Message for #name {
            fn declaration() -> ::protoschema::types::TypeDeclaration {
                let ident = <Self as ::protoschema::types::Described>::type_ident();
                ::protoschema::types::TypeDeclaration::new(ident.name())
                    .schema_defined(#schema_defined)
                    .zigzag(#zigzag)
                    #(.field(#field_decls))*
            }
        }
    })
}

fn expand_enumeration(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let name = &input.ident;
    let type_name = name.to_string();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Only enums are supported"));
    };
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "Enumeration variants must not carry fields",
        ));
    }

    Ok(quote! {
        impl ::protoschema::types::Described for #name {
            fn type_ident() -> ::protoschema::types::TypeIdent {
                ::protoschema::types::TypeIdent::enumeration(concat!(module_path!(), "::", #type_name))
            }
        }
    })
}

fn reject_generics(input: &DeriveInput) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            "Generic types are not supported",
        ))
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("proto")) {
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("schema_defined") {
                out.schema_defined = parse_flag(&meta)?;
            } else if meta.path.is_ident("zigzag") {
                out.zigzag = parse_flag(&meta)?;
            } else {
                return Err(meta.error("unknown proto attribute, expected `schema_defined` or `zigzag`"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// `None` when the field carries no `#[proto]` attribute at all.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<FieldAttrs>> {
    let mut out: Option<FieldAttrs> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("proto")) {
        let directive = out.get_or_insert_with(FieldAttrs::default);
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                directive.ignore = parse_flag(&meta)?;
            } else if meta.path.is_ident("required") {
                directive.required = parse_flag(&meta)?;
            } else if meta.path.is_ident("description") {
                let lit: LitStr = meta.value()?.parse()?;
                directive.description = Some(lit.value());
            } else if meta.path.is_ident("order") {
                let value = meta.value()?;
                let negative = value.parse::<Option<syn::Token![-]>>()?.is_some();
                let lit: LitInt = value.parse()?;
                let order: i32 = lit.base10_parse()?;
                directive.order = Some(if negative { -order } else { order });
            } else if meta.path.is_ident("wire_type") {
                let lit: LitStr = meta.value()?.parse()?;
                directive.wire_type = parse_wire_type(&lit)?;
            } else {
                return Err(meta.error(
                    "unknown proto attribute, expected one of `order`, `required`, `description`, `wire_type`, `ignore`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// `flag` or `flag = true|false`.
fn parse_flag(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitBool = meta.value()?.parse()?;
        Ok(lit.value)
    } else {
        Ok(true)
    }
}

fn parse_wire_type(lit: &LitStr) -> syn::Result<Option<syn::Ident>> {
    let value = lit.value();
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(INFER) {
        return Ok(None);
    }
    WIRE_TYPES
        .iter()
        .find(|(proto, _)| proto.eq_ignore_ascii_case(value))
        .map(|(_, variant)| Some(syn::Ident::new(variant, lit.span())))
        .ok_or_else(|| syn::Error::new_spanned(lit, format!("unknown wire type '{value}'")))
}

fn directive_tokens(attrs: &FieldAttrs) -> TokenStream2 {
    let mut tokens = if attrs.ignore {
        quote! { ::protoschema::types::Directive::ignored() }
    } else {
        quote! { ::protoschema::types::Directive::new() }
    };
    if let Some(order) = attrs.order {
        tokens = quote! { #tokens.order(#order) };
    }
    if attrs.required {
        tokens = quote! { #tokens.required(true) };
    }
    if let Some(description) = &attrs.description {
        tokens = quote! { #tokens.description(#description) };
    }
    if let Some(variant) = &attrs.wire_type {
        tokens = quote! { #tokens.wire_type(::protoschema::types::WireType::#variant) };
    }
    tokens
}
