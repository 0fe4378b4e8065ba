// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `#[derive(Message)]` / `#[derive(Enumeration)]` end to end.

use protoschema::{
    Described, Enumeration, FieldShape, Message, SchemaError, TypeClass, WireType,
};
use std::collections::{HashMap, VecDeque};

#[derive(Enumeration)]
#[allow(dead_code)]
enum Status {
    Active,
    Closed,
}

#[derive(Message)]
#[allow(dead_code)]
struct Address {
    #[proto(order = 1)]
    street: String,
}

#[derive(Message)]
#[proto(zigzag)]
#[allow(dead_code)]
struct Account {
    #[proto(order = 5, required, description = "account id")]
    id: i64,
    #[proto]
    name: String,
    #[proto(order = 6, wire_type = "fixed32")]
    pin: u32,
    #[proto]
    balance: i32,
    #[proto]
    status: Status,
    #[proto]
    tags: Vec<String>,
    #[proto]
    history: VecDeque<Status>,
    #[proto]
    address: Option<Address>,
    #[proto]
    avatar: Vec<u8>,
    #[proto(ignore)]
    session: HashMap<String, String>,
    unannotated: HashMap<u32, u32>,
}

#[derive(Message)]
#[proto(schema_defined)]
#[allow(dead_code)]
struct Point {
    x: f64,
    y: f64,
    #[proto(order = 1)]
    label: Option<String>,
    digest: [u8; 4],
    #[proto(ignore)]
    scratch: HashMap<String, u8>,
}

#[derive(Message)]
#[allow(dead_code)]
struct Bare {
    value: i32,
}

#[derive(Message)]
#[allow(dead_code)]
struct Clash {
    #[proto(order = 2)]
    a: i32,
    #[proto(order = 2)]
    b: i32,
}

#[derive(Message)]
#[allow(dead_code)]
struct Grid {
    #[proto]
    cells: [i32; 9],
}

#[derive(Message)]
#[allow(dead_code)]
struct Node {
    #[proto(order = 1)]
    value: i32,
    #[proto]
    next: Option<Box<Node>>,
    #[proto]
    children: Vec<Box<Node>>,
}

#[test]
fn message_schema_follows_declarations() {
    let schema = Account::schema().expect("schema");
    assert!(schema.owner().ends_with("::Account"));
    assert!(schema.is_zigzag());
    assert_eq!(schema.len(), 9);

    let id = schema.field("id").expect("id");
    assert_eq!(id.order(), 5);
    assert_eq!(id.wire_type(), WireType::Sint64);
    assert!(id.required());
    assert_eq!(id.description(), "account id");

    let pin = schema.field("pin").expect("pin");
    assert_eq!(pin.wire_type(), WireType::Fixed32);
    assert_eq!(pin.order(), 6);

    let balance = schema.field("balance").expect("balance");
    assert_eq!(balance.wire_type(), WireType::Sint32);

    let orders: Vec<_> = ["name", "balance", "status", "tags", "history", "address", "avatar"]
        .iter()
        .map(|name| schema.field(name).expect("field").order())
        .collect();
    assert_eq!(orders, [7, 8, 9, 10, 11, 12, 13]);

    assert_eq!(schema.field("status").map(|f| f.wire_type()), Some(WireType::Enum));
    let tags = schema.field("tags").expect("tags");
    assert_eq!(tags.shape(), FieldShape::Repeated);
    assert_eq!(tags.wire_type(), WireType::String);
    assert_eq!(schema.field("history").map(|f| f.wire_type()), Some(WireType::Enum));
    assert_eq!(schema.field("address").map(|f| f.wire_type()), Some(WireType::Object));
    assert_eq!(schema.field("avatar").map(|f| f.wire_type()), Some(WireType::Bytes));

    assert!(schema.field("session").is_none());
    assert!(schema.field("unannotated").is_none());
}

#[test]
fn schema_is_cached_per_type() {
    let first = Account::schema().expect("schema");
    let second = Account::schema().expect("schema");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn schema_defined_takes_every_field() {
    let schema = Point::schema().expect("schema");
    let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["x", "y", "label", "digest"]);

    assert_eq!(schema.field("label").map(|f| f.order()), Some(1));
    assert_eq!(schema.field("x").map(|f| f.order()), Some(2));
    assert_eq!(schema.field("y").map(|f| f.order()), Some(3));
    assert_eq!(schema.field("digest").map(|f| f.wire_type()), Some(WireType::Bytes));
    assert_eq!(schema.field("x").map(|f| f.wire_type()), Some(WireType::Double));
}

#[test]
fn resolution_errors_surface_from_schema() {
    assert!(matches!(
        Bare::schema(),
        Err(SchemaError::NoAnnotatedFields { .. })
    ));
    assert!(matches!(
        Clash::schema(),
        Err(SchemaError::DuplicateOrder { order: 2, .. })
    ));
    assert!(matches!(
        Grid::schema(),
        Err(SchemaError::UnsupportedArrayType { ref field, .. }) if field == "cells"
    ));
}

#[test]
fn derived_identities() {
    let status = Status::type_ident();
    assert!(matches!(status.class(), TypeClass::Enum));
    assert_eq!(status.short_name(), "Status");

    let address = Address::type_ident();
    assert!(matches!(address.class(), TypeClass::Plain));
    assert!(address.name().ends_with("::Address"));

    let decl = Account::declaration();
    assert_eq!(decl.fields().len(), 11);
    assert_eq!(decl.fields()[9].ty().name(), "HashMap<String,String>");
    assert!(decl.fields()[10].directive().is_none());
}

#[test]
fn recursive_message_through_box() {
    let schema = Node::schema().expect("schema");

    let next = schema.field("next").expect("next");
    assert_eq!(next.wire_type(), WireType::Object);
    assert_eq!(next.order(), 2);
    assert!(next.declared_type().starts_with("Option<"));
    assert!(next.declared_type().ends_with("::Node>"));

    let children = schema.field("children").expect("children");
    assert!(children.is_repeated());
    assert_eq!(children.wire_type(), WireType::Object);
    assert_eq!(children.value_type(), schema.owner());
}
