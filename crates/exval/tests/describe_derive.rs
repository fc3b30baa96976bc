//! Tests for descriptors produced by `#[derive(Describe)]`.

use std::ptr;

use exval::{Access, Describe, MemberType, ScalarType, Value};

#[derive(Describe)]
#[describe(rename = "Invoice")]
struct InvoiceRecord {
    number: u64,
    #[describe(rename = "Total")]
    total: f32,
    paid: bool,
    currency: char,
    customer: String,
    discount: Option<i16>,
    #[describe(read_only)]
    version: u32,
    lines: Vec<u32>,
    #[describe(skip)]
    internal: i32,
    wide: i128,
}

fn invoice() -> InvoiceRecord {
    InvoiceRecord {
        number: 42,
        total: 9.5,
        paid: false,
        currency: '€',
        customer: "ACME".to_string(),
        discount: None,
        version: 3,
        lines: vec![1, 2],
        internal: 0,
        wide: 1,
    }
}

#[test]
fn type_name_honors_rename() {
    assert_eq!(InvoiceRecord::descriptor().type_name(), "Invoice");
}

#[test]
fn members_keep_declaration_order_and_omit_skipped_fields() {
    let names: Vec<&str> = InvoiceRecord::descriptor()
        .members()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "number", "Total", "paid", "currency", "customer", "discount", "version", "lines",
            "wide"
        ]
    );
}

#[test]
fn scalar_fields_map_to_scalar_types() {
    let descriptor = InvoiceRecord::descriptor();
    let scalar = |name: &str| descriptor.member(name).and_then(|m| m.member_type().scalar());

    assert_eq!(scalar("number"), Some(ScalarType::UInt64));
    assert_eq!(scalar("Total"), Some(ScalarType::Float32));
    assert_eq!(scalar("paid"), Some(ScalarType::Boolean));
    assert_eq!(scalar("currency"), Some(ScalarType::Char));
    assert_eq!(scalar("customer"), Some(ScalarType::String));
    assert_eq!(scalar("discount"), Some(ScalarType::Int16));
}

#[test]
fn unsupported_types_are_listed_as_other() {
    let descriptor = InvoiceRecord::descriptor();
    assert_eq!(
        descriptor.member("lines").unwrap().member_type(),
        &MemberType::Other("Vec<u32>".to_string())
    );
    assert_eq!(
        descriptor.member("wide").unwrap().member_type(),
        &MemberType::Other("i128".to_string())
    );
}

#[test]
fn read_only_option_sets_access() {
    let descriptor = InvoiceRecord::descriptor();
    assert_eq!(descriptor.member("version").unwrap().access(), Access::ReadOnly);
    assert_eq!(descriptor.member("number").unwrap().access(), Access::ReadWrite);
}

#[test]
fn accessors_read_current_values() {
    let descriptor = InvoiceRecord::descriptor();
    let record = invoice();
    let read = |name: &str| descriptor.member(name).unwrap().read(&record);

    assert_eq!(read("number"), Value::Integer(42));
    assert_eq!(read("Total"), Value::Float(9.5));
    assert_eq!(read("paid"), Value::Boolean(false));
    assert_eq!(read("currency"), Value::Char('€'));
    assert_eq!(read("customer"), Value::String("ACME".to_string()));
    assert_eq!(read("discount"), Value::Null);
    assert_eq!(read("version"), Value::Integer(3));
    assert_eq!(read("lines"), Value::Null);
    let _ = (record.internal, record.wide, &record.lines);
}

#[test]
fn descriptor_is_built_once() {
    let first = InvoiceRecord::descriptor();
    let second = InvoiceRecord::descriptor();
    assert!(ptr::eq(first, second));
}
