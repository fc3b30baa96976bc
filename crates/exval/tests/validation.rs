//! Tests for the validation entry point.

use std::cell::Cell;

use exval::{
    Describe, EvalError, ExpressionRule, MemberDescriptor, ScalarType, TypeDescriptor,
    ValidationFailure, ValidationOutcome, eligible_bindings, templates, validate,
};

#[derive(Describe)]
struct Person {
    #[describe(rename = "Age")]
    age: u32,
}

#[derive(Describe)]
struct Pair {
    #[describe(rename = "PropertyA")]
    a: i32,
    #[describe(rename = "PropertyB")]
    b: i32,
}

#[derive(Describe)]
struct Shipment {
    #[describe(rename = "Weight")]
    weight: f64,
    #[describe(rename = "Id", read_only)]
    id: u64,
    #[describe(rename = "Items")]
    items: Vec<String>,
    #[describe(rename = "Note")]
    note: Option<String>,
}

#[derive(Describe)]
struct Measurement {
    größe: u32,
}

fn shipment(weight: f64) -> Shipment {
    Shipment {
        weight,
        id: 1,
        items: vec!["box".to_string()],
        note: None,
    }
}

#[test]
fn odd_age_passes_and_even_age_fails() {
    let rule = ExpressionRule::new(templates::IS_ODD);

    let outcome = rule.validate(&Person { age: 5 }, Some("Age")).unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);

    let outcome = rule.validate(&Person { age: 4 }, Some("Age")).unwrap();
    assert_eq!(
        outcome,
        ValidationOutcome::Failure(ValidationFailure {
            message: "The field Age is invalid.".to_string(),
            member_names: vec!["Age".to_string()],
        })
    );
}

#[test]
fn non_ascii_member_names_bind() {
    let rule = ExpressionRule::new(templates::IS_POSITIVE);
    let outcome = rule
        .validate(&Measurement { größe: 3 }, Some("größe"))
        .unwrap();
    assert!(outcome.is_success());

    let outcome = rule
        .validate(&Measurement { größe: 0 }, Some("größe"))
        .unwrap();
    assert_eq!(
        outcome.failure().unwrap().message,
        "The field größe is invalid."
    );
}

#[test]
fn cross_member_comparison() {
    let rule = ExpressionRule::new("PropertyA > PropertyB");
    assert!(!rule.validate(&Pair { a: 3, b: 5 }, None).unwrap().is_success());
    assert!(rule.validate(&Pair { a: 7, b: 5 }, None).unwrap().is_success());
}

#[test]
fn failure_without_member_uses_type_name() {
    let outcome = ExpressionRule::new("PropertyA > PropertyB")
        .validate(&Pair { a: 1, b: 2 }, None)
        .unwrap();
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.message, "The field Pair is invalid.");
    assert!(failure.member_names.is_empty());
}

#[test]
fn blank_expression_always_succeeds() {
    for expression in ["", "   ", "\t\n"] {
        let rule = ExpressionRule::new(expression);
        assert!(rule.is_default());
        let outcome = rule.validate(&Pair { a: 0, b: 0 }, Some("PropertyA")).unwrap();
        assert!(outcome.is_success());
    }
}

#[test]
fn blank_expression_skips_member_resolution() {
    // "Missing" would be an unknown identifier if the rule were evaluated.
    let outcome = ExpressionRule::new(" ")
        .validate(&Person { age: 2 }, Some("Missing"))
        .unwrap();
    assert!(outcome.is_success());
}

#[test]
fn read_only_members_are_not_bound() {
    let err = ExpressionRule::new("Id > 0")
        .validate(&shipment(1.0), None)
        .unwrap_err();
    assert_eq!(err.expression, "Id > 0");
    assert!(matches!(err.source, EvalError::UnknownIdentifier { ref name, .. } if name == "Id"));
}

#[test]
fn non_scalar_members_are_not_bound() {
    let err = ExpressionRule::new("Items IS NOT NULL")
        .validate(&shipment(1.0), None)
        .unwrap_err();
    assert!(matches!(err.source, EvalError::UnknownIdentifier { .. }));
}

#[test]
fn unreferenced_ineligible_members_are_harmless() {
    let outcome = ExpressionRule::new(templates::IS_POSITIVE)
        .validate(&shipment(2.5), Some("Weight"))
        .unwrap();
    assert!(outcome.is_success());
}

#[test]
fn nullable_members_bind_null() {
    let rule = ExpressionRule::new(templates::IS_NULL);
    assert!(rule.validate(&shipment(1.0), Some("Note")).unwrap().is_success());

    let mut filled = shipment(1.0);
    filled.note = Some("fragile".to_string());
    assert!(!rule.validate(&filled, Some("Note")).unwrap().is_success());
}

#[test]
fn eligible_bindings_skip_read_only_and_non_scalar_members() {
    let bindings = eligible_bindings(Shipment::descriptor(), &shipment(3.0));
    let names: Vec<&str> = bindings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Weight", "Note"]);
    assert_eq!(bindings[0].ty, ScalarType::Float64);
}

#[test]
fn values_are_read_on_every_call() {
    struct Counter {
        value: Cell<i32>,
    }

    let descriptor = TypeDescriptor::new("Counter").with_member(MemberDescriptor::scalar(
        "Value",
        ScalarType::Int32,
        |c: &Counter| c.value.get().into(),
    ));
    let counter = Counter {
        value: Cell::new(2),
    };
    let rule = ExpressionRule::new(templates::IS_EVEN);

    assert!(rule.validate_with(&descriptor, &counter, Some("Value")).unwrap().is_success());
    counter.value.set(3);
    assert!(!rule.validate_with(&descriptor, &counter, Some("Value")).unwrap().is_success());
}

#[test]
fn placeholder_without_member_name_is_a_configuration_error() {
    let err = ExpressionRule::new(templates::IS_POSITIVE)
        .validate(&Person { age: 3 }, None)
        .unwrap_err();
    assert_eq!(err.normalized, " > 0");
    assert!(matches!(err.source, EvalError::Parse(_)));
}

#[test]
fn c_style_operators_are_accepted() {
    let rule = ExpressionRule::new("PropertyA != PropertyB && !(PropertyA == 0)");
    assert!(rule.validate(&Pair { a: 1, b: 2 }, None).unwrap().is_success());
    assert!(!rule.validate(&Pair { a: 0, b: 2 }, None).unwrap().is_success());
}

#[test]
fn custom_message_template() {
    let rule = ExpressionRule::new(templates::IS_EVEN)
        .with_message("{0} must be even, got an odd {{value}}")
        .unwrap();
    let outcome = rule.validate(&Person { age: 3 }, Some("Age")).unwrap();
    assert_eq!(
        outcome.failure().unwrap().message,
        "Age must be even, got an odd {value}"
    );
}

#[test]
fn message_placeholders_beyond_zero_are_rejected() {
    let err = ExpressionRule::new(templates::IS_EVEN)
        .with_message("{0} and {1}")
        .unwrap_err();
    assert_eq!(err.position(), Some((1, 9)));
}

#[test]
fn builder_configures_options() {
    let rule = ExpressionRule::builder()
        .expression("Code = 'abc'")
        .options(exval::EvalOptions::builder().case_sensitive(true).build())
        .build();
    assert!(rule.options().case_sensitive);
    assert_eq!(rule.expression(), "Code = 'abc'");
}

#[test]
fn rules_are_equal_by_expression() {
    let a = ExpressionRule::new("A > 0");
    let b = ExpressionRule::new("A > 0").with_message("custom").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, ExpressionRule::new("A > 1"));
}

#[test]
fn free_function_validates_with_default_message() {
    let outcome = validate(
        "PropertyA > PropertyB",
        Pair::descriptor(),
        &Pair { a: 1, b: 2 },
        Some("PropertyA"),
    )
    .unwrap();
    assert_eq!(
        outcome.failure().unwrap().message,
        "The field PropertyA is invalid."
    );
}

#[test]
fn outcomes_serialize_with_status_tag() {
    let success = serde_json::to_value(ValidationOutcome::Success).unwrap();
    assert_eq!(success, serde_json::json!({ "status": "success" }));

    let failure = ValidationOutcome::Failure(ValidationFailure {
        message: "The field Age is invalid.".to_string(),
        member_names: vec!["Age".to_string()],
    });
    assert_eq!(
        serde_json::to_value(failure).unwrap(),
        serde_json::json!({
            "status": "failure",
            "message": "The field Age is invalid.",
            "member_names": ["Age"],
        })
    );
}
