//! Tests for error types and error message formatting.

use std::error::Error;

use exval::interpreter::compute_suggestions;
use exval::parser::{ParseError, parse_message};
use exval::{EvalError, ExpressionRule, TypeDescriptor, ValidateError};

#[test]
fn compute_suggestions_finds_similar_names() {
    let available = vec![
        "Age".to_string(),
        "Name".to_string(),
        "PropertyA".to_string(),
        "PropertyB".to_string(),
    ];

    // Short names allow a single edit.
    assert_eq!(compute_suggestions("Ag", &available), vec!["Age"]);
    assert!(compute_suggestions("Ax", &available).is_empty());

    // Comparison ignores case.
    assert_eq!(compute_suggestions("NAMES", &available), vec!["Name"]);

    // Closest first, ties alphabetical.
    assert_eq!(
        compute_suggestions("PropertyC", &available),
        vec!["PropertyA", "PropertyB"]
    );
}

#[test]
fn compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
    let suggestions = compute_suggestions("item", &available);
    assert_eq!(suggestions.len(), 3);
}

#[test]
fn unknown_identifier_displays_suggestions() {
    let err = EvalError::UnknownIdentifier {
        name: "Agee".to_string(),
        suggestions: vec!["Age".to_string()],
    };
    assert_eq!(err.to_string(), "cannot find column 'Agee', did you mean 'Age'?");

    let err = EvalError::UnknownIdentifier {
        name: "X".to_string(),
        suggestions: vec![],
    };
    assert_eq!(err.to_string(), "cannot find column 'X'");

    let err = EvalError::UnknownIdentifier {
        name: "Propx".to_string(),
        suggestions: vec!["PropA".to_string(), "PropB".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "cannot find column 'Propx', did you mean one of: PropA, PropB?"
    );
}

#[test]
fn eval_error_displays() {
    let err = EvalError::TypeMismatch {
        operation: "+".to_string(),
        left: "Boolean".to_string(),
        right: "String".to_string(),
    };
    assert_eq!(err.to_string(), "cannot perform '+' on Boolean and String");

    let err = EvalError::NotBoolean {
        found: "Integer".to_string(),
    };
    assert_eq!(err.to_string(), "expression must evaluate to Boolean, got Integer");

    assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
}

#[test]
fn parse_errors_display_position() {
    let err = ParseError::Syntax {
        line: 1,
        column: 3,
        message: "unexpected character: '?'".to_string(),
    };
    assert_eq!(err.to_string(), "syntax error at 1:3: unexpected character: '?'");

    let err = ParseError::UnexpectedEof { line: 2, column: 1 };
    assert_eq!(err.to_string(), "unexpected end of input at 2:1");
    assert_eq!(err.position(), Some((2, 1)));

    let err = ParseError::MaxDepthExceeded { depth: 64 };
    assert_eq!(err.position(), None);
}

#[test]
fn parse_error_converts_transparently() {
    let parse = ParseError::UnexpectedEof { line: 1, column: 4 };
    let err = EvalError::from(parse.clone());
    assert_eq!(err.to_string(), parse.to_string());
}

#[test]
fn validate_error_carries_both_expressions_and_source() {
    struct Empty;
    let descriptor = TypeDescriptor::<Empty>::new("Empty");

    let err: ValidateError = ExpressionRule::new("Missing != null")
        .validate_with(&descriptor, &Empty, None)
        .unwrap_err();
    assert_eq!(err.expression, "Missing != null");
    assert_eq!(err.normalized, "Missing  IS NOT NULL ");
    assert!(
        err.to_string()
            .starts_with("invalid expression 'Missing != null' (normalized: 'Missing  IS NOT NULL ')")
    );
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "cannot find column 'Missing'");
}

#[test]
fn message_template_errors() {
    let err = parse_message("The field {0 is invalid").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));

    let err = parse_message("closing } alone").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { line: 1, column: 9, .. }));
}
