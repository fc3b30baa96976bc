//! Error types for the expression interpreter.

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// An error that occurred while building or evaluating an evaluation context.
///
/// Every variant indicates a defect in the configured expression (or in the
/// member descriptor feeding it), never an invalid candidate object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The normalized expression is not valid predicate grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Identifier does not name an eligible column.
    #[error("cannot find column '{name}'{}", format_suggestions(.suggestions))]
    UnknownIdentifier {
        name: String,
        suggestions: Vec<String>,
    },

    /// Identifier matches several columns case-insensitively and none exactly.
    #[error("column name '{name}' is ambiguous: {}", .candidates.join(", "))]
    AmbiguousIdentifier {
        name: String,
        candidates: Vec<String>,
    },

    /// Two bindings share a column name.
    #[error("column '{name}' is already defined")]
    DuplicateColumn { name: String },

    /// A bound value cannot be stored in its column's declared type.
    #[error("cannot store {value} in column '{column}' of type {expected}")]
    InvalidColumnValue {
        column: String,
        expected: String,
        value: String,
    },

    /// Operand types the operator cannot coerce.
    #[error("cannot perform '{operation}' on {left} and {right}")]
    TypeMismatch {
        operation: String,
        left: String,
        right: String,
    },

    /// The computed column produced a non-boolean value.
    #[error("expression must evaluate to Boolean, got {found}")]
    NotBoolean { found: String },

    /// Integer division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic exceeded the 128-bit range.
    #[error("arithmetic overflow in '{operation}'")]
    ArithmeticOverflow { operation: String },

    /// The context has no computed column to evaluate.
    #[error("no expression has been attached to the evaluation context")]
    MissingExpression,
}

fn format_suggestions(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(", did you mean '{only}'?"),
        many => format!(", did you mean one of: {}?", many.join(", ")),
    }
}

/// Compute close matches for an unknown name among `available`.
///
/// Comparison is case-insensitive. Names of up to three characters allow one
/// edit, longer names two. Returns at most three names, closest first.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let target = name.to_lowercase();
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(&target, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
