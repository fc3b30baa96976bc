//! Tests for expression normalization.

use exval::{MEMBER_PLACEHOLDER, normalize, templates};

/// Collapse whitespace so assertions ignore the padding rewrites insert.
fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn not_equals_null_becomes_is_not_null() {
    let normalized = normalize("A != NULL", Some("A"));
    assert_eq!(normalized, "A  IS NOT NULL ");
    assert_eq!(squash(&normalized), "A IS NOT NULL");
}

#[test]
fn double_equals_becomes_single() {
    assert_eq!(normalize("A == 0", Some("A")), "A = 0");
}

#[test]
fn c_style_logical_operators_are_rewritten() {
    assert_eq!(squash(&normalize("A && B || !C", None)), "A AND B OR NOT C");
}

#[test]
fn not_equals_is_rewritten_before_negation() {
    assert_eq!(normalize("A != B", None), "A <> B");
}

#[test]
fn equals_null_becomes_is_null_in_any_case() {
    assert_eq!(squash(&normalize("A = null", None)), "A IS NULL");
    assert_eq!(squash(&normalize("A = nUlL", None)), "A IS NULL");
    assert_eq!(squash(&normalize("A <> Null", None)), "A IS NOT NULL");
}

#[test]
fn remaining_null_words_are_uppercased() {
    assert_eq!(normalize("null < A", None), "NULL < A");
}

#[test]
fn placeholder_is_replaced_with_member_name() {
    assert_eq!(MEMBER_PLACEHOLDER, "{0}");
    assert_eq!(normalize("{0} > 0", Some("Age")), "Age > 0");
    assert_eq!(normalize("{0} > {0}", Some("Age")), "Age > Age");
}

#[test]
fn placeholder_without_member_name_is_removed() {
    assert_eq!(normalize("{0} > 0", None), " > 0");
}

#[test]
fn whitespace_runs_are_collapsed() {
    assert_eq!(normalize("A    >     B", None), "A > B");
}

#[test]
fn normalized_expressions_are_unchanged() {
    let normalized = "A IS NOT NULL AND B <> 0";
    assert_eq!(normalize(normalized, None), normalized);
    assert_eq!(normalize(&normalize(normalized, None), None), normalized);
}

#[test]
fn normalization_is_deterministic() {
    for (_, template) in templates::ALL {
        assert_eq!(normalize(template, Some("X")), normalize(template, Some("X")));
    }
}

#[test]
fn templates_normalize_to_predicate_grammar() {
    assert_eq!(squash(&normalize(templates::IS_NOT_NULL, Some("X"))), "X IS NOT NULL");
    assert_eq!(squash(&normalize(templates::IS_NULL, Some("X"))), "X IS NULL");
    assert_eq!(normalize(templates::IS_ODD, Some("X")), "(X % 2) <> 0");
    assert_eq!(normalize(templates::IS_EVEN, Some("X")), "(X % 2) = 0");
    assert_eq!(normalize(templates::IS_POSITIVE_OR_ZERO, Some("X")), "X >= 0");
}

#[test]
fn member_names_containing_null_are_rewritten() {
    // Substring rewriting does not respect identifier boundaries.
    assert_eq!(normalize("nullable > 0", None), "NULLable > 0");
}

#[test]
fn template_lookup_is_case_insensitive() {
    assert_eq!(templates::find("isodd"), Some(templates::IS_ODD));
    assert_eq!(templates::find("IsPositive"), Some(templates::IS_POSITIVE));
    assert_eq!(templates::find("IsPrime"), None);
    assert_eq!(templates::ALL.len(), 9);
}
