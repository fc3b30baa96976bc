//! Rewrites authored expressions into canonical predicate grammar.
//!
//! The rewrite is a fixed sequence of substring replacements. Order matters:
//! `!=` must become `<>` before lone `!` becomes `NOT`, and the `NULL`
//! comparison rewrites rely on whitespace having been collapsed first.

use std::sync::LazyLock;

use regex::{NoExpand, Regex, RegexBuilder};

/// Placeholder replaced by the name of the member being validated.
pub const MEMBER_PLACEHOLDER: &str = "{0}";

static EQUALS_NULL: LazyLock<Regex> = LazyLock::new(|| case_insensitive("= NULL"));
static NOT_EQUALS_NULL: LazyLock<Regex> = LazyLock::new(|| case_insensitive("<> NULL"));
static NULL_WORD: LazyLock<Regex> = LazyLock::new(|| case_insensitive("null"));

fn case_insensitive(literal: &str) -> Regex {
    RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern")
}

/// Normalize `expression`, substituting `member_name` for `{0}`.
///
/// Without a member name, `{0}` is removed.
///
/// # Example
///
/// ```
/// use exval::normalize;
///
/// assert_eq!(normalize("A == 0", None), "A = 0");
/// assert_eq!(normalize("{0} != null", Some("Name")), "Name  IS NOT NULL ");
/// assert_eq!(normalize("!(A > B) && C", None), " NOT (A > B)  AND  C");
/// ```
pub fn normalize(expression: &str, member_name: Option<&str>) -> String {
    let mut normalized = expression.to_string();

    while normalized.contains("  ") {
        normalized = normalized.replace("  ", " ");
    }

    normalized = normalized
        .replace("!=", "<>")
        .replace("==", "=")
        .replace('!', " NOT ")
        .replace("&&", " AND ")
        .replace("||", " OR ");

    normalized = EQUALS_NULL
        .replace_all(&normalized, NoExpand(" IS NULL "))
        .into_owned();
    normalized = NOT_EQUALS_NULL
        .replace_all(&normalized, NoExpand(" IS NOT NULL "))
        .into_owned();
    normalized = NULL_WORD
        .replace_all(&normalized, NoExpand("NULL"))
        .into_owned();

    normalized.replace(MEMBER_PLACEHOLDER, member_name.unwrap_or_default())
}
