//! Ready-made expressions over the validated member, `{0}`.

pub const IS_NOT_NULL: &str = "{0} <> NULL";
pub const IS_NULL: &str = "{0} = NULL";
pub const IS_POSITIVE: &str = "{0} > 0";
pub const IS_NEGATIVE: &str = "{0} < 0";
pub const IS_ZERO: &str = "{0} = 0";
pub const IS_POSITIVE_OR_ZERO: &str = "{0} >= 0";
pub const IS_NEGATIVE_OR_ZERO: &str = "{0} <= 0";
pub const IS_ODD: &str = "({0} % 2) <> 0";
pub const IS_EVEN: &str = "({0} % 2) = 0";

/// Every named template as `(name, expression)`.
pub const ALL: &[(&str, &str)] = &[
    ("IsNotNull", IS_NOT_NULL),
    ("IsNull", IS_NULL),
    ("IsPositive", IS_POSITIVE),
    ("IsNegative", IS_NEGATIVE),
    ("IsZero", IS_ZERO),
    ("IsPositiveOrZero", IS_POSITIVE_OR_ZERO),
    ("IsNegativeOrZero", IS_NEGATIVE_OR_ZERO),
    ("IsOdd", IS_ODD),
    ("IsEven", IS_EVEN),
];

/// Look up a named template case-insensitively.
pub fn find(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(template, _)| template.eq_ignore_ascii_case(name))
        .map(|(_, expression)| *expression)
}
