use bon::Builder;

use crate::parser::DEFAULT_MAX_DEPTH;

/// Settings that shape how an expression is evaluated.
///
/// # Example
///
/// ```
/// use exval::EvalOptions;
///
/// let options = EvalOptions::builder().case_sensitive(true).build();
/// assert!(options.case_sensitive);
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct EvalOptions {
    /// Compare strings by exact case. Off by default, so `'abc' = 'ABC'`.
    #[builder(default)]
    pub case_sensitive: bool,

    /// Maximum nesting of parentheses and prefix operators, and maximum
    /// height of the parsed tree.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions::builder().build()
    }
}
