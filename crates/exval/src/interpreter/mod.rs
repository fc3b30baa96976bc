//! Interpreter for normalized predicate expressions.
//!
//! This module provides the evaluation engine: it builds a single-row
//! relation from eligible bindings, attaches the normalized expression as a
//! computed boolean column, and reads the result back.

mod context;
mod error;
mod evaluator;
mod options;

pub use context::{Column, EvaluationContext, RESULT_COLUMN};
pub use error::{EvalError, compute_suggestions};
pub use evaluator::eval_expr;
pub use options::EvalOptions;

use crate::types::Binding;

/// Evaluate `normalized` against `bindings`.
///
/// Unknown identifiers, grammar violations and uncoercible operand types are
/// errors; an unknown (`NULL`) result is `false`.
pub fn evaluate(
    normalized: &str,
    bindings: &[Binding],
    options: EvalOptions,
) -> Result<bool, EvalError> {
    let mut ctx = EvaluationContext::from_bindings(bindings, options)?;
    ctx.set_expression(normalized)?;
    let result = ctx.evaluate()?;
    tracing::trace!(
        columns = ctx.columns().len(),
        result,
        column = RESULT_COLUMN,
        "evaluated computed column"
    );
    Ok(result)
}
