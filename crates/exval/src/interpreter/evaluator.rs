//! Expression evaluation over a bound row.
//!
//! Implements predicate-grammar semantics: three-valued NULL logic, numeric
//! promotion between integers and floats, and string comparison that honors
//! the context's case sensitivity.

use std::cmp::Ordering;

use crate::interpreter::context::parse_bool;
use crate::interpreter::{EvalError, EvaluationContext};
use crate::parser::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::types::Value;

/// Evaluate an expression against the context's row.
///
/// Both operands of `AND`/`OR` are always evaluated, so configuration errors
/// surface regardless of the row's values.
pub fn eval_expr(expr: &Expr, ctx: &EvaluationContext) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(literal) => Ok(literal_value(literal)),
        Expr::Identifier(name) => ctx.get(name).cloned(),
        Expr::IsNull { operand, negated } => {
            let value = eval_expr(operand, ctx)?;
            Ok(Value::Boolean(value.is_null() != *negated))
        }
        Expr::Unary { op, operand } => {
            let value = eval_expr(operand, ctx)?;
            eval_unary(*op, value)
        }
        Expr::Binary { op, left, right } => {
            let left = eval_expr(left, ctx)?;
            let right = eval_expr(right, ctx)?;
            match op {
                BinaryOp::And | BinaryOp::Or => eval_logical(*op, left, right),
                op if op.is_comparison() => {
                    eval_comparison(*op, left, right, ctx.options().case_sensitive)
                }
                op => eval_arithmetic(*op, left, right),
            }
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Integer(n) => Value::Integer(*n),
        Literal::Float(f) => Value::Float(*f),
        Literal::String(s) => Value::String(s.clone()),
    }
}

fn mismatch(operation: &str, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        operation: operation.to_string(),
        left: left.kind().to_string(),
        right: right.kind().to_string(),
    }
}

fn eval_unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (_, Value::Null) => Ok(Value::Null),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOp::Negate, Value::Integer(n)) => {
            n.checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| EvalError::ArithmeticOverflow {
                    operation: "-".to_string(),
                })
        }
        (UnaryOp::Negate, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Plus, value @ (Value::Integer(_) | Value::Float(_))) => Ok(value),
        (op, value) => {
            let symbol = match op {
                UnaryOp::Not => "NOT",
                UnaryOp::Negate => "-",
                UnaryOp::Plus => "+",
            };
            Err(EvalError::TypeMismatch {
                operation: symbol.to_string(),
                left: value.kind().to_string(),
                right: "nothing".to_string(),
            })
        }
    }
}

/// `AND` / `OR` under three-valued logic.
fn eval_logical(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    let as_truth = |value: &Value| match value {
        Value::Boolean(b) => Ok(Some(*b)),
        Value::Null => Ok(None),
        _ => Err(mismatch(op.symbol(), &left, &right)),
    };
    let (l, r) = (as_truth(&left)?, as_truth(&right)?);

    let result = match op {
        BinaryOp::And => match (l, r) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        },
        _ => match (l, r) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        },
    };
    Ok(result.map_or(Value::Null, Value::Boolean))
}

fn eval_comparison(
    op: BinaryOp,
    left: Value,
    right: Value,
    case_sensitive: bool,
) -> Result<Value, EvalError> {
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    let ordering = compare_values(op, &left, &right, case_sensitive)?;
    let result = match op {
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    };
    Ok(Value::Boolean(result))
}

/// Order two non-null values, coercing across types where the grammar allows.
///
/// `None` means the values are unordered (a NaN operand).
fn compare_values(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    case_sensitive: bool,
) -> Result<Option<Ordering>, EvalError> {
    let ordering = match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            numeric_ordering(left, right)
        }
        (Value::String(_) | Value::Char(_), Value::String(_) | Value::Char(_)) => {
            let (a, b) = (left.to_string(), right.to_string());
            Some(compare_text(&a, &b, case_sensitive))
        }
        (Value::String(s), number @ (Value::Integer(_) | Value::Float(_))) => {
            let parsed = parse_number(s).ok_or_else(|| mismatch(op.symbol(), left, right))?;
            numeric_ordering(&parsed, number)
        }
        (number @ (Value::Integer(_) | Value::Float(_)), Value::String(s)) => {
            let parsed = parse_number(s).ok_or_else(|| mismatch(op.symbol(), left, right))?;
            numeric_ordering(number, &parsed)
        }
        (Value::String(s), Value::Boolean(b)) => {
            let parsed = parse_bool(s).ok_or_else(|| mismatch(op.symbol(), left, right))?;
            Some(parsed.cmp(b))
        }
        (Value::Boolean(b), Value::String(s)) => {
            let parsed = parse_bool(s).ok_or_else(|| mismatch(op.symbol(), left, right))?;
            Some(b.cmp(&parsed))
        }
        _ => return Err(mismatch(op.symbol(), left, right)),
    };
    Ok(ordering)
}

fn numeric_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => {
            let (a, b) = (left.as_float()?, right.as_float()?);
            a.partial_cmp(&b)
        }
    }
}

fn compare_text(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

/// Parse a string operand as a number: integer if it parses as one, float otherwise.
fn parse_number(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    trimmed
        .parse::<i128>()
        .map(Value::Integer)
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(Value::Float))
}

fn eval_arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    if op == BinaryOp::Add && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return match (&left, &right) {
            (Value::Boolean(_), _) | (_, Value::Boolean(_)) => {
                Err(mismatch(op.symbol(), &left, &right))
            }
            _ => Ok(Value::String(format!("{left}{right}"))),
        };
    }

    let numeric = |value: &Value| match value {
        Value::Integer(_) | Value::Float(_) => Some(value.clone()),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    let (Some(a), Some(b)) = (numeric(&left), numeric(&right)) else {
        return Err(mismatch(op.symbol(), &left, &right));
    };

    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => integer_arithmetic(op, a, b),
        (a, b) => {
            let (Some(a), Some(b)) = (a.as_float(), b.as_float()) else {
                return Err(mismatch(op.symbol(), &left, &right));
            };
            Ok(Value::Float(float_arithmetic(op, a, b)))
        }
    }
}

fn integer_arithmetic(op: BinaryOp, a: i128, b: i128) -> Result<Value, EvalError> {
    if matches!(op, BinaryOp::Div | BinaryOp::Rem) && b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => a.checked_div(b),
        _ => a.checked_rem(b),
    };
    result
        .map(Value::Integer)
        .ok_or_else(|| EvalError::ArithmeticOverflow {
            operation: op.symbol().to_string(),
        })
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        _ => a % b,
    }
}
