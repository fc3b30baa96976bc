//! The single-row relation an expression is evaluated against.

use exval_semantics::ScalarType;

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::evaluator::eval_expr;
use crate::interpreter::{EvalError, EvalOptions};
use crate::parser::{Expr, parse_expression_with_depth};
use crate::types::{Binding, Value};

/// Name of the synthetic computed column holding the expression result.
pub const RESULT_COLUMN: &str = "_is_valid";

/// A typed column of the relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ScalarType,
}

/// Evaluation context: one typed column per binding, one row of values, and
/// a computed boolean column defined by an expression.
///
/// The context is built, evaluated and dropped within a single validation
/// call; it is never shared.
///
/// # Example
///
/// ```
/// use exval::interpreter::EvaluationContext;
/// use exval::{EvalOptions, ScalarType, Value};
///
/// let mut ctx = EvaluationContext::new(EvalOptions::default());
/// ctx.add_column("Age", ScalarType::Int32).unwrap();
/// ctx.set_value("Age", Value::Integer(21)).unwrap();
/// ctx.set_expression("Age >= 18").unwrap();
/// assert!(ctx.evaluate().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    columns: Vec<Column>,
    row: Vec<Value>,
    expression: Option<Expr>,
    options: EvalOptions,
}

impl EvaluationContext {
    /// Create an empty relation.
    pub fn new(options: EvalOptions) -> Self {
        Self {
            columns: Vec::new(),
            row: Vec::new(),
            expression: None,
            options,
        }
    }

    /// Create a relation with one column per binding, populated with the
    /// bindings' values.
    pub fn from_bindings(bindings: &[Binding], options: EvalOptions) -> Result<Self, EvalError> {
        let mut ctx = Self::new(options);
        for binding in bindings {
            let index = ctx.add_column(&binding.name, binding.ty)?;
            ctx.store(index, binding.value.clone())?;
        }
        Ok(ctx)
    }

    /// Add a typed column. Its value starts as `Null`.
    ///
    /// Returns the column's index.
    pub fn add_column(&mut self, name: &str, ty: ScalarType) -> Result<usize, EvalError> {
        if self.columns.iter().any(|c| c.name == name) {
            return Err(EvalError::DuplicateColumn {
                name: name.to_string(),
            });
        }
        self.columns.push(Column {
            name: name.to_string(),
            ty,
        });
        self.row.push(Value::Null);
        Ok(self.columns.len() - 1)
    }

    /// Store a value in the named column, converting it to the column type.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let index = self.column_index(name)?;
        self.store(index, value)
    }

    fn store(&mut self, index: usize, value: Value) -> Result<(), EvalError> {
        let column = &self.columns[index];
        let converted = convert_to_column(column, value)?;
        self.row[index] = converted;
        Ok(())
    }

    /// Parse `expression` and attach it as the computed result column.
    ///
    /// Every identifier the expression references must resolve to a column.
    pub fn set_expression(&mut self, expression: &str) -> Result<(), EvalError> {
        let expr = parse_expression_with_depth(expression, self.options.max_depth)?;
        for name in expr.identifiers() {
            self.column_index(name)?;
        }
        self.expression = Some(expr);
        Ok(())
    }

    /// Evaluate the computed column and read it back.
    ///
    /// An unknown (`NULL`) result reads as `false`.
    pub fn evaluate(&self) -> Result<bool, EvalError> {
        let expr = self
            .expression
            .as_ref()
            .ok_or(EvalError::MissingExpression)?;
        match eval_expr(expr, self)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(EvalError::NotBoolean {
                found: other.kind().to_string(),
            }),
        }
    }

    /// Resolve a column name to its index.
    ///
    /// Exact matches win; otherwise a single case-insensitive match is used.
    pub fn column_index(&self, name: &str) -> Result<usize, EvalError> {
        if let Some(index) = self.columns.iter().position(|c| c.name == name) {
            return Ok(index);
        }

        let lowered = name.to_lowercase();
        let folded: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.to_lowercase() == lowered)
            .map(|(index, _)| index)
            .collect();

        match folded.as_slice() {
            [index] => Ok(*index),
            [] => Err(EvalError::UnknownIdentifier {
                name: name.to_string(),
                suggestions: compute_suggestions(name, &self.column_names()),
            }),
            many => Err(EvalError::AmbiguousIdentifier {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|&index| self.columns[index].name.clone())
                    .collect(),
            }),
        }
    }

    /// Current value of the named column.
    pub fn get(&self, name: &str) -> Result<&Value, EvalError> {
        let index = self.column_index(name)?;
        Ok(&self.row[index])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Convert a value to a column's declared type, as storing it in a typed
/// row would.
fn convert_to_column(column: &Column, value: Value) -> Result<Value, EvalError> {
    let invalid = |value: &Value| EvalError::InvalidColumnValue {
        column: column.name.clone(),
        expected: column.ty.name().to_string(),
        value: format!("{} '{value}'", value.kind()),
    };

    let converted = match (column.ty, value) {
        (_, Value::Null) => Value::Null,
        (ScalarType::Boolean, Value::Boolean(b)) => Value::Boolean(b),
        (ScalarType::Boolean, Value::String(s)) => match parse_bool(&s) {
            Some(b) => Value::Boolean(b),
            None => return Err(invalid(&Value::String(s))),
        },
        (ScalarType::Char, Value::Char(c)) => Value::Char(c),
        (ScalarType::Char, Value::String(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(invalid(&Value::String(s))),
            }
        }
        (ScalarType::String, Value::String(s)) => Value::String(s),
        (
            ScalarType::String,
            other @ (Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::Char(_)),
        ) => Value::String(other.to_string()),
        (ty, Value::Integer(n)) if ty.is_float() => store_float(ty, n as f64),
        (ty, Value::Float(f)) if ty.is_float() => store_float(ty, f),
        (ty, Value::String(s)) if ty.is_float() => match s.trim().parse::<f64>() {
            Ok(f) => store_float(ty, f),
            Err(_) => return Err(invalid(&Value::String(s))),
        },
        (ty, value) if ty.is_integer() => {
            let n = match &value {
                Value::Integer(n) => Some(*n),
                Value::String(s) => s.trim().parse::<i128>().ok(),
                _ => None,
            };
            match (n, ty.integer_range()) {
                (Some(n), Some((min, max))) if (min..=max).contains(&n) => Value::Integer(n),
                _ => return Err(invalid(&value)),
            }
        }
        (_, value) => return Err(invalid(&value)),
    };
    Ok(converted)
}

fn store_float(ty: ScalarType, f: f64) -> Value {
    if ty == ScalarType::Float32 {
        Value::Float(f64::from(f as f32))
    } else {
        Value::Float(f)
    }
}

/// Parse `true`/`false` case-insensitively.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
