//! Expression rules and the validation entry point.

use std::hash::{Hash, Hasher};

use bon::Builder;
use serde::Serialize;
use thiserror::Error;

use crate::enumerate::eligible_bindings;
use crate::interpreter::{EvalError, EvalOptions, evaluate};
use crate::normalize::normalize;
use crate::parser::{MessageSegment, MessageTemplate, ParseError, parse_message};
use crate::types::{Describe, TypeDescriptor};

/// Result of validating one candidate against one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Success,
    Failure(ValidationFailure),
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success)
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidationOutcome::Success => None,
            ValidationOutcome::Failure(failure) => Some(failure),
        }
    }
}

/// The expression evaluated to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// Formatted failure message.
    pub message: String,
    /// The validated member, when one was named.
    pub member_names: Vec<String>,
}

/// The rule could not be evaluated: the expression itself is defective.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid expression '{expression}' (normalized: '{normalized}'): {source}")]
pub struct ValidateError {
    pub expression: String,
    pub normalized: String,
    #[source]
    pub source: EvalError,
}

/// A declared boolean invariant over a type's members.
///
/// Two rules are equal when their expression text is equal; the message and
/// options do not take part in identity.
///
/// # Example
///
/// ```
/// use exval::{ExpressionRule, MemberDescriptor, ScalarType, TypeDescriptor, templates};
///
/// struct Counter {
///     count: i32,
/// }
///
/// let descriptor = TypeDescriptor::new("Counter").with_member(MemberDescriptor::scalar(
///     "Count",
///     ScalarType::Int32,
///     |c: &Counter| c.count.into(),
/// ));
///
/// let rule = ExpressionRule::new(templates::IS_EVEN);
/// let outcome = rule
///     .validate_with(&descriptor, &Counter { count: 3 }, Some("Count"))
///     .unwrap();
///
/// let failure = outcome.failure().unwrap();
/// assert_eq!(failure.message, "The field Count is invalid.");
/// assert_eq!(failure.member_names, vec!["Count".to_string()]);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ExpressionRule {
    /// Authored expression text. Empty or blank means "no constraint".
    #[builder(into)]
    expression: String,

    #[builder(default)]
    options: EvalOptions,

    #[builder(skip = default_message())]
    message: MessageTemplate,
}

/// `The field {0} is invalid.`
fn default_message() -> MessageTemplate {
    MessageTemplate {
        segments: vec![
            MessageSegment::Literal("The field ".to_string()),
            MessageSegment::Placeholder(0),
            MessageSegment::Literal(" is invalid.".to_string()),
        ],
    }
}

impl ExpressionRule {
    pub fn new(expression: impl Into<String>) -> Self {
        ExpressionRule::builder().expression(expression).build()
    }

    /// Replace the failure message template.
    ///
    /// The template may use `{0}` for the member (or type) name and `{{`/`}}`
    /// for literal braces.
    pub fn with_message(mut self, template: &str) -> Result<Self, ParseError> {
        let parsed = parse_message(template)?;
        if let Some(index) = parsed.max_index().filter(|&index| index > 0) {
            let column = template
                .find(&format!("{{{index}}}"))
                .map_or(1, |offset| offset + 1);
            return Err(ParseError::Syntax {
                line: 1,
                column,
                message: format!("placeholder {{{index}}} is out of range, only {{0}} is available"),
            });
        }
        self.message = parsed;
        Ok(self)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// True when the rule constrains nothing.
    pub fn is_default(&self) -> bool {
        self.expression.trim().is_empty()
    }

    /// Format the failure message for `name`.
    pub fn format_error_message(&self, name: &str) -> String {
        self.message.format(&[name])
    }

    /// Validate `instance` using its derived descriptor.
    pub fn validate<T: Describe>(
        &self,
        instance: &T,
        member_name: Option<&str>,
    ) -> Result<ValidationOutcome, ValidateError> {
        self.validate_with(T::descriptor(), instance, member_name)
    }

    /// Validate `instance` against an explicit descriptor.
    pub fn validate_with<T>(
        &self,
        descriptor: &TypeDescriptor<T>,
        instance: &T,
        member_name: Option<&str>,
    ) -> Result<ValidationOutcome, ValidateError> {
        if self.is_default() {
            return Ok(ValidationOutcome::Success);
        }

        let bindings = eligible_bindings(descriptor, instance);
        let normalized = normalize(&self.expression, member_name);
        tracing::debug!(
            expression = %self.expression,
            normalized = %normalized,
            bindings = bindings.len(),
            "evaluating expression rule"
        );

        let valid = evaluate(&normalized, &bindings, self.options).map_err(|source| {
            tracing::debug!(error = %source, "expression rule is misconfigured");
            ValidateError {
                expression: self.expression.clone(),
                normalized: normalized.clone(),
                source,
            }
        })?;

        if valid {
            return Ok(ValidationOutcome::Success);
        }

        let message = self.format_error_message(member_name.unwrap_or(descriptor.type_name()));
        tracing::debug!(%message, "expression rule failed");
        Ok(ValidationOutcome::Failure(ValidationFailure {
            message,
            member_names: member_name.map(str::to_string).into_iter().collect(),
        }))
    }
}

impl PartialEq for ExpressionRule {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for ExpressionRule {}

impl Hash for ExpressionRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expression.hash(state);
    }
}

/// Validate `instance` against `expression` with the default message and
/// options.
pub fn validate<T>(
    expression: &str,
    descriptor: &TypeDescriptor<T>,
    instance: &T,
    member_name: Option<&str>,
) -> Result<ValidationOutcome, ValidateError> {
    ExpressionRule::new(expression).validate_with(descriptor, instance, member_name)
}
