//! Miette diagnostic wrapper for expression parse errors.

use exval::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for expression parse errors.
///
/// Positions refer to the normalized expression, which is what the parser
/// sees, so that text is the diagnostic's source.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(exval::syntax))]
pub struct ExpressionDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl ExpressionDiagnostic {
    /// Create a diagnostic from a ParseError on `normalized`.
    pub fn from_parse_error(expression: &str, normalized: &str, err: &ParseError) -> Self {
        let (line, column, message) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, message.clone()),
            ParseError::UnexpectedEof { line, column } => {
                (*line, *column, "unexpected end of expression".into())
            }
            ParseError::MaxDepthExceeded { .. } => (1, 1, err.to_string()),
        };

        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = normalized
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(normalized.len());

        let help = (expression != normalized).then(|| format!("written as: {}", expression));

        ExpressionDiagnostic {
            src: NamedSource::new("expression", normalized.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}
