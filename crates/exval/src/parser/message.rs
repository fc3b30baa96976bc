//! Failure-message template parser using winnow.
//!
//! Parses message templates into an AST. Handles:
//! - Literal text segments
//! - Indexed placeholders: {0}, { 1 }
//! - Escape sequences: {{ }}

use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::none_of;

use super::ast::{MessageSegment, MessageTemplate};
use super::error::{ParseError, calculate_position};

/// Parse a message template into an AST.
pub fn parse_message(input: &str) -> Result<MessageTemplate, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => Ok(t),
        Ok(_) => {
            let (line, column) = calculate_position(input, remaining);
            if remaining.starts_with('{') && !remaining.contains('}') {
                return Err(ParseError::UnexpectedEof {
                    line,
                    column: column + remaining.chars().count(),
                });
            }
            Err(ParseError::Syntax {
                line,
                column,
                message: unexpected_message(remaining),
            })
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            })
        }
    }
}

fn unexpected_message(remaining: &str) -> String {
    match remaining.chars().next() {
        Some('{') => "invalid placeholder: expected '{index}' or '{{'".to_string(),
        Some('}') => "unmatched '}': use '}}' for a literal brace".to_string(),
        Some(c) => format!("unexpected character: '{c}'"),
        None => "unexpected end of input".to_string(),
    }
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<MessageTemplate> {
    let segments: Vec<MessageSegment> = repeat(0.., segment).parse_next(input)?;

    Ok(MessageTemplate {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<MessageSegment>) -> Vec<MessageSegment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            MessageSegment::Literal(text) => {
                if let Some(MessageSegment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(MessageSegment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (escape, placeholder, or literal).
fn segment(input: &mut &str) -> ModalResult<MessageSegment> {
    alt((escape_sequence, placeholder, literal_char)).parse_next(input)
}

/// Parse escape sequences: {{ -> {, }} -> }
fn escape_sequence(input: &mut &str) -> ModalResult<MessageSegment> {
    alt((
        "{{".value(MessageSegment::Literal("{".to_string())),
        "}}".value(MessageSegment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

/// Parse a single literal character (not { or }).
fn literal_char(input: &mut &str) -> ModalResult<MessageSegment> {
    none_of(['{', '}'])
        .map(|c: char| MessageSegment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a placeholder: { index }
fn placeholder(input: &mut &str) -> ModalResult<MessageSegment> {
    delimited(('{', space0), digit1.try_map(str::parse::<usize>), (space0, '}'))
        .map(MessageSegment::Placeholder)
        .parse_next(input)
}
