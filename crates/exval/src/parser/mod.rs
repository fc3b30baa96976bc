//! Parsers for normalized predicate expressions and failure-message templates.
//!
//! The expression parser produces an AST that the interpreter evaluates
//! against a single bound row. The message parser handles the indexed
//! placeholder templates used for failure messages.

pub mod ast;
pub mod error;
mod expression;
mod message;

pub use ast::*;
pub use error::ParseError;
pub use expression::{DEFAULT_MAX_DEPTH, parse_expression, parse_expression_with_depth};
pub use message::parse_message;
