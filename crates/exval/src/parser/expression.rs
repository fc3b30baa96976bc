//! Predicate expression parser.
//!
//! A recursive-descent parser over normalized expressions. Each precedence
//! level is a method; winnow handles the individual lexemes (words, numbers,
//! quoted strings, bracketed names). Keywords are case-insensitive.
//!
//! Precedence, loosest first: `OR`, `AND`, `NOT`, comparisons and `IS [NOT]
//! NULL`, `+ -`, `%`, `* /`, unary `- +`, primaries.
//!
//! The depth limit bounds two things: nesting of parentheses and prefix
//! operators while parsing, and the height of the resulting tree. A chain such
//! as `A OR B OR C` is left-nested, so each of its operators adds a level. The
//! evaluator walks the tree recursively and relies on that bound.

use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_till, take_while};

use super::ast::{BinaryOp, Expr, Literal, UnaryOp};
use super::error::{ParseError, calculate_position};

/// Nesting limit applied by [`parse_expression`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

const RESERVED: &[&str] = &["AND", "OR", "NOT", "IS"];

/// Parse a normalized expression with the default nesting limit.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    parse_expression_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse a normalized expression, rejecting nesting deeper than `max_depth`.
///
/// Both the nesting of parentheses and prefix operators and the height of the
/// resulting tree must stay within `max_depth`.
pub fn parse_expression_with_depth(input: &str, max_depth: usize) -> Result<Expr, ParseError> {
    let parser = ExprParser {
        source: input,
        max_depth,
    };
    let mut remaining = input;
    let parsed = parser.or_expr(&mut remaining, 0)?;
    let _ = ws(&mut remaining);
    if remaining.is_empty() {
        Ok(parsed.expr)
    } else {
        Err(parser.unexpected(remaining))
    }
}

struct ExprParser<'s> {
    source: &'s str,
    max_depth: usize,
}

/// A parsed subtree and its height; leaves have height zero.
struct Parsed {
    expr: Expr,
    height: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Parsed { expr, height: 0 }
    }
}

impl ExprParser<'_> {
    fn or_expr(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let mut left = self.and_expr(input, depth)?;
        while keyword(input, "OR") {
            let right = self.and_expr(input, depth)?;
            left = self.binary(BinaryOp::Or, left, right)?;
        }
        Ok(left)
    }

    fn and_expr(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let mut left = self.not_expr(input, depth)?;
        while keyword(input, "AND") {
            let right = self.not_expr(input, depth)?;
            left = self.binary(BinaryOp::And, left, right)?;
        }
        Ok(left)
    }

    fn not_expr(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        if keyword(input, "NOT") {
            let depth = self.descend(depth)?;
            let operand = self.not_expr(input, depth)?;
            return self.node(Expr::unary(UnaryOp::Not, operand.expr), operand.height);
        }
        self.comparison(input, depth)
    }

    fn comparison(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let left = self.additive(input, depth)?;

        if keyword(input, "IS") {
            let negated = keyword(input, "NOT");
            if !keyword(input, "NULL") {
                return Err(self.expected(input, "NULL after IS"));
            }
            return self.node(Expr::is_null(left.expr, negated), left.height);
        }

        match comparison_op(input) {
            Some(op) => {
                let right = self.additive(input, depth)?;
                self.binary(op, left, right)
            }
            None => Ok(left),
        }
    }

    fn additive(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let mut left = self.modulo(input, depth)?;
        while let Some(op) = symbol(input, &[('+', BinaryOp::Add), ('-', BinaryOp::Sub)]) {
            let right = self.modulo(input, depth)?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    /// `%` sits between the additive and multiplicative levels, so
    /// `A % 2 * 3` is `A % (2 * 3)`.
    fn modulo(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let mut left = self.multiplicative(input, depth)?;
        while let Some(op) = symbol(input, &[('%', BinaryOp::Rem)]) {
            let right = self.multiplicative(input, depth)?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    fn multiplicative(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let mut left = self.unary(input, depth)?;
        while let Some(op) = symbol(input, &[('*', BinaryOp::Mul), ('/', BinaryOp::Div)]) {
            let right = self.unary(input, depth)?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    fn unary(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let op = match symbol(input, &[('-', UnaryOp::Negate), ('+', UnaryOp::Plus)]) {
            Some(op) => op,
            None => return self.primary(input, depth),
        };
        let depth = self.descend(depth)?;
        let operand = self.unary(input, depth)?;
        self.node(Expr::unary(op, operand.expr), operand.height)
    }

    fn primary(&self, input: &mut &str, depth: usize) -> Result<Parsed, ParseError> {
        let _ = ws(input);
        let start = *input;
        let Some(first) = start.chars().next() else {
            return Err(self.eof(start));
        };

        match first {
            '(' => {
                *input = &start[1..];
                let depth = self.descend(depth)?;
                let inner = self.or_expr(input, depth)?;
                let _ = ws(input);
                match input.strip_prefix(')') {
                    Some(rest) => {
                        *input = rest;
                        Ok(inner)
                    }
                    None => Err(self.expected(input, "')'")),
                }
            }
            '\'' => string_literal
                .parse_next(input)
                .map(|s| Parsed::leaf(Expr::Literal(Literal::String(s))))
                .map_err(|_| {
                    *input = start;
                    self.error_at(start, "unterminated string literal")
                }),
            '[' => bracketed
                .parse_next(input)
                .map(|name| Parsed::leaf(Expr::Identifier(name.to_string())))
                .map_err(|_| {
                    *input = start;
                    self.error_at(start, "unterminated '[' in column name")
                }),
            c if c.is_ascii_digit() => {
                let text = number.parse_next(input).map_err(|_| self.unexpected(start))?;
                self.number_literal(start, text).map(Parsed::leaf)
            }
            c if is_ident_start(c) => {
                let name = word.parse_next(input).map_err(|_| self.unexpected(start))?;
                let expr = if name.eq_ignore_ascii_case("NULL") {
                    Expr::Literal(Literal::Null)
                } else if name.eq_ignore_ascii_case("TRUE") {
                    Expr::Literal(Literal::Boolean(true))
                } else if name.eq_ignore_ascii_case("FALSE") {
                    Expr::Literal(Literal::Boolean(false))
                } else if RESERVED.iter().any(|kw| name.eq_ignore_ascii_case(kw)) {
                    return Err(self.error_at(
                        start,
                        format!("unexpected keyword '{}'", name.to_ascii_uppercase()),
                    ));
                } else {
                    Expr::Identifier(name.to_string())
                };
                Ok(Parsed::leaf(expr))
            }
            _ => Err(self.unexpected(start)),
        }
    }

    fn number_literal(&self, start: &str, text: &str) -> Result<Expr, ParseError> {
        if text.contains(['.', 'e', 'E']) {
            text.parse::<f64>()
                .map(|f| Expr::Literal(Literal::Float(f)))
                .map_err(|_| self.error_at(start, format!("invalid number '{text}'")))
        } else {
            text.parse::<i128>()
                .map(|n| Expr::Literal(Literal::Integer(n)))
                .map_err(|_| self.error_at(start, format!("integer literal '{text}' out of range")))
        }
    }

    fn binary(&self, op: BinaryOp, left: Parsed, right: Parsed) -> Result<Parsed, ParseError> {
        let height = left.height.max(right.height);
        self.node(Expr::binary(op, left.expr, right.expr), height)
    }

    /// Wrap `expr` as a node one level above its tallest child.
    fn node(&self, expr: Expr, child_height: usize) -> Result<Parsed, ParseError> {
        let height = child_height + 1;
        if height > self.max_depth {
            return Err(self.too_deep());
        }
        Ok(Parsed { expr, height })
    }

    fn too_deep(&self) -> ParseError {
        ParseError::MaxDepthExceeded {
            depth: self.max_depth,
        }
    }

    fn descend(&self, depth: usize) -> Result<usize, ParseError> {
        if depth >= self.max_depth {
            return Err(self.too_deep());
        }
        Ok(depth + 1)
    }

    fn error_at(&self, remaining: &str, message: impl Into<String>) -> ParseError {
        let (line, column) = calculate_position(self.source, remaining);
        ParseError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    fn eof(&self, remaining: &str) -> ParseError {
        let (line, column) = calculate_position(self.source, remaining);
        ParseError::UnexpectedEof { line, column }
    }

    fn unexpected(&self, remaining: &str) -> ParseError {
        match remaining.chars().next() {
            Some(c) => self.error_at(remaining, format!("unexpected character: '{c}'")),
            None => self.eof(remaining),
        }
    }

    fn expected(&self, input: &mut &str, what: &str) -> ParseError {
        let _ = ws(input);
        if input.is_empty() {
            self.eof(input)
        } else {
            self.error_at(input, format!("expected {what}"))
        }
    }
}

/// Consume `kw` as a whole word (case-insensitive), leaving input untouched
/// on mismatch.
fn keyword(input: &mut &str, kw: &str) -> bool {
    let mut lookahead = *input;
    let _ = ws(&mut lookahead);
    match word.parse_next(&mut lookahead) {
        Ok(w) if w.eq_ignore_ascii_case(kw) => {
            *input = lookahead;
            true
        }
        _ => false,
    }
}

/// Consume one of the single-character operators in `table`.
fn symbol<T: Copy>(input: &mut &str, table: &[(char, T)]) -> Option<T> {
    let mut lookahead = *input;
    let _ = ws(&mut lookahead);
    let c = lookahead.chars().next()?;
    let (_, op) = table.iter().find(|(symbol, _)| *symbol == c)?;
    *input = &lookahead[c.len_utf8()..];
    Some(*op)
}

fn comparison_op(input: &mut &str) -> Option<BinaryOp> {
    let mut lookahead = *input;
    let _ = ws(&mut lookahead);
    let parsed: ModalResult<BinaryOp> = alt((
        "<>".value(BinaryOp::NotEq),
        "<=".value(BinaryOp::LtEq),
        ">=".value(BinaryOp::GtEq),
        "=".value(BinaryOp::Eq),
        "<".value(BinaryOp::Lt),
        ">".value(BinaryOp::Gt),
    ))
    .parse_next(&mut lookahead);
    let op = parsed.ok()?;
    *input = lookahead;
    Some(op)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

/// Parse an identifier-shaped word.
fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (one_of(is_ident_start), take_while(0.., is_ident_cont))
        .take()
        .parse_next(input)
}

/// Parse a numeric literal: digits, optional fraction, optional exponent.
fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

/// Parse a single-quoted string; `''` is an escaped quote.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    delimited(
        '\'',
        repeat(0.., alt(("''".value('\''), none_of(['\''])))),
        '\'',
    )
    .parse_next(input)
}

/// Parse a bracketed column name: [Column Name]
fn bracketed<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('[', take_till(1.., ']'), ']').parse_next(input)
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
