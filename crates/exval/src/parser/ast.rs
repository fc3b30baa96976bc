//! Public AST types for predicate expressions and message templates.
//!
//! These types are public to enable external tooling (linters, formatters, etc.).

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A parsed predicate expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant: number, string, boolean or NULL.
    Literal(Literal),
    /// Reference to a bound column by name.
    Identifier(String),
    /// A prefix operator applied to an operand.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// A binary operator.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `operand IS NULL` or `operand IS NOT NULL`.
    IsNull { operand: Box<Expr>, negated: bool },
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_null(operand: Expr, negated: bool) -> Expr {
        Expr::IsNull {
            operand: Box::new(operand),
            negated,
        }
    }

    /// Every identifier referenced by this expression, in source order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Identifier(name) => names.push(name),
            Expr::Unary { operand, .. } | Expr::IsNull { operand, .. } => {
                operand.collect_identifiers(names);
            }
            Expr::Binary { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
        }
    }
}

/// A literal constant in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i128),
    Float(f64),
    String(String),
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical `NOT`.
    Not,
    /// Arithmetic `-`.
    Negate,
    /// Arithmetic `+`.
    Plus,
}

/// Infix operators, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.symbol())
    }
}

/// A parsed failure-message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub segments: Vec<MessageSegment>,
}

/// A segment within a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    /// Literal text.
    Literal(String),
    /// An indexed placeholder: `{0}`.
    Placeholder(usize),
}

impl MessageTemplate {
    /// Highest placeholder index used, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                MessageSegment::Placeholder(index) => Some(*index),
                MessageSegment::Literal(_) => None,
            })
            .max()
    }

    /// Substitute `args` into the placeholders.
    ///
    /// Placeholders without a matching argument render as empty text.
    pub fn format(&self, args: &[&str]) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                MessageSegment::Literal(text) => output.push_str(text),
                MessageSegment::Placeholder(index) => {
                    output.push_str(args.get(*index).copied().unwrap_or_default());
                }
            }
        }
        output
    }
}
