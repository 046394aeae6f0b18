//! Operator tags carried by unary and binary nodes.
//!
//! The engine never interprets these; they are opaque payload copied verbatim
//! when a node is rebuilt. They are only read for display and diagnostics.

use std::fmt;

/// Operator of a [`UnaryExpr`](crate::tree::UnaryExpr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`)
    Negate,
    /// Logical or bitwise NOT (`!x`, `~x`)
    Not,
    /// Numeric conversion to the node's result type
    Convert,
    /// Length of an array operand
    ArrayLength,
    /// Runtime type cast to the node's result type
    TypeAs,
    /// Quoting: wraps the operand as a first-class tree value
    Quote,
}

/// Operator of a [`BinaryExpr`](crate::tree::BinaryExpr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Modulo,
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Less-than (`<`)
    LessThan,
    /// Less-than-or-equal (`<=`)
    LessThanOrEqual,
    /// Greater-than (`>`)
    GreaterThan,
    /// Greater-than-or-equal (`>=`)
    GreaterThanOrEqual,
    /// Short-circuiting logical AND (`&&`)
    AndAlso,
    /// Short-circuiting logical OR (`||`)
    OrElse,
    /// Bitwise AND (`&`)
    And,
    /// Bitwise OR (`|`)
    Or,
    /// Bitwise XOR (`^`)
    ExclusiveOr,
    /// Left shift (`<<`)
    LeftShift,
    /// Right shift (`>>`)
    RightShift,
    /// Null-coalescing (`??`); the only operator that may carry a
    /// converter lambda
    Coalesce,
    /// Array indexing (`a[i]`)
    ArrayIndex,
}

/// Construction form of a [`NewArrayExpr`](crate::tree::NewArrayExpr).
///
/// The two forms share a payload shape (a list of expressions) but mean
/// different things, so a rebuild must reproduce the original form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayForm {
    /// `new T[n, m]`: the expressions are dimension lengths
    Bounds,
    /// `new T[] { a, b, c }`: the expressions are initial elements
    Init,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::Convert => "convert",
            UnaryOp::ArrayLength => "array-length",
            UnaryOp::TypeAs => "as",
            UnaryOp::Quote => "quote",
        };
        f.write_str(s)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::AndAlso => "&&",
            BinaryOp::OrElse => "||",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::ExclusiveOr => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Coalesce => "??",
            BinaryOp::ArrayIndex => "[]",
        };
        f.write_str(s)
    }
}
