use std::fmt;

use crate::ast::Literal;
use crate::interner::{self, Symbol};
use crate::span::Span;

use super::types::{TyVarId, Type};

/// Type checking errors with source location information.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Lookup failed for a lower-case name
    UnboundIdentifier { span: Span, name: Symbol },

    /// Lookup failed for an upper-case name
    UnboundTypeOrConstructor { span: Span, name: Symbol },

    /// Function unification across different arities
    ArityMismatch {
        span: Span,
        expected: usize,
        found: usize,
    },

    /// Closed record unification across different key sets
    RecordFieldMismatch {
        span: Span,
        left: Vec<Symbol>,
        right: Vec<Symbol>,
    },

    /// Occurs check triggered (infinite type)
    RecursiveType {
        span: Span,
        var: TyVarId,
        ty: Type,
    },

    /// Literal-type disagreement
    LiteralMismatch {
        span: Span,
        left: Literal,
        right: Literal,
    },

    /// None of the unification rules apply
    UnificationFailure {
        span: Span,
        left: Type,
        right: Type,
    },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UnboundIdentifier { span, .. }
            | TypeError::UnboundTypeOrConstructor { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::RecordFieldMismatch { span, .. }
            | TypeError::RecursiveType { span, .. }
            | TypeError::LiteralMismatch { span, .. }
            | TypeError::UnificationFailure { span, .. } => *span,
        }
    }
}

fn join_keys(keys: &[Symbol]) -> String {
    keys.iter()
        .map(|k| interner::resolve(*k).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnboundIdentifier { name, .. } => {
                write!(
                    f,
                    "unbound identifier: {}",
                    interner::resolve(*name).unwrap_or_default()
                )
            }
            TypeError::UnboundTypeOrConstructor { name, .. } => {
                write!(
                    f,
                    "unbound type or constructor: {}",
                    interner::resolve(*name).unwrap_or_default()
                )
            }
            TypeError::ArityMismatch {
                expected, found, ..
            } => {
                write!(
                    f,
                    "arity mismatch: expected {} arguments but found {}",
                    expected, found
                )
            }
            TypeError::RecordFieldMismatch { left, right, .. } => {
                write!(
                    f,
                    "record field mismatch: {{{}}} vs {{{}}}",
                    join_keys(left),
                    join_keys(right)
                )
            }
            TypeError::RecursiveType { var, ty, .. } => {
                write!(f, "recursive type: T{} occurs in {}", var.0, ty)
            }
            TypeError::LiteralMismatch { left, right, .. } => {
                write!(f, "literal type mismatch: {} vs {}", left, right)
            }
            TypeError::UnificationFailure { left, right, .. } => {
                write!(f, "could not match type {} with {}", left, right)
            }
        }
    }
}

impl std::error::Error for TypeError {}
