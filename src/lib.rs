//! Type inference core for UCLE
//!
//! UCLE is a small expression-oriented functional language with lambdas,
//! records with structural access, pattern matching, and polymorphic
//! let-bindings. This crate implements the full front half:
//! 1. Logos-based lexer
//! 2. Recursive-descent parser producing a node-indexed AST
//! 3. Constraint-based type inference with row-polymorphic records

pub mod ast;
pub mod diagnostics;
pub mod interner;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod typechecker;

// Re-export main entry points
pub use diagnostics::ParseError;
pub use lexer::{lex, Token};
pub use parser::{parse, parse_expr};
pub use typechecker::error::TypeError;
pub use typechecker::{infer, inferred_types_as_strings, InferResult};
