use crate::span::Span;
use thiserror::Error;

/// Parse errors
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("lexical error at byte {pos}: unrecognized character")]
    LexError { pos: usize },

    #[error("parse error at {span}: {message}")]
    SyntaxError { span: Span, message: String },

    #[error("parse error: unexpected end of input")]
    UnexpectedEof,
}
