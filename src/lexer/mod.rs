pub mod token;

pub use token::Token;

use logos::Logos;

use crate::diagnostics::ParseError;
use crate::span::{Span, Spanned};

/// Tokenize a source string into a spanned token stream.
/// Fails on the first unrecognized character.
pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, ParseError> {
    let mut tokens = Vec::new();
    for (result, range) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push(Spanned::new(token, Span::new(range.start, range.end))),
            Err(()) => return Err(ParseError::LexError { pos: range.start }),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source)
            .expect("lexing failed")
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_lex_keywords_and_idents() {
        assert_eq!(
            kinds("let letter Type type"),
            vec![
                Token::Let,
                Token::LowerIdent(interner::intern("letter")),
                Token::UpperIdent(interner::intern("Type")),
                Token::Type,
            ]
        );
    }

    #[test]
    fn test_lex_punctuation() {
        assert_eq!(
            kinds("=> -> = . ; | &"),
            vec![
                Token::FatArrow,
                Token::Arrow,
                Token::Equals,
                Token::Dot,
                Token::Semicolon,
                Token::Pipe,
                Token::Ampersand,
            ]
        );
    }

    #[test]
    fn test_lex_literals() {
        assert_eq!(
            kinds(r#"42 "hi\n" True False"#),
            vec![
                Token::Integer(42),
                Token::String("hi\n".to_string()),
                Token::True,
                Token::False,
            ]
        );
    }

    #[test]
    fn test_lex_skips_comments() {
        assert_eq!(
            kinds("1 // comment\n2"),
            vec![Token::Integer(1), Token::Integer(2)]
        );
    }

    #[test]
    fn test_lex_spans_are_byte_offsets() {
        let tokens = lex("let x").expect("lexing failed");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 5));
    }

    #[test]
    fn test_lex_error_position() {
        match lex("let ~") {
            Err(ParseError::LexError { pos }) => assert_eq!(pos, 4),
            other => panic!("expected lex error, got: {:?}", other),
        }
    }
}
