use std::fmt;

use logos::Logos;

use crate::interner::{self, Symbol};

/// Tokens of the UCLE surface language.
///
/// UCLE has no layout rule, so the logos-derived lexer emits the final
/// token stream directly. Lower- and upper-case identifiers are
/// distinguished lexically; `True`/`False` are keywords, not upper
/// identifiers.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("let")]
    Let,
    #[token("type")]
    Type,
    #[token("const")]
    Const,
    #[token("in")]
    In,
    #[token("match")]
    Match,
    #[token("case")]
    Case,
    #[token("fn")]
    Fn,
    #[token("rect")]
    Rect,
    #[token("True")]
    True,
    #[token("False")]
    False,

    // Identifiers - lowercase starting (values, fields, parameters)
    #[regex(r"[a-z_][a-zA-Z0-9_]*", |lex| interner::intern(lex.slice()))]
    LowerIdent(Symbol),

    // Identifiers - uppercase starting (types, constructors)
    #[regex(r"[A-Z][a-zA-Z0-9_]*", |lex| interner::intern(lex.slice()))]
    UpperIdent(Symbol),

    // Integer literals (clamp to i64 bounds on overflow)
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().unwrap_or(i64::MAX))]
    Integer(i64),

    // String literals with simple escapes
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len() - 1])
    })]
    String(String),

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token("=")]
    Equals,
    #[token("|")]
    Pipe,
    #[token("&")]
    Ampersand,
}

/// Process escape sequences in a string literal body.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Let => write!(f, "'let'"),
            Token::Type => write!(f, "'type'"),
            Token::Const => write!(f, "'const'"),
            Token::In => write!(f, "'in'"),
            Token::Match => write!(f, "'match'"),
            Token::Case => write!(f, "'case'"),
            Token::Fn => write!(f, "'fn'"),
            Token::Rect => write!(f, "'rect'"),
            Token::True => write!(f, "'True'"),
            Token::False => write!(f, "'False'"),
            Token::LowerIdent(sym) => {
                write!(f, "identifier '{}'", interner::resolve(*sym).unwrap_or_default())
            }
            Token::UpperIdent(sym) => {
                write!(f, "identifier '{}'", interner::resolve(*sym).unwrap_or_default())
            }
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Lt => write!(f, "'<'"),
            Token::Gt => write!(f, "'>'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Dot => write!(f, "'.'"),
            Token::FatArrow => write!(f, "'=>'"),
            Token::Arrow => write!(f, "'->'"),
            Token::Equals => write!(f, "'='"),
            Token::Pipe => write!(f, "'|'"),
            Token::Ampersand => write!(f, "'&'"),
        }
    }
}
