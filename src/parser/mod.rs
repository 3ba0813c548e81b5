//! Recursive-descent parser for UCLE.
//!
//! The grammar is LL(1): every construct is selected by its leading
//! token. The parser assigns each node a sequential `NodeId` in parse
//! order; these ids are the stable keys for per-node inferred types.

use crate::ast::{
    Decl, Expr, Literal, MatchArm, NodeId, Param, Pattern, Program, TypeExpr,
};
use crate::diagnostics::ParseError;
use crate::interner::Symbol;
use crate::lexer::{lex, Token};
use crate::span::{Span, Spanned};

/// Parse a whole source file into a program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Parse a single expression (used by tests and the REPL-shaped entry points).
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    next_node: u32,
}

impl Parser {
    fn new(tokens: Vec<Spanned<Token>>) -> Self {
        Parser {
            tokens,
            pos: 0,
            next_node: 0,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.value)
    }

    /// Span of the current token, or of the last token when at end of input.
    fn here(&self) -> Span {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(t) => t.span,
            None => Span::new(0, 0),
        }
    }

    fn bump(&mut self) -> Result<Spanned<Token>, ParseError> {
        match self.tokens.get(self.pos) {
            Some(t) => {
                self.pos += 1;
                Ok(t.clone())
            }
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<Span, ParseError> {
        match self.peek() {
            Some(t) if *t == token => Ok(self.bump()?.span),
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected {}, found {}", what, t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected end of input, found {}", t),
            }),
        }
    }

    fn expect_lower(&mut self, what: &str) -> Result<Spanned<Symbol>, ParseError> {
        match self.peek() {
            Some(Token::LowerIdent(name)) => {
                let name = *name;
                let span = self.bump()?.span;
                Ok(Spanned::new(name, span))
            }
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected {}, found {}", what, t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn expect_upper(&mut self, what: &str) -> Result<Spanned<Symbol>, ParseError> {
        match self.peek() {
            Some(Token::UpperIdent(name)) => {
                let name = *name;
                let span = self.bump()?.span;
                Ok(Spanned::new(name, span))
            }
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected {}, found {}", what, t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    // ===== Declarations =====

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut decls = Vec::new();
        while self.peek().is_some() {
            decls.push(self.parse_decl()?);
        }
        Ok(Program { decls })
    }

    fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        match self.peek() {
            Some(Token::Let) => self.parse_let_decl(),
            Some(Token::Type) => self.parse_type_decl(),
            _ => {
                let id = self.next_id();
                let expr = self.parse_expr()?;
                let end = self.expect(Token::Semicolon, "';'")?;
                let span = expr.span().merge(end);
                Ok(Decl::Expr { id, span, expr })
            }
        }
    }

    fn parse_let_decl(&mut self) -> Result<Decl, ParseError> {
        let start = self.expect(Token::Let, "'let'")?;
        let id = self.next_id();
        let name = self.expect_lower("binding name")?;
        let generics = self.parse_generics()?;
        let params = if self.at(&Token::LParen) {
            Some(self.parse_params()?)
        } else {
            None
        };
        let ann = if self.eat(&Token::Colon) {
            Some(self.parse_type_expr()?)
        } else {
            None
        };
        self.expect(Token::FatArrow, "'=>'")?;
        let body = self.parse_expr()?;
        let end = self.expect(Token::Semicolon, "';'")?;
        Ok(Decl::Let {
            id,
            span: start.merge(end),
            name,
            generics,
            params,
            ann,
            body,
        })
    }

    fn parse_type_decl(&mut self) -> Result<Decl, ParseError> {
        let start = self.expect(Token::Type, "'type'")?;
        let id = self.next_id();
        let name = self.expect_upper("type name")?;
        let generics = self.parse_generics()?;
        self.expect(Token::Equals, "'='")?;
        let ty = self.parse_type_expr()?;
        let end = self.expect(Token::Semicolon, "';'")?;
        Ok(Decl::Type {
            id,
            span: start.merge(end),
            name,
            generics,
            ty,
        })
    }

    /// Optional generic parameter list: `<T, U>`.
    fn parse_generics(&mut self) -> Result<Vec<Spanned<Symbol>>, ParseError> {
        let mut generics = Vec::new();
        if !self.eat(&Token::Lt) {
            return Ok(generics);
        }
        loop {
            generics.push(self.expect_upper("generic parameter")?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::Gt, "'>'")?;
        Ok(generics)
    }

    /// Parenthesized parameter list: `(a, b: Number)`.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(Token::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.at(&Token::RParen) {
            loop {
                let id = self.next_id();
                let name = self.expect_lower("parameter name")?;
                let ann = if self.eat(&Token::Colon) {
                    Some(self.parse_type_expr()?)
                } else {
                    None
                };
                let span = match &ann {
                    Some(ty) => name.span.merge(ty.span()),
                    None => name.span,
                };
                params.push(Param { id, span, name, ann });
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(params)
    }

    // ===== Expressions =====

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Fn) => self.parse_lambda(),
            Some(Token::Const) => self.parse_const(),
            Some(Token::Match) => self.parse_match(),
            _ => self.parse_suffixed(),
        }
    }

    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(Token::Fn, "'fn'")?;
        let id = self.next_id();
        let params = self.parse_params()?;
        self.expect(Token::FatArrow, "'=>'")?;
        let body = self.parse_expr()?;
        let span = start.merge(body.span());
        Ok(Expr::Lambda {
            id,
            span,
            params,
            body: Box::new(body),
        })
    }

    fn parse_const(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(Token::Const, "'const'")?;
        let id = self.next_id();
        let name = self.expect_lower("binding name")?;
        self.expect(Token::Equals, "'='")?;
        let value = self.parse_expr()?;
        self.expect(Token::In, "'in'")?;
        let body = self.parse_expr()?;
        let span = start.merge(body.span());
        Ok(Expr::Const {
            id,
            span,
            name,
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    fn parse_match(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(Token::Match, "'match'")?;
        let id = self.next_id();
        let scrutinee = self.parse_expr()?;
        self.expect(Token::LBrace, "'{'")?;
        let mut arms = Vec::new();
        loop {
            let case_span = self.expect(Token::Case, "'case'")?;
            let pattern = self.parse_pattern()?;
            self.expect(Token::FatArrow, "'=>'")?;
            let body = self.parse_expr()?;
            arms.push(MatchArm {
                span: case_span.merge(body.span()),
                pattern,
                body,
            });
            if !self.at(&Token::Case) {
                break;
            }
        }
        let end = self.expect(Token::RBrace, "'}'")?;
        Ok(Expr::Match {
            id,
            span: start.merge(end),
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    /// A primary expression followed by application and access suffixes,
    /// threaded left-to-right.
    fn parse_suffixed(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.at(&Token::LParen) {
                let id = self.next_id();
                self.expect(Token::LParen, "'('")?;
                let mut args = Vec::new();
                if !self.at(&Token::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                }
                let end = self.expect(Token::RParen, "')'")?;
                let span = expr.span().merge(end);
                expr = Expr::Call {
                    id,
                    span,
                    callee: Box::new(expr),
                    args,
                };
            } else if self.eat(&Token::Dot) {
                let id = self.next_id();
                let field = self.expect_lower("field name")?;
                let span = expr.span().merge(field.span);
                expr = Expr::Access {
                    id,
                    span,
                    base: Box::new(expr),
                    field,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Integer(_)) | Some(Token::String(_)) | Some(Token::True)
            | Some(Token::False) => {
                let id = self.next_id();
                let (lit, span) = self.parse_literal()?;
                Ok(Expr::Literal { id, span, lit })
            }
            Some(Token::LowerIdent(name)) => {
                let name = *name;
                let id = self.next_id();
                let span = self.bump()?.span;
                Ok(Expr::Var { id, span, name })
            }
            Some(Token::UpperIdent(name)) => {
                let name = *name;
                let id = self.next_id();
                let span = self.bump()?.span;
                Ok(Expr::Ctor { id, span, name })
            }
            Some(Token::Rect) => self.parse_record_literal(),
            Some(Token::LParen) => {
                self.expect(Token::LParen, "'('")?;
                let expr = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(expr)
            }
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected expression, found {}", t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn parse_literal(&mut self) -> Result<(Literal, Span), ParseError> {
        let token = self.bump()?;
        let lit = match token.value {
            Token::Integer(n) => Literal::Int(n),
            Token::String(s) => Literal::Str(s),
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            other => {
                return Err(ParseError::SyntaxError {
                    span: token.span,
                    message: format!("expected literal, found {}", other),
                })
            }
        };
        Ok((lit, token.span))
    }

    fn parse_record_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(Token::Rect, "'rect'")?;
        let id = self.next_id();
        self.expect(Token::LBrace, "'{'")?;
        let mut fields = Vec::new();
        if !self.at(&Token::RBrace) {
            loop {
                let name = self.expect_lower("field name")?;
                self.expect(Token::Colon, "':'")?;
                let value = self.parse_expr()?;
                fields.push((name, value));
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(Token::RBrace, "'}'")?;
        Ok(Expr::Record {
            id,
            span: start.merge(end),
            fields,
        })
    }

    // ===== Patterns =====

    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        match self.peek() {
            Some(Token::Rect) => self.parse_record_pattern(),
            Some(Token::UpperIdent(name)) => {
                let name = *name;
                let id = self.next_id();
                let name_span = self.bump()?.span;
                let name = Spanned::new(name, name_span);
                let mut span = name_span;
                let args = if self.at(&Token::LParen) {
                    self.expect(Token::LParen, "'('")?;
                    let mut args = Vec::new();
                    if !self.at(&Token::RParen) {
                        loop {
                            args.push(self.parse_pattern()?);
                            if !self.eat(&Token::Comma) {
                                break;
                            }
                        }
                    }
                    let end = self.expect(Token::RParen, "')'")?;
                    span = span.merge(end);
                    Some(args)
                } else {
                    None
                };
                Ok(Pattern::Ctor { id, span, name, args })
            }
            Some(Token::LowerIdent(name)) => {
                let name = *name;
                let id = self.next_id();
                let span = self.bump()?.span;
                Ok(Pattern::Var { id, span, name })
            }
            Some(Token::Integer(_)) | Some(Token::String(_)) | Some(Token::True)
            | Some(Token::False) => {
                let id = self.next_id();
                let (lit, span) = self.parse_literal()?;
                Ok(Pattern::Literal { id, span, lit })
            }
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected pattern, found {}", t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn parse_record_pattern(&mut self) -> Result<Pattern, ParseError> {
        let start = self.expect(Token::Rect, "'rect'")?;
        let id = self.next_id();
        self.expect(Token::LBrace, "'{'")?;
        let mut fields = Vec::new();
        if !self.at(&Token::RBrace) {
            loop {
                let name = self.expect_lower("field name")?;
                self.expect(Token::Colon, "':'")?;
                let pattern = self.parse_pattern()?;
                fields.push((name, pattern));
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(Token::RBrace, "'}'")?;
        Ok(Pattern::Record {
            id,
            span: start.merge(end),
            fields,
        })
    }

    // ===== Type expressions =====

    /// Full type expression. `->` is right-associative and binds loosest;
    /// `|` binds looser than `&`.
    fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        let param = self.parse_type_union()?;
        if self.eat(&Token::Arrow) {
            let ret = self.parse_type_expr()?;
            let span = param.span().merge(ret.span());
            Ok(TypeExpr::Function {
                span,
                param: Box::new(param),
                ret: Box::new(ret),
            })
        } else {
            Ok(param)
        }
    }

    fn parse_type_union(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_type_intersection()?;
        if !self.at(&Token::Pipe) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&Token::Pipe) {
            items.push(self.parse_type_intersection()?);
        }
        let span = items[0].span().merge(items[items.len() - 1].span());
        Ok(TypeExpr::Union { span, items })
    }

    fn parse_type_intersection(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_type_atom()?;
        if !self.at(&Token::Ampersand) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&Token::Ampersand) {
            items.push(self.parse_type_atom()?);
        }
        let span = items[0].span().merge(items[items.len() - 1].span());
        Ok(TypeExpr::Intersection { span, items })
    }

    fn parse_type_atom(&mut self) -> Result<TypeExpr, ParseError> {
        match self.peek() {
            Some(Token::UpperIdent(name)) => {
                let name = *name;
                let name_span = self.bump()?.span;
                let name = Spanned::new(name, name_span);
                let mut span = name_span;
                let mut args = Vec::new();
                if self.eat(&Token::Lt) {
                    loop {
                        args.push(self.parse_type_expr()?);
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                    span = span.merge(self.expect(Token::Gt, "'>'")?);
                }
                Ok(TypeExpr::Named { span, name, args })
            }
            Some(Token::Rect) => {
                let start = self.expect(Token::Rect, "'rect'")?;
                self.expect(Token::LBrace, "'{'")?;
                let mut fields = Vec::new();
                if !self.at(&Token::RBrace) {
                    loop {
                        let name = self.expect_lower("field name")?;
                        self.expect(Token::Colon, "':'")?;
                        let ty = self.parse_type_expr()?;
                        fields.push((name, ty));
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                }
                let end = self.expect(Token::RBrace, "'}'")?;
                Ok(TypeExpr::Record {
                    span: start.merge(end),
                    fields,
                })
            }
            Some(Token::Integer(_)) | Some(Token::String(_)) | Some(Token::True)
            | Some(Token::False) => {
                let (lit, span) = self.parse_literal()?;
                Ok(TypeExpr::Literal { span, lit })
            }
            Some(Token::LParen) => {
                self.expect(Token::LParen, "'('")?;
                let ty = self.parse_type_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(ty)
            }
            Some(t) => Err(ParseError::SyntaxError {
                span: self.here(),
                message: format!("expected type, found {}", t),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner;

    // ===== Expressions =====

    #[test]
    fn test_parse_int_literal() {
        let result = parse_expr("42");
        assert!(
            matches!(result, Ok(Expr::Literal { lit: Literal::Int(42), .. })),
            "expected Int(42), got: {:?}",
            result
        );
    }

    #[test]
    fn test_parse_lambda() {
        let expr = parse_expr("fn(x, y) => x").expect("parse failed");
        match expr {
            Expr::Lambda { params, body, .. } => {
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name.value, interner::intern("x"));
                assert!(matches!(*body, Expr::Var { .. }));
            }
            other => panic!("expected lambda, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_annotated_lambda_param() {
        let expr = parse_expr("fn(x: Number) => x").expect("parse failed");
        match expr {
            Expr::Lambda { params, .. } => {
                assert!(matches!(params[0].ann, Some(TypeExpr::Named { .. })));
            }
            other => panic!("expected lambda, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_and_access_suffixes() {
        let expr = parse_expr("f(1)(2).field").expect("parse failed");
        match expr {
            Expr::Access { base, field, .. } => {
                assert_eq!(field.value, interner::intern("field"));
                assert!(matches!(*base, Expr::Call { .. }));
            }
            other => panic!("expected access, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_record_literal() {
        let expr = parse_expr("rect { first: 1, second: \"a\" }").expect("parse failed");
        match expr {
            Expr::Record { fields, .. } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].0.value, interner::intern("first"));
            }
            other => panic!("expected record, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_const() {
        let expr = parse_expr("const x = 1 in x").expect("parse failed");
        assert!(matches!(expr, Expr::Const { .. }));
    }

    #[test]
    fn test_parse_match_with_patterns() {
        let expr =
            parse_expr("match p { case rect { name: n } => n case other => other }")
                .expect("parse failed");
        match expr {
            Expr::Match { arms, .. } => {
                assert_eq!(arms.len(), 2);
                assert!(matches!(arms[0].pattern, Pattern::Record { .. }));
                assert!(matches!(arms[1].pattern, Pattern::Var { .. }));
            }
            other => panic!("expected match, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_constructor_pattern_with_and_without_args() {
        let expr = parse_expr("match x { case Some(y) => y case None => x }")
            .expect("parse failed");
        match expr {
            Expr::Match { arms, .. } => {
                assert!(
                    matches!(&arms[0].pattern, Pattern::Ctor { args: Some(args), .. } if args.len() == 1)
                );
                assert!(matches!(&arms[1].pattern, Pattern::Ctor { args: None, .. }));
            }
            other => panic!("expected match, got: {:?}", other),
        }
    }

    // ===== Declarations =====

    #[test]
    fn test_parse_let_declaration() {
        let program = parse("let identity => fn(x) => x;").expect("parse failed");
        assert_eq!(program.decls.len(), 1);
        match &program.decls[0] {
            Decl::Let { name, params, ann, .. } => {
                assert_eq!(name.value, interner::intern("identity"));
                assert!(params.is_none());
                assert!(ann.is_none());
            }
            other => panic!("expected let, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_let_with_params_and_annotation() {
        let program = parse("let add(a: Number, b: Number): Number => a;").expect("parse failed");
        match &program.decls[0] {
            Decl::Let { params, ann, .. } => {
                assert_eq!(params.as_ref().map(|p| p.len()), Some(2));
                assert!(ann.is_some());
            }
            other => panic!("expected let, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_let_with_generics() {
        let program = parse("let first<T, U>(p: Pair<T, U>): T => p.first;").expect("parse failed");
        match &program.decls[0] {
            Decl::Let { generics, .. } => assert_eq!(generics.len(), 2),
            other => panic!("expected let, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_type_declaration() {
        let program = parse("type Point = rect { x: Number, y: Number };").expect("parse failed");
        match &program.decls[0] {
            Decl::Type { name, ty, .. } => {
                assert_eq!(name.value, interner::intern("Point"));
                assert!(matches!(ty, TypeExpr::Record { fields, .. } if fields.len() == 2));
            }
            other => panic!("expected type decl, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_expression_statement() {
        let program = parse("identity(5);").expect("parse failed");
        assert!(matches!(&program.decls[0], Decl::Expr { .. }));
    }

    // ===== Type expressions =====

    #[test]
    fn test_parse_function_type_right_associates() {
        let program = parse("let f: Number -> Number -> Number => g;").expect("parse failed");
        match &program.decls[0] {
            Decl::Let { ann: Some(TypeExpr::Function { ret, .. }), .. } => {
                assert!(matches!(**ret, TypeExpr::Function { .. }));
            }
            other => panic!("expected annotated let, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_union_intersection_precedence() {
        // `A | B & C` groups as `A | (B & C)`.
        let program = parse("let f: A | B & C => g;").expect("parse failed");
        match &program.decls[0] {
            Decl::Let { ann: Some(TypeExpr::Union { items, .. }), .. } => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[1], TypeExpr::Intersection { .. }));
            }
            other => panic!("expected union annotation, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_literal_type() {
        let program = parse("let f: 42 | \"on\" => g;").expect("parse failed");
        match &program.decls[0] {
            Decl::Let { ann: Some(TypeExpr::Union { items, .. }), .. } => {
                assert!(matches!(&items[0], TypeExpr::Literal { lit: Literal::Int(42), .. }));
            }
            other => panic!("expected union annotation, got: {:?}", other),
        }
    }

    #[test]
    fn test_node_ids_are_unique() {
        let program = parse("let pair => fn(a, b) => rect { first: a, second: b };")
            .expect("parse failed");
        let mut ids = Vec::new();
        fn walk(expr: &Expr, ids: &mut Vec<NodeId>) {
            ids.push(expr.id());
            match expr {
                Expr::Lambda { params, body, .. } => {
                    for p in params {
                        ids.push(p.id);
                    }
                    walk(body, ids);
                }
                Expr::Record { fields, .. } => {
                    for (_, e) in fields {
                        walk(e, ids);
                    }
                }
                _ => {}
            }
        }
        if let Decl::Let { id, body, .. } = &program.decls[0] {
            ids.push(*id);
            walk(body, &mut ids);
        }
        let mut deduped = ids.clone();
        deduped.sort_by_key(|n| n.0);
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len(), "node ids must be unique");
    }

    #[test]
    fn test_parse_error_reports_unexpected_token() {
        match parse("let => 1;") {
            Err(ParseError::SyntaxError { message, .. }) => {
                assert!(message.contains("binding name"), "got message: {}", message);
            }
            other => panic!("expected syntax error, got: {:?}", other),
        }
    }
}
