//! Recursive descent parser for the tutor language

use crate::diagnostics::error_codes::syntax;
use crate::diagnostics::{Diagnostic, DiagnosticBag, Span};
use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::span::SourceFile;

/// Parser for tutor-language source code
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    #[allow(dead_code)]
    source: SourceFile,
    errors: DiagnosticBag,
    peeked: Option<Token>,
}

impl<'a> Parser<'a> {
    /// Create a new parser
    pub fn new(lexer: Lexer<'a>, source: SourceFile) -> Self {
        Self {
            lexer,
            source,
            errors: DiagnosticBag::new(),
            peeked: None,
        }
    }

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program, DiagnosticBag> {
        let start_span = self.current_span();

        let mut body = Vec::new();
        while !self.is_eof() {
            match self.parse_stmt() {
                Ok(stmt) => body.push(stmt),
                Err(diag) => {
                    self.errors.push(diag);
                    self.recover_to_next_stmt();
                }
            }
        }

        if self.errors.has_errors() {
            return Err(self.errors.clone());
        }

        let end_span = self.current_span();
        Ok(Program {
            id: NodeId::new(),
            span: start_span.merge(&end_span),
            body,
        })
    }

    fn parse_fn_def(&mut self) -> Result<FnDef, Diagnostic> {
        let start_span = self.current_span();

        self.expect(TokenKind::Fn)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_body()?;

        let end_span = self.current_span();
        Ok(FnDef {
            id: NodeId::new(),
            span: start_span.merge(&end_span),
            name,
            params,
            body,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, Diagnostic> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            params.push(self.parse_param()?);
            while self.check(TokenKind::Comma) {
                self.advance();
                if self.check(TokenKind::RParen) {
                    break;
                }
                params.push(self.parse_param()?);
            }
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, Diagnostic> {
        let span = self.current_span();
        let name = self.expect_ident()?;
        Ok(Param {
            id: NodeId::new(),
            span,
            name,
        })
    }

    /// Parse a braced statement list
    fn parse_body(&mut self) -> Result<Vec<Stmt>, Diagnostic> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let start_span = self.current_span();

        match self.peek().kind {
            TokenKind::Fn => Ok(Stmt::Fn(self.parse_fn_def()?)),
            TokenKind::Let => {
                self.advance();
                let name = self.expect_ident()?;
                self.expect(TokenKind::Eq)?;
                let value = Box::new(self.parse_expr()?);

                let end_span = self.current_span();
                Ok(Stmt::Let {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    name,
                    value,
                })
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.starts_expr() {
                    Some(Box::new(self.parse_expr()?))
                } else {
                    None
                };

                let end_span = self.current_span();
                Ok(Stmt::Return {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    value,
                })
            }
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => {
                self.advance();
                let cond = Box::new(self.parse_expr()?);
                let body = self.parse_body()?;

                let end_span = self.current_span();
                Ok(Stmt::While {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    cond,
                    body,
                })
            }
            TokenKind::For => {
                self.advance();
                let binding = self.expect_ident()?;
                self.expect(TokenKind::In)?;
                let iter = Box::new(self.parse_expr()?);
                let body = self.parse_body()?;

                let end_span = self.current_span();
                Ok(Stmt::For {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    binding,
                    iter,
                    body,
                })
            }
            TokenKind::Break => {
                self.advance();
                Ok(Stmt::Break {
                    id: NodeId::new(),
                    span: start_span,
                })
            }
            TokenKind::Continue => {
                self.advance();
                Ok(Stmt::Continue {
                    id: NodeId::new(),
                    span: start_span,
                })
            }
            _ => {
                // Expression statement, or `name = expr` assignment
                let expr = self.parse_expr()?;

                if self.check(TokenKind::Eq) {
                    let target = match &expr {
                        Expr::Ident { name, .. } => name.clone(),
                        _ => return Err(self.error_unexpected("assignment target")),
                    };
                    self.advance();
                    let value = Box::new(self.parse_expr()?);
                    let end_span = self.current_span();
                    return Ok(Stmt::Assign {
                        id: NodeId::new(),
                        span: start_span.merge(&end_span),
                        target,
                        value,
                    });
                }

                let span = expr.span().clone();
                Ok(Stmt::Expr {
                    id: NodeId::new(),
                    span,
                    expr: Box::new(expr),
                })
            }
        }
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let start_span = self.current_span();
        self.expect(TokenKind::If)?;
        let cond = Box::new(self.parse_expr()?);
        let then_body = self.parse_body()?;

        let else_body = if self.check(TokenKind::Else) {
            self.advance();
            if self.check(TokenKind::If) {
                // `else if` chains as an else branch holding one if statement
                Some(vec![self.parse_if_stmt()?])
            } else {
                Some(self.parse_body()?)
            }
        } else {
            None
        };

        let end_span = self.current_span();
        Ok(Stmt::If {
            id: NodeId::new(),
            span: start_span.merge(&end_span),
            cond,
            then_body,
            else_body,
        })
    }

    /// Check whether the next token can begin an expression (used to
    /// decide if `return` carries a value)
    fn starts_expr(&mut self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::IntLit(_)
                | TokenKind::StrLit(_)
                | TokenKind::Ident(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Not
                | TokenKind::Minus
                | TokenKind::LParen
                | TokenKind::LBracket
        )
    }

    fn parse_expr(&mut self) -> Result<Expr, Diagnostic> {
        self.parse_binary_expr(0)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Expr, Diagnostic> {
        let mut left = self.parse_unary_expr()?;

        loop {
            let (op, prec) = match self.peek().kind {
                TokenKind::Or => (BinaryOp::Or, 1),
                TokenKind::And => (BinaryOp::And, 2),
                TokenKind::EqEq => (BinaryOp::Eq, 3),
                TokenKind::BangEq => (BinaryOp::Ne, 3),
                TokenKind::Lt => (BinaryOp::Lt, 4),
                TokenKind::LtEq => (BinaryOp::Le, 4),
                TokenKind::Gt => (BinaryOp::Gt, 4),
                TokenKind::GtEq => (BinaryOp::Ge, 4),
                TokenKind::Plus => (BinaryOp::Add, 5),
                TokenKind::Minus => (BinaryOp::Sub, 5),
                TokenKind::Star => (BinaryOp::Mul, 6),
                TokenKind::Slash => (BinaryOp::Div, 6),
                TokenKind::Percent => (BinaryOp::Mod, 6),
                _ => break,
            };

            if prec < min_prec {
                break;
            }

            let start_span = left.span().clone();
            self.advance();
            let right = self.parse_binary_expr(prec + 1)?;
            let end_span = right.span().clone();

            left = Expr::Binary {
                id: NodeId::new(),
                span: start_span.merge(&end_span),
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, Diagnostic> {
        if self.check(TokenKind::Not) {
            let start_span = self.current_span();
            self.advance();
            let expr = self.parse_unary_expr()?;
            let end_span = expr.span().clone();
            return Ok(Expr::Unary {
                id: NodeId::new(),
                span: start_span.merge(&end_span),
                op: UnaryOp::Not,
                expr: Box::new(expr),
            });
        }
        if self.check(TokenKind::Minus) {
            let start_span = self.current_span();
            self.advance();
            let expr = self.parse_unary_expr()?;
            let end_span = expr.span().clone();
            return Ok(Expr::Unary {
                id: NodeId::new(),
                span: start_span.merge(&end_span),
                op: UnaryOp::Neg,
                expr: Box::new(expr),
            });
        }
        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, Diagnostic> {
        let mut expr = self.parse_primary_expr()?;

        loop {
            if self.check(TokenKind::LParen) {
                let start_span = expr.span().clone();
                self.advance();
                let mut args = Vec::new();
                if !self.check(TokenKind::RParen) {
                    args.push(self.parse_expr()?);
                    while self.check(TokenKind::Comma) {
                        self.advance();
                        if self.check(TokenKind::RParen) {
                            break;
                        }
                        args.push(self.parse_expr()?);
                    }
                }
                self.expect(TokenKind::RParen)?;
                let end_span = self.current_span();
                expr = Expr::Call {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    func: Box::new(expr),
                    args,
                };
            } else if self.check(TokenKind::LBracket) {
                let start_span = expr.span().clone();
                self.advance();
                let index = self.parse_expr()?;
                self.expect(TokenKind::RBracket)?;
                let end_span = self.current_span();
                expr = Expr::Index {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, Diagnostic> {
        let token = self.peek();

        match &token.kind {
            TokenKind::IntLit(n) => {
                let value = *n;
                self.advance();
                Ok(Expr::IntLit {
                    id: NodeId::new(),
                    span: token.span,
                    value,
                })
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::BoolLit {
                    id: NodeId::new(),
                    span: token.span,
                    value: true,
                })
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::BoolLit {
                    id: NodeId::new(),
                    span: token.span,
                    value: false,
                })
            }
            TokenKind::StrLit(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expr::StrLit {
                    id: NodeId::new(),
                    span: token.span,
                    value,
                })
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Ident {
                    id: NodeId::new(),
                    span: token.span,
                    name,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                let start_span = token.span.clone();
                self.advance();
                let mut elements = Vec::new();
                if !self.check(TokenKind::RBracket) {
                    elements.push(self.parse_expr()?);
                    while self.check(TokenKind::Comma) {
                        self.advance();
                        if self.check(TokenKind::RBracket) {
                            break;
                        }
                        elements.push(self.parse_expr()?);
                    }
                }
                self.expect(TokenKind::RBracket)?;
                let end_span = self.current_span();
                Ok(Expr::ListLit {
                    id: NodeId::new(),
                    span: start_span.merge(&end_span),
                    elements,
                })
            }
            _ => Err(self.error_unexpected("expression")),
        }
    }

    fn next_from_lexer(&mut self) -> Token {
        match self.lexer.next_token() {
            Ok(token) => token,
            Err(diag) => {
                let span = diag.span.clone();
                self.errors.push(diag);
                Token::new(TokenKind::Eof, span)
            }
        }
    }

    fn peek(&mut self) -> Token {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_from_lexer());
        }
        self.peeked.clone().unwrap()
    }

    fn advance(&mut self) -> Token {
        if let Some(token) = self.peeked.take() {
            token
        } else {
            self.next_from_lexer()
        }
    }

    fn is_eof(&mut self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn current_span(&mut self) -> Span {
        self.peek().span.clone()
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(&kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        let token = self.advance();
        if std::mem::discriminant(&token.kind) == std::mem::discriminant(&kind) {
            return Ok(token);
        }

        let (code, message) = if matches!(token.kind, TokenKind::Eof) {
            (
                syntax::UNEXPECTED_EOF,
                format!("Expected {:?}, found end of file", kind),
            )
        } else if matches!(
            kind,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket
        ) {
            (
                syntax::MISSING_DELIMITER,
                format!("Expected {:?}, found {:?}", kind, token.kind),
            )
        } else {
            (
                syntax::UNEXPECTED_TOKEN,
                format!("Expected {:?}, found {:?}", kind, token.kind),
            )
        };
        Err(Diagnostic::error(code)
            .message(message)
            .span(token.span)
            .build())
    }

    fn expect_ident(&mut self) -> Result<String, Diagnostic> {
        let token = self.advance();
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(
                Diagnostic::error(syntax::UNEXPECTED_TOKEN)
                    .message(format!("Expected identifier, found {:?}", token.kind))
                    .span(token.span)
                    .build(),
            ),
        }
    }

    fn error_unexpected(&mut self, expected: &str) -> Diagnostic {
        let token = self.peek();
        Diagnostic::error(syntax::UNEXPECTED_TOKEN)
            .message(format!("Expected {}, found {:?}", expected, token.kind))
            .span(token.span.clone())
            .build()
    }

    fn recover_to_next_stmt(&mut self) {
        while !self.is_eof() {
            match self.peek().kind {
                TokenKind::Fn
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return => return,
                TokenKind::RBrace => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}
