//! Lexer for the tutor language

use crate::diagnostics::error_codes::syntax;
use crate::diagnostics::{Diagnostic, Span};
use crate::parser::span::SourceFile;
use logos::Logos;

/// Token types for the tutor language
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // Keywords
    #[token("and")]
    And,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fn")]
    Fn,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("let")]
    Let,
    #[token("not")]
    Not,
    #[token("or")]
    Or,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("while")]
    While,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLit(i64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        Some(unescape(&s[1..s.len()-1]))
    })]
    StrLit(String),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,

    // Comments
    #[regex(r"#[^\n]*", |lex| lex.slice().to_string())]
    LineComment(String),

    // End of file
    Eof,
}

/// Resolve the escape sequences the tutor language supports
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
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// A token with its span
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Lexer for tutor-language source code
pub struct Lexer<'a> {
    source: &'a SourceFile,
    logos_lexer: logos::Lexer<'a, TokenKind>,
    peeked: Option<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source file
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            logos_lexer: TokenKind::lexer(source.content()),
            peeked: None,
            at_eof: false,
        }
    }

    /// Get the next token, skipping comments
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        loop {
            if self.at_eof {
                return Ok(Token::new(
                    TokenKind::Eof,
                    self.source
                        .span(self.source.content().len(), self.source.content().len()),
                ));
            }

            match self.logos_lexer.next() {
                Some(Ok(TokenKind::LineComment(_))) => continue,
                Some(Ok(kind)) => {
                    let span_range = self.logos_lexer.span();
                    let span = self.source.span(span_range.start, span_range.end);
                    return Ok(Token::new(kind, span));
                }
                Some(Err(())) => {
                    let span_range = self.logos_lexer.span();
                    let span = self.source.span(span_range.start, span_range.end);
                    let slice = self.logos_lexer.slice();
                    let (code, message) = if slice.starts_with('"') {
                        (syntax::UNTERMINATED_STRING, "Unterminated string literal".to_string())
                    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
                        // the integer regex matched but the i64 parse overflowed
                        (
                            syntax::INVALID_NUMBER,
                            format!("Integer literal out of range: {}", slice),
                        )
                    } else {
                        (
                            syntax::UNEXPECTED_TOKEN,
                            format!("Unexpected character: {:?}", slice),
                        )
                    };
                    return Err(Diagnostic::error(code).message(message).span(span).build());
                }
                None => {
                    self.at_eof = true;
                }
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> Result<&Token, Diagnostic> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token()?);
        }
        Ok(self.peeked.as_ref().unwrap())
    }

    /// Check if we're at the end of the file
    pub fn is_eof(&mut self) -> bool {
        self.peek().map(|t| t.kind == TokenKind::Eof).unwrap_or(true)
    }
}
