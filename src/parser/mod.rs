//! Parser for the tutor language
//!
//! This module provides:
//! - Lexer (tokenization)
//! - Parser (AST construction)
//! - AST definitions
//! - Span tracking

pub mod ast;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod span;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::Parser;
pub use span::SourceFile;

use crate::diagnostics::DiagnosticBag;

/// Parse source code into an AST under a synthetic file name
pub fn parse_source(source: &str, name: &str) -> Result<Program, DiagnosticBag> {
    let source_file = SourceFile::anonymous(name, source);
    let lexer = Lexer::new(&source_file);
    let mut parser = Parser::new(lexer, source_file.clone());
    parser.parse_program()
}
#[cfg(test)]
mod tests;
