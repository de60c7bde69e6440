//! JavaScript Syntax Component
//!
//! Provides the scanner, parser, syntax tree and renderer for ES2015
//! JavaScript source text.
//!
//! # Overview
//!
//! - [`Scanner`] - Lazily tokenizes source text with backtracking snapshots
//! - [`Token`] - Classified lexeme with its source location
//! - [`Parser`] - Backtracking recursive-descent parser producing a [`Program`]
//! - [`ast`] - Syntax tree node types
//! - [`Renderer`] - Converts a tree back to formatted source text
//!
//! # Example
//!
//! ```
//! use js_syntax::{parse, render, FormattingOptions, ParseOptions};
//!
//! let program = parse("let x = a+b*2", ParseOptions::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let text = render(&program, &FormattingOptions::pretty_print());
//! assert_eq!(text, "let x = a + b * 2;");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod literal;
pub mod parser;
pub mod renderer;
pub mod scanner;
mod stack;
pub mod token;

pub use ast::{Expression, Pattern, Program, SourceType, Statement};
pub use core_types::{ErrorKind, Position, SourceLocation, SyntaxError, SyntaxResult};
pub use parser::{ParseOptions, Parser, DEFAULT_MAX_DEPTH};
pub use renderer::{render, FormattingOptions, NodeRef, Renderer};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};

/// Parse source text into a [`Program`]
pub fn parse(source: &str, options: ParseOptions) -> SyntaxResult<Program> {
    Parser::new(source, options).parse()
}

/// Parse source text and return every token the parser consumed, in order
pub fn tokenize(source: &str, options: ParseOptions) -> SyntaxResult<Vec<Token>> {
    let mut parser = Parser::new(source, options);
    parser.enable_token_registration();
    parser.parse()?;
    Ok(parser.into_tokens())
}
