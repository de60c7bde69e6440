//! Scanner and parser error helpers

use core_types::{ErrorKind, Position, SyntaxError};

/// Create a scan error at a given position
pub fn scan_error(message: impl Into<String>, position: Position) -> SyntaxError {
    SyntaxError::new(ErrorKind::ScanError, message, position)
}

/// Create a parse error at a given position
pub fn parse_error(message: impl Into<String>, position: Position) -> SyntaxError {
    SyntaxError::new(ErrorKind::ParseError, message, position)
}

/// Create an unexpected token error
pub fn unexpected_token(got: &str, position: Position) -> SyntaxError {
    parse_error(format!("Unexpected {}", got), position)
}

/// Create an unexpected end of input error
pub fn unexpected_end(position: Position) -> SyntaxError {
    parse_error("Unexpected end of input", position)
}
