//! Syntax error types.
//!
//! Scanning and parsing share one error type. The [`ErrorKind`] tells the
//! stages apart so callers can report lexical and grammatical failures
//! differently.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::Position;

/// The stage that produced a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed lexeme: unterminated string, template, comment or regex,
    /// invalid numeric literal or escape, mismatched or unclosed bracket
    ScanError,
    /// Grammar violation after a committed prefix, invalid assignment target,
    /// misplaced line terminator and similar
    ParseError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ScanError => write!(f, "ScanError"),
            ErrorKind::ParseError => write!(f, "ParseError"),
        }
    }
}

/// A scan or parse failure.
///
/// Syntax errors are never recovered from: the first one aborts the parse.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, Position, SyntaxError};
///
/// let error = SyntaxError::new(ErrorKind::ScanError, "Unterminated string", Position::origin());
///
/// assert_eq!(error.kind, ErrorKind::ScanError);
/// assert!(error.is_scan_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}: {message} (line {line}, column {column})", line = .position.line, column = .position.column)]
pub struct SyntaxError {
    /// Which stage failed
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Source position where the error occurred
    pub position: Position,
}

impl SyntaxError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    /// Whether the scanner raised this error.
    pub fn is_scan_error(&self) -> bool {
        self.kind == ErrorKind::ScanError
    }

    /// Whether the parser raised this error.
    pub fn is_parse_error(&self) -> bool {
        self.kind == ErrorKind::ParseError
    }
}

/// Result alias used by every fallible scanner and parser operation.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
