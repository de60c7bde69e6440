//! Shared source-location and error types for the JavaScript syntax tools.
//!
//! This crate provides the foundational types used by the scanner, parser
//! and renderer, including source positions, spans and syntax errors.
//!
//! # Overview
//!
//! - [`Position`] - A `(line, column, index)` point in the source text
//! - [`SourceLocation`] - Start/end span owned by every token and node
//! - [`SyntaxError`] - Scan or parse failure with message and position
//! - [`ErrorKind`] - Which stage produced a [`SyntaxError`]
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, Position, SyntaxError};
//!
//! let position = Position::new(3, 7, 42);
//! let error = SyntaxError::new(ErrorKind::ParseError, "Unexpected token", position);
//!
//! assert_eq!(error.position.line, 3);
//! assert_eq!(
//!     error.to_string(),
//!     "ParseError: Unexpected token (line 3, column 7)"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, SyntaxError, SyntaxResult};
pub use source::{Position, SourceLocation};
