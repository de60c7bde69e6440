//! Source position and span types.
//!
//! Positions are tracked in code points: `index` counts characters from the
//! start of the source, `line` starts at 1 and `column` starts at 0.

use serde::Serialize;

/// A point in the source text.
///
/// # Examples
///
/// ```
/// use core_types::Position;
///
/// let pos = Position::new(10, 5, 150);
///
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.column, 5);
/// assert_eq!(pos.index, 150);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number within the line, starting at 0
    pub column: u32,
    /// Code point offset from the start of the source
    pub index: usize,
}

impl Position {
    /// Create a position from its parts.
    pub const fn new(line: u32, column: u32, index: usize) -> Self {
        Self {
            line,
            column,
            index,
        }
    }

    /// The position of the first character of a source.
    pub const fn origin() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::origin()
    }
}

/// A start/end span in the source text.
///
/// Every token and every completed tree node owns exactly one location.
/// `end` is exclusive: it is the position right after the last character.
///
/// # Examples
///
/// ```
/// use core_types::{Position, SourceLocation};
///
/// let loc = SourceLocation::new(Position::new(1, 0, 0), Position::new(1, 3, 3));
/// assert_eq!(loc.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Position of the first character
    pub start: Position,
    /// Position right after the last character
    pub end: Position,
}

impl SourceLocation {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Number of code points covered by the span.
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the span starts and ends on different lines.
    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}
