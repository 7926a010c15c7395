//! Source locations attached to AST nodes
//!
//! Lines and columns are 1-based and count characters, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single location in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A start/end range in the source text
///
/// Spans exist for diagnostics only. Structural comparisons between trees
/// never look at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        let start = if (other.start.line, other.start.column) < (self.start.line, self.start.column)
        {
            other.start
        } else {
            self.start
        };
        let end = if (other.end.line, other.end.column) > (self.end.line, self.end.column) {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_spans() {
        let a = Span::new(Position::new(2, 5), Position::new(2, 10));
        let b = Span::new(Position::new(4, 1), Position::new(4, 3));
        let merged = a.merge(b);
        assert_eq!(merged.start, Position::new(2, 5));
        assert_eq!(merged.end, Position::new(4, 3));
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn test_span_display() {
        let span = Span::new(Position::new(1, 1), Position::new(1, 8));
        assert_eq!(span.to_string(), "1:1-1:8");
    }
}
