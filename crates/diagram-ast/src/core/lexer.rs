//! Line lexer
//!
//! Every grammar in this crate is line oriented. The lexer turns raw input
//! into logical lines: trimmed, non-empty, and not a `%%` comment, each with
//! the line number and column it came from.

use super::{Position, Span};

/// One logical source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line with surrounding whitespace removed
    pub text: String,
    /// 1-based line number in the original input
    pub line: usize,
    /// 1-based column of the first non-whitespace character
    pub column: usize,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }

    /// Span covering the trimmed text of this line
    pub fn span(&self) -> Span {
        let width = self.text.chars().count();
        Span::new(
            Position::new(self.line, self.column),
            Position::new(self.line, self.column + width.saturating_sub(1)),
        )
    }

    /// Position of the first character
    pub fn start(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Splits input into [`SourceLine`]s
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Produce every logical line, in order
    pub fn lines(&self) -> Vec<SourceLine> {
        let input = self.input.strip_prefix('\u{feff}').unwrap_or(self.input);
        input
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let trimmed = raw.trim();
                if trimmed.is_empty() || is_comment(trimmed) {
                    return None;
                }
                let leading = raw.len() - raw.trim_start().len();
                let column = raw[..leading].chars().count() + 1;
                Some(SourceLine::new(trimmed, idx + 1, column))
            })
            .collect()
    }
}

/// Returns true for `%%` comment lines, including `%%{init}%%` directives
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("%%")
}

/// Lex `input` into logical lines
pub fn lex(input: &str) -> Vec<SourceLine> {
    Lexer::new(input).lines()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let lines = lex("flowchart LR\n\n  %% a comment\n  A --> B\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "flowchart LR");
        assert_eq!(lines[1].text, "A --> B");
    }

    #[test]
    fn test_tracks_line_and_column() {
        let lines = lex("gantt\n\n    title Plan");
        assert_eq!(lines[1].line, 3);
        assert_eq!(lines[1].column, 5);
        let span = lines[1].span();
        assert_eq!(span.start, Position::new(3, 5));
        assert_eq!(span.end, Position::new(3, 14));
    }

    #[test]
    fn test_columns_count_characters() {
        let lines = lex("\u{3000}ノード");
        assert_eq!(lines[0].column, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("   \n\t\n").is_empty());
    }
}
