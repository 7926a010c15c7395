//! Core parser trait and the shared line-driving machinery
//!
//! Each grammar walks a [`LineCursor`] over lexed lines and classifies every
//! line into a [`LineOutcome`]. Matched lines become AST nodes, skipped lines
//! are logged and recorded, and fatal outcomes abort the parse.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::{lex, DiagramError, DiagramKind, Direction, ParseConfig, Result, SourceLine};

/// Core trait for dialect grammars
///
/// # Example
/// ```
/// use diagram_ast::core::Parser;
/// use diagram_ast::plugins::flowchart::FlowchartParser;
///
/// let parser = FlowchartParser::new();
/// let diagram = parser.parse("flowchart LR\n    A --> B").unwrap();
/// assert_eq!(diagram.body.len(), 1);
/// ```
pub trait Parser: Send + Sync {
    /// The diagram produced by this grammar
    type Output;

    /// Parse a block of lexed lines whose first line is the diagram header
    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<Self::Output>;

    /// Dialect handled by this grammar
    fn kind(&self) -> DiagramKind;

    /// Parse a complete document containing exactly one diagram of this dialect
    fn parse(&self, input: &str) -> Result<Self::Output> {
        let lines = lex(input);
        let mut ctx = ParseContext::new(ParseConfig::default());
        ctx.set_dialect(self.kind());
        self.parse_lines(&lines, &mut ctx)
    }

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Check if the input starts with this dialect's header keyword
    fn can_parse(&self, input: &str) -> bool {
        lex(input)
            .first()
            .map(|line| header_keyword(&line.text) == Some(self.kind()))
            .unwrap_or(false)
    }
}

/// Dialect named by a header line, if `line` is one
///
/// A header is a dialect keyword on its own, optionally followed by a
/// direction (flowchart only) and `;`-separated statements. Anything else
/// starting with a keyword, such as a node called `gantt`, is not a header.
pub fn header_keyword(line: &str) -> Option<DiagramKind> {
    let head = line.split(';').next().unwrap_or_default();
    let mut words = head.split_whitespace();
    let kind = DiagramKind::from_keyword(words.next()?)?;
    match (words.next(), words.next()) {
        (None, _) => Some(kind),
        (Some(direction), None)
            if kind == DiagramKind::Flowchart && direction.parse::<Direction>().is_ok() =>
        {
            Some(kind)
        }
        _ => None,
    }
}

/// Result of classifying one source line
#[derive(Debug)]
pub enum LineOutcome<T> {
    /// The line produced an AST node (or updated one)
    Matched(T),
    /// The line matched no production and was ignored
    Skipped(&'static str),
    /// The line makes the whole parse fail
    Fatal(DiagramError),
}

impl<T> LineOutcome<T> {
    /// Fold the outcome into the context: skips are recorded, fatals returned
    pub fn resolve(self, ctx: &mut ParseContext, line: &SourceLine) -> Result<Option<T>> {
        match self {
            LineOutcome::Matched(value) => Ok(Some(value)),
            LineOutcome::Skipped(reason) => {
                ctx.skip(line, reason);
                Ok(None)
            }
            LineOutcome::Fatal(error) => Err(error),
        }
    }
}

impl<T> From<Option<T>> for LineOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => LineOutcome::Matched(value),
            None => LineOutcome::Skipped("no production matched"),
        }
    }
}

/// A line that was ignored during parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// Dialect being parsed, or `None` for lines outside any diagram
    pub dialect: Option<DiagramKind>,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub reason: String,
}

/// Per-parse state shared by all grammars
#[derive(Debug, Default)]
pub struct ParseContext {
    config: ParseConfig,
    dialect: Option<DiagramKind>,
    skipped: Vec<SkippedLine>,
}

impl ParseContext {
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            dialect: None,
            skipped: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn set_dialect(&mut self, dialect: DiagramKind) {
        self.dialect = Some(dialect);
    }

    /// Dialect currently being parsed (flowchart if none was set)
    pub fn dialect(&self) -> DiagramKind {
        self.dialect.unwrap_or(DiagramKind::Flowchart)
    }

    /// Record a skipped line
    pub fn skip(&mut self, line: &SourceLine, reason: &str) {
        warn!(
            dialect = ?self.dialect,
            line = line.line,
            text = %line.text,
            reason,
            "Skipping unrecognised line"
        );
        self.skipped.push(SkippedLine {
            dialect: self.dialect,
            line: line.line,
            column: line.column,
            text: line.text.clone(),
            reason: reason.to_string(),
        });
    }

    /// Fail if opening one more level at `depth` would exceed the limit
    pub fn check_depth(&self, depth: usize, line: &SourceLine) -> Result<()> {
        if depth > self.config.max_nesting_depth {
            return Err(DiagramError::too_deep(
                self.dialect(),
                self.config.max_nesting_depth,
                line.line,
            ));
        }
        Ok(())
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedLine> {
        self.skipped
    }
}

/// Forward-only cursor over lexed lines
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [SourceLine],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [SourceLine]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a SourceLine> {
        self.lines.get(self.pos)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a SourceLine> {
        let line = self.lines.get(self.pos)?;
        trace!(line = line.line, text = %line.text, "Reading line");
        self.pos += 1;
        Some(line)
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Line number of the most recently consumed line
    pub fn last_line(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(|line| line.line)
            .unwrap_or(0)
    }
}

/// Consume the header line, failing if it does not name `kind`
pub fn expect_header<'a>(
    cursor: &mut LineCursor<'a>,
    kind: DiagramKind,
) -> Result<&'a SourceLine> {
    let Some(line) = cursor.next() else {
        return Err(DiagramError::parse_error(kind, "missing diagram header", 1, 1));
    };
    if header_keyword(&line.text) != Some(kind) {
        return Err(DiagramError::parse_error(
            kind,
            format!("expected `{}` header, found {:?}", kind.canonical_keyword(), line.text),
            line.line,
            line.column,
        ));
    }
    Ok(line)
}

/// Record anything after `;` on a header line as skipped
///
/// Only flowcharts read statements from their header line.
pub fn skip_header_tail(ctx: &mut ParseContext, header: &SourceLine) {
    let Some((head, tail)) = header.text.split_once(';') else {
        return;
    };
    let rest = tail.trim_start();
    if rest.trim_end().is_empty() {
        return;
    }
    let offset = head.chars().count() + 1 + (tail.len() - rest.len());
    let tail_line = SourceLine::new(rest.trim_end(), header.line, header.column + offset);
    ctx.skip(&tail_line, "statements after the header are not read in this dialect");
}
