//! Core error types for diagram processing
//!
//! Only a handful of conditions abort a parse. Everything else is a skipped
//! line, which is logged and reported through diagnostics instead.

use thiserror::Error;

use super::DiagramKind;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Fatal errors raised while parsing diagram markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    /// No block in the input starts with a recognised diagram keyword
    #[error("Unknown diagram type: no recognised diagram keyword found (first line: {found:?})")]
    DiagramType { found: String },

    /// A nested construct was left open, or closed when nothing was open
    #[error("Unbalanced {construct} in {dialect} diagram at line {line}: {reason}")]
    UnbalancedBlock {
        dialect: DiagramKind,
        construct: String,
        line: usize,
        reason: String,
    },

    /// Nesting exceeded the configured depth limit
    #[error("Nesting too deep in {dialect} diagram at line {line}: limit is {limit}")]
    NestingTooDeep {
        dialect: DiagramKind,
        limit: usize,
        line: usize,
    },

    #[error("Parse error in {dialect} diagram: {message} at line {line}, column {column}")]
    Parse {
        dialect: DiagramKind,
        message: String,
        line: usize,
        column: usize,
    },
}

impl DiagramError {
    /// Create a new diagram type error
    pub fn diagram_type(found: impl Into<String>) -> Self {
        Self::DiagramType {
            found: found.into(),
        }
    }

    /// A construct that was still open when the input ran out
    pub fn unclosed(dialect: DiagramKind, construct: impl Into<String>, line: usize) -> Self {
        Self::UnbalancedBlock {
            dialect,
            construct: construct.into(),
            line,
            reason: "block is never closed".to_string(),
        }
    }

    /// A terminator that has no matching open construct
    pub fn unexpected_close(dialect: DiagramKind, terminator: &str, line: usize) -> Self {
        Self::UnbalancedBlock {
            dialect,
            construct: "block".to_string(),
            line,
            reason: format!("`{}` without an open block", terminator),
        }
    }

    /// Create a new nesting depth error
    pub fn too_deep(dialect: DiagramKind, limit: usize, line: usize) -> Self {
        Self::NestingTooDeep {
            dialect,
            limit,
            line,
        }
    }

    /// Create a new parse error
    pub fn parse_error(
        dialect: DiagramKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            dialect,
            message: message.into(),
            line,
            column,
        }
    }

    /// Dialect the error was raised in, when known
    pub fn dialect(&self) -> Option<DiagramKind> {
        match self {
            Self::DiagramType { .. } => None,
            Self::UnbalancedBlock { dialect, .. }
            | Self::NestingTooDeep { dialect, .. }
            | Self::Parse { dialect, .. } => Some(*dialect),
        }
    }

    /// Offending source line, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DiagramType { .. } => None,
            Self::UnbalancedBlock { line, .. }
            | Self::NestingTooDeep { line, .. }
            | Self::Parse { line, .. } => Some(*line),
        }
    }
}
