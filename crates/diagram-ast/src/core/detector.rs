//! Core detector trait for diagram type identification

use super::{header_keyword, lex, DiagramKind};

/// Core trait for dialect detectors
///
/// A detector answers two questions: is a given line the header of its
/// dialect, and how strongly does a whole document look like its dialect.
/// The dispatcher splits documents on headers; confidence is only used to
/// guess the dialect of header-less text.
///
/// # Example
/// ```
/// use diagram_ast::core::Detector;
/// use diagram_ast::plugins::flowchart::FlowchartDetector;
///
/// let detector = FlowchartDetector::new();
/// assert!(detector.detect("graph TD\n    A --> B"));
/// ```
pub trait Detector: Send + Sync {
    /// Dialect recognised by this detector
    fn kind(&self) -> DiagramKind;

    /// Confidence (0.0 to 1.0) that `input` is written in this dialect
    fn confidence(&self, input: &str) -> f64;

    /// Key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;

    /// Detect if the input matches this dialect
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    /// Returns true if `line` opens a block of this dialect
    fn is_header(&self, line: &str) -> bool {
        header_keyword(line) == Some(self.kind())
    }

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str {
        self.kind().name()
    }
}

/// Confidence shared by all detectors: 1.0 when the first line is our
/// header, otherwise a score from body patterns
pub fn header_confidence<F>(kind: DiagramKind, input: &str, body_score: F) -> f64
where
    F: FnOnce(&str) -> f64,
{
    match lex(input).first() {
        Some(line) if header_keyword(&line.text) == Some(kind) => 1.0,
        Some(line) if header_keyword(&line.text).is_some() => 0.0,
        Some(_) => body_score(input).clamp(0.0, 0.9),
        None => 0.0,
    }
}
