//! Sequence diagram detector
//!
//! Identifies sequence diagram syntax from input text.

use tracing::trace;

use crate::core::{header_confidence, ArrowType, Detector, DiagramKind};

/// Detector for sequence diagram syntax
pub struct SequenceDetector;

impl SequenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SequenceDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::Sequence, input, |body| {
            let lower = body.to_lowercase();
            // `->>` and `-)` never appear in other dialects
            let has_sequence_arrows = ["->>", "-)"].iter().any(|arrow| body.contains(arrow));
            let has_participant = lower.contains("participant ") || lower.contains("actor ");
            trace!(has_sequence_arrows, has_participant, "Scoring sequence body");
            match (has_sequence_arrows, has_participant) {
                (true, true) => 0.8,
                (true, false) => 0.6,
                (false, true) => 0.3,
                (false, false) => 0.0,
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec!["sequenceDiagram", "participant", "actor"];
        patterns.extend(ArrowType::ALL.iter().map(ArrowType::symbol));
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sequence_diagram_keyword() {
        let detector = SequenceDetector::new();
        assert!(detector.detect("sequenceDiagram\n    Alice->>Bob: Hello"));
        assert!(detector.detect("sequencediagram\n    Alice->>Bob: Hello"));
        assert!(detector.is_header("SEQUENCEDIAGRAM"));
    }

    #[test]
    fn test_confidence_scoring() {
        let detector = SequenceDetector::new();
        assert_eq!(detector.confidence("sequenceDiagram\n    A->>B: Hi"), 1.0);
        assert!(detector.confidence("participant Alice\nAlice->>Bob: Hi") >= 0.8);
        assert!(detector.confidence("Alice->>Bob: Hello") >= 0.6);
        assert_eq!(detector.confidence("graph TD; A-->B"), 0.0);
    }

    #[test]
    fn test_rejects_other_headers() {
        let detector = SequenceDetector::new();
        assert!(!detector.detect("flowchart LR; A-->B"));
        assert!(!detector.detect("stateDiagram-v2\n    A --> B"));
        assert_eq!(detector.diagram_type(), "sequence");
    }
}
