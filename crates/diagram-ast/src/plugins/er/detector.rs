//! ER diagram detector

use tracing::trace;

use crate::core::{header_confidence, Cardinality, Detector, DiagramKind};

/// Detector for entity-relationship syntax
pub struct ErDetector;

impl ErDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ErDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Er
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::Er, input, |body| {
            // Crow's-foot ends such as `o{` and `}|` are unique to ER
            let has_crows_foot = ["o{", "|{", "}o", "}|"].iter().any(|end| body.contains(end));
            let has_keys = [" PK", " FK", " UK"].iter().any(|key| body.contains(key));
            trace!(has_crows_foot, has_keys, "Scoring ER body");
            match (has_crows_foot, has_keys) {
                (true, true) => 0.8,
                (true, false) => 0.6,
                (false, true) => 0.3,
                (false, false) => 0.0,
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec!["erDiagram", "PK", "FK", "UK"];
        patterns.extend(Cardinality::ALL.iter().map(Cardinality::right_symbol));
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_er_diagrams() {
        let detector = ErDetector::new();
        assert!(detector.detect("erDiagram\n    A ||--o{ B : has"));
        assert!(detector.detect("CUSTOMER ||--o{ ORDER : places"));
        assert_eq!(detector.diagram_type(), "er");
    }

    #[test]
    fn test_rejects_other_dialects() {
        let detector = ErDetector::new();
        assert_eq!(detector.confidence("classDiagram\n    A <|-- B"), 0.0);
        assert!(!detector.detect("A --> B"));
    }
}
