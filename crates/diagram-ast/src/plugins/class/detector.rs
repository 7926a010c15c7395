//! Class diagram detector

use tracing::trace;

use crate::core::{header_confidence, Detector, DiagramKind, RelationType};

/// Detector for class diagram syntax
pub struct ClassDetector;

impl ClassDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ClassDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Class
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::Class, input, |body| {
            // Relation heads that no other dialect uses
            let has_relation = ["<|--", "--|>", "..|>", "*--", "o--"]
                .iter()
                .any(|symbol| body.contains(symbol));
            let has_class = body.lines().any(|line| line.trim_start().starts_with("class "));
            let has_members = body.contains("()") || body.contains("<<");
            trace!(has_relation, has_class, has_members, "Scoring class body");
            match (has_relation, has_class || has_members) {
                (true, true) => 0.8,
                (true, false) => 0.6,
                (false, true) => 0.4,
                (false, false) => 0.0,
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec!["classDiagram", "class"];
        patterns.extend(RelationType::ALL.iter().map(RelationType::symbol));
        patterns
    }
}
