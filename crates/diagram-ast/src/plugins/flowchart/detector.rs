//! Flowchart detector implementation
//!
//! Detects flowchart diagram syntax patterns.

use tracing::trace;

use crate::core::{header_confidence, Detector, DiagramKind};

/// Flowchart detector implementation
pub struct FlowchartDetector;

// Connectors that only occur in flowcharts
const CONNECTORS: [&str; 9] = [
    "-.->", "==>", "===", "-->", "---", "-.-", "--o", "--x", "~~~",
];

impl FlowchartDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlowchartDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FlowchartDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Flowchart
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::Flowchart, input, |body| {
            let connectors = CONNECTORS.iter().filter(|c| body.contains(*c)).count();
            let has_subgraph = body.contains("subgraph");
            trace!(connectors, has_subgraph, "Scoring flowchart body");
            match (connectors, has_subgraph) {
                (0, false) => 0.0,
                (0, true) => 0.4,
                (_, false) => 0.6,
                (_, true) => 0.8,
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["graph", "flowchart", "-->", "---"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_headers() {
        let detector = FlowchartDetector::new();
        assert!(detector.detect("graph TD\n  A --> B"));
        assert!(detector.detect("flowchart LR"));
        assert!(detector.is_header("FLOWCHART lr"));
        assert_eq!(detector.diagram_type(), "flowchart");
    }

    #[test]
    fn test_scores_headerless_input() {
        let detector = FlowchartDetector::new();
        assert!(detector.detect("A --> B"));
        assert_eq!(detector.confidence("random text"), 0.0);
        assert_eq!(detector.confidence("sequenceDiagram\n  A-->>B: x"), 0.0);
    }
}
