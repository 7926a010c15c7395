//! State diagram detector
//!
//! Identifies state diagram syntax from input text.

use tracing::trace;

use crate::core::{header_confidence, Detector, DiagramKind};

use super::ast::PSEUDO_STATE;

/// Detector for state diagram syntax
pub struct StateDetector;

impl StateDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StateDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::State
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::State, input, |body| {
            let has_terminal = body.contains(PSEUDO_STATE);
            let has_state_keyword = body.lines().any(|line| line.trim_start().starts_with("state "));
            let has_transition = body.contains("-->");
            trace!(has_terminal, has_state_keyword, has_transition, "Scoring state body");

            if has_terminal && has_transition {
                0.8
            } else if has_state_keyword && has_transition {
                0.7
            } else if has_terminal {
                0.5
            } else {
                0.0
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["stateDiagram", "stateDiagram-v2", PSEUDO_STATE, "-->", "state "]
    }
}
