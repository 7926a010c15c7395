//! Gantt chart detector

use tracing::trace;

use crate::core::{header_confidence, Detector, DiagramKind};

/// Detector for Gantt chart syntax
pub struct GanttDetector;

impl GanttDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GanttDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for GanttDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Gantt
    }

    fn confidence(&self, input: &str) -> f64 {
        header_confidence(DiagramKind::Gantt, input, |body| {
            let lower = body.to_lowercase();
            let has_format = lower.contains("dateformat");
            let has_section = body.lines().any(|line| line.trim_start().starts_with("section "));
            let has_after = lower.contains(", after ") || lower.contains(":after ");
            trace!(has_format, has_section, has_after, "Scoring gantt body");
            match (has_format, has_section || has_after) {
                (true, true) => 0.8,
                (true, false) => 0.6,
                (false, true) => 0.4,
                (false, false) => 0.0,
            }
        })
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["gantt", "dateFormat", "axisFormat", "section", "after"]
    }
}
