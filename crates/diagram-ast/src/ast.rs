//! Program root and the diagram union
//!
//! A [`Program`] is what the dispatcher returns: the diagrams of one document
//! in source order. Each [`Diagram`] serializes with a `type` tag naming its
//! dialect.

use serde::{Deserialize, Serialize};

use crate::core::{DiagramKind, Outline, Outlined, Span};
use crate::plugins::class::ClassDiagram;
use crate::plugins::er::ErDiagram;
use crate::plugins::flowchart::FlowchartDiagram;
use crate::plugins::gantt::GanttDiagram;
use crate::plugins::sequence::SequenceDiagram;
use crate::plugins::state::StateDiagram;

/// Root of a parsed document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Diagram>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagram(mut self, diagram: impl Into<Diagram>) -> Self {
        self.body.push(diagram.into());
        self
    }

    /// Dialects of the diagrams, in order
    pub fn kinds(&self) -> Vec<DiagramKind> {
        self.body.iter().map(Diagram::kind).collect()
    }
}

/// One diagram block of any dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Diagram {
    Flowchart(FlowchartDiagram),
    Sequence(SequenceDiagram),
    Class(ClassDiagram),
    Er(ErDiagram),
    State(StateDiagram),
    Gantt(GanttDiagram),
}

impl Diagram {
    pub fn kind(&self) -> DiagramKind {
        match self {
            Diagram::Flowchart(_) => DiagramKind::Flowchart,
            Diagram::Sequence(_) => DiagramKind::Sequence,
            Diagram::Class(_) => DiagramKind::Class,
            Diagram::Er(_) => DiagramKind::Er,
            Diagram::State(_) => DiagramKind::State,
            Diagram::Gantt(_) => DiagramKind::Gantt,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Diagram::Flowchart(d) => d.span,
            Diagram::Sequence(d) => d.span,
            Diagram::Class(d) => d.span,
            Diagram::Er(d) => d.span,
            Diagram::State(d) => d.span,
            Diagram::Gantt(d) => d.span,
        }
    }

    /// Number of top-level statements (sections for Gantt)
    pub fn statement_count(&self) -> usize {
        match self {
            Diagram::Flowchart(d) => d.body.len(),
            Diagram::Sequence(d) => d.statements.len(),
            Diagram::Class(d) => d.statements.len(),
            Diagram::Er(d) => d.statements.len(),
            Diagram::State(d) => d.statements.len(),
            Diagram::Gantt(d) => d.sections.len(),
        }
    }
}

impl Outlined for Diagram {
    fn outline(&self) -> Outline {
        let children = match self {
            Diagram::Flowchart(d) => Outline::of_all(&d.body),
            Diagram::Sequence(d) => Outline::of_all(&d.statements),
            Diagram::Class(d) => Outline::of_all(&d.statements),
            Diagram::Er(d) => Outline::of_all(&d.statements),
            Diagram::State(d) => Outline::of_all(&d.statements),
            Diagram::Gantt(d) => Outline::of_all(&d.sections),
        };
        Outline::node(self.kind().name(), children)
    }
}

impl From<FlowchartDiagram> for Diagram {
    fn from(value: FlowchartDiagram) -> Self {
        Diagram::Flowchart(value)
    }
}

impl From<SequenceDiagram> for Diagram {
    fn from(value: SequenceDiagram) -> Self {
        Diagram::Sequence(value)
    }
}

impl From<ClassDiagram> for Diagram {
    fn from(value: ClassDiagram) -> Self {
        Diagram::Class(value)
    }
}

impl From<ErDiagram> for Diagram {
    fn from(value: ErDiagram) -> Self {
        Diagram::Er(value)
    }
}

impl From<StateDiagram> for Diagram {
    fn from(value: StateDiagram) -> Self {
        Diagram::State(value)
    }
}

impl From<GanttDiagram> for Diagram {
    fn from(value: GanttDiagram) -> Self {
        Diagram::Gantt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag() {
        let program = Program::new()
            .with_diagram(ErDiagram::new())
            .with_diagram(GanttDiagram::new());
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["body"][0]["type"], "er");
        assert_eq!(json["body"][1]["type"], "gantt");
        assert_eq!(program.kinds(), vec![DiagramKind::Er, DiagramKind::Gantt]);
    }

    #[test]
    fn test_outline_is_named_by_kind() {
        let diagram = Diagram::from(StateDiagram::new());
        assert_eq!(diagram.outline(), Outline::leaf("state"));
        assert_eq!(diagram.statement_count(), 0);
    }
}
