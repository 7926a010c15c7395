//! Flowchart code generator

use super::ast::{Edge, FlowchartDiagram, FlowchartStatement, Node, Subgraph};
use crate::core::{
    is_identifier, quote, quote_if_needed, CodeWriter, Content, DiagramKind, GenerateConfig,
    Generator, NodeShape,
};

/// Emits flowchart source text
#[derive(Debug, Clone, Default)]
pub struct FlowchartGenerator {
    config: GenerateConfig,
}

impl FlowchartGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn write_body(&self, out: &mut CodeWriter, body: &[FlowchartStatement]) {
        for statement in body {
            self.write_statement(out, statement);
        }
    }

    fn write_statement(&self, out: &mut CodeWriter, statement: &FlowchartStatement) {
        match statement {
            FlowchartStatement::Node(node) => out.line(node_text(node)),
            FlowchartStatement::Edge(edge) => out.line(edge_text(edge)),
            FlowchartStatement::Subgraph(subgraph) => self.write_subgraph(out, subgraph),
            FlowchartStatement::ClassDef(def) => {
                out.line(format!("classDef {} {}", def.name, def.styles.join(",")).trim_end())
            }
            FlowchartStatement::ClassAssign(assign) => {
                out.line(format!("class {} {}", assign.ids.join(","), assign.class))
            }
            FlowchartStatement::Style(style) => {
                out.line(format!("style {} {}", style.id, style.styles.join(",")).trim_end())
            }
            FlowchartStatement::LinkStyle(link) => {
                let target = if link.indices.is_empty() {
                    "default".to_string()
                } else {
                    link.indices
                        .iter()
                        .map(usize::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                };
                out.line(format!("linkStyle {} {}", target, link.styles.join(",")).trim_end())
            }
        }
    }

    fn write_subgraph(&self, out: &mut CodeWriter, subgraph: &Subgraph) {
        let title = match (&subgraph.label, subgraph.id.as_str()) {
            (_, "") => String::new(),
            (Some(label), id) => format!(" {}[{}]", id, quote(label)),
            (None, id) if is_identifier(id) => format!(" {}", id),
            (None, id) => format!(" {}", quote(id)),
        };
        out.line(format!("subgraph{}", title));
        out.nested(|out| {
            if let Some(direction) = subgraph.direction {
                out.line(format!("direction {}", direction));
            }
            self.write_body(out, &subgraph.body);
        });
        out.line("end");
    }
}

impl Generator for FlowchartGenerator {
    type Input = FlowchartDiagram;

    fn generate(&self, diagram: &FlowchartDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(format!(
            "{} {}",
            DiagramKind::Flowchart.canonical_keyword(),
            diagram.direction
        ));
        out.nested(|out| self.write_body(out, &diagram.body));
        out.finish()
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

/// Label text in delimiter position; slanted shapes also quote slashes
fn shape_label(shape: NodeShape, label: &Content) -> String {
    let source = label.to_source();
    let slanted = matches!(
        shape,
        NodeShape::Parallelogram
            | NodeShape::ParallelogramAlt
            | NodeShape::Trapezoid
            | NodeShape::TrapezoidAlt
    );
    if slanted && source.contains(['/', '\\']) {
        quote(&source)
    } else {
        quote_if_needed(&source)
    }
}

fn node_text(node: &Node) -> String {
    let mut text = if node.is_bare() {
        node.id.clone()
    } else {
        let (open, close) = node.shape.delimiters();
        format!("{}{}{}{}", node.id, open, shape_label(node.shape, &node.label), close)
    };
    if let Some(class) = &node.class {
        text.push_str(":::");
        text.push_str(class);
    }
    text
}

fn edge_text(edge: &Edge) -> String {
    let operator = edge.edge_type.operator(edge.length.unwrap_or(1));
    match &edge.label {
        Some(label) => format!(
            "{} {}|{}| {}",
            edge.from,
            operator,
            quote_if_needed(&label.to_source()),
            edge.to
        ),
        None => format!("{} {} {}", edge.from, operator, edge.to),
    }
}
