//! Flowchart AST

use serde::{Deserialize, Serialize};

use crate::core::{Content, Direction, EdgeType, NodeShape, Outline, Outlined, Span};

/// A parsed flowchart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartDiagram {
    pub direction: Direction,
    pub body: Vec<FlowchartStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl FlowchartDiagram {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_statement(mut self, statement: impl Into<FlowchartStatement>) -> Self {
        self.body.push(statement.into());
        self
    }

    /// Every edge, including those nested in subgraphs, in source order
    pub fn edges(&self) -> Vec<&Edge> {
        fn walk<'a>(body: &'a [FlowchartStatement], out: &mut Vec<&'a Edge>) {
            for statement in body {
                match statement {
                    FlowchartStatement::Edge(edge) => out.push(edge),
                    FlowchartStatement::Subgraph(subgraph) => walk(&subgraph.body, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.body, &mut out);
        out
    }
}

/// One flowchart statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowchartStatement {
    Node(Node),
    Edge(Edge),
    Subgraph(Subgraph),
    /// `classDef name styles`
    ClassDef(ClassDef),
    /// `class a,b name`
    ClassAssign(ClassAssign),
    /// `style id styles`
    Style(Style),
    /// `linkStyle 0,1 styles`
    LinkStyle(LinkStyle),
}

impl FlowchartStatement {
    pub fn span(&self) -> Option<Span> {
        match self {
            FlowchartStatement::Node(n) => n.span,
            FlowchartStatement::Edge(e) => e.span,
            FlowchartStatement::Subgraph(s) => s.span,
            FlowchartStatement::ClassDef(c) => c.span,
            FlowchartStatement::ClassAssign(c) => c.span,
            FlowchartStatement::Style(s) => s.span,
            FlowchartStatement::LinkStyle(l) => l.span,
        }
    }

    pub(crate) fn set_span(&mut self, span: Span) {
        let slot = match self {
            FlowchartStatement::Node(n) => &mut n.span,
            FlowchartStatement::Edge(e) => &mut e.span,
            FlowchartStatement::Subgraph(s) => &mut s.span,
            FlowchartStatement::ClassDef(c) => &mut c.span,
            FlowchartStatement::ClassAssign(c) => &mut c.span,
            FlowchartStatement::Style(s) => &mut s.span,
            FlowchartStatement::LinkStyle(l) => &mut l.span,
        };
        *slot = Some(span);
    }
}

impl Outlined for FlowchartStatement {
    fn outline(&self) -> Outline {
        match self {
            FlowchartStatement::Node(_) => Outline::leaf("node"),
            FlowchartStatement::Edge(_) => Outline::leaf("edge"),
            FlowchartStatement::Subgraph(s) => Outline::node("subgraph", Outline::of_all(&s.body)),
            FlowchartStatement::ClassDef(_) => Outline::leaf("class_def"),
            FlowchartStatement::ClassAssign(_) => Outline::leaf("class_assign"),
            FlowchartStatement::Style(_) => Outline::leaf("style"),
            FlowchartStatement::LinkStyle(_) => Outline::leaf("link_style"),
        }
    }
}

/// A node declaration
///
/// A bare id such as `A` is a rectangle whose label is its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub shape: NodeShape,
    pub label: Content,
    /// Class applied with `:::name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Node {
    pub fn new(id: impl Into<String>, shape: NodeShape, label: impl Into<Content>) -> Self {
        Self {
            id: id.into(),
            shape,
            label: label.into(),
            class: None,
            span: None,
        }
    }

    /// A node written as its bare id
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), NodeShape::Rectangle, Content::text(id))
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Returns true when the node can be written as its id alone
    pub fn is_bare(&self) -> bool {
        self.shape == NodeShape::Rectangle && self.label == Content::text(self.id.clone())
    }
}

/// An edge between two node ids
///
/// `from` and `to` need not refer to declared nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub edge_type: EdgeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Content>,
    /// Ranks spanned, present when longer than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type,
            label: None,
            length: None,
            span: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<Content>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = (length > 1).then_some(length);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgraph {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub body: Vec<FlowchartStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Subgraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            direction: None,
            body: Vec::new(),
            span: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_statement(mut self, statement: impl Into<FlowchartStatement>) -> Self {
        self.body.push(statement.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    pub name: String,
    pub styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAssign {
    pub ids: Vec<String>,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: String,
    pub styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `linkStyle` directive; empty `indices` means `default`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    pub indices: Vec<usize>,
    pub styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

macro_rules! statement_from {
    ($($variant:ident),*) => {
        $(impl From<$variant> for FlowchartStatement {
            fn from(value: $variant) -> Self {
                FlowchartStatement::$variant(value)
            }
        })*
    };
}

statement_from!(Node, Edge, Subgraph, ClassDef, ClassAssign, Style, LinkStyle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_node() {
        let node = Node::bare("A");
        assert!(node.is_bare());
        assert!(!Node::new("A", NodeShape::Circle, "A").is_bare());
        assert!(!Node::new("A", NodeShape::Rectangle, "Start").is_bare());
    }

    #[test]
    fn test_edges_walks_subgraphs() {
        let diagram = FlowchartDiagram::new(Direction::LeftRight)
            .with_statement(Edge::new("a", "b", EdgeType::Arrow))
            .with_statement(
                Subgraph::new("s").with_statement(Edge::new("b", "c", EdgeType::DottedLine)),
            );
        let edges = diagram.edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].edge_type, EdgeType::DottedLine);
    }

    #[test]
    fn test_edge_length_is_only_kept_above_one() {
        assert_eq!(Edge::new("a", "b", EdgeType::Arrow).with_length(1).length, None);
        assert_eq!(Edge::new("a", "b", EdgeType::Arrow).with_length(3).length, Some(3));
    }
}
