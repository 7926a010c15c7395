//! Core type definitions shared across dialects
//!
//! This module contains the dialect discriminator, layout direction, and the
//! flowchart node shape and edge type enumerations. The serialized names of
//! these enums are depended on by layout and render code outside this crate,
//! so they must stay stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six supported diagram dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    Er,
    State,
    Gantt,
}

impl DiagramKind {
    /// All dialects, in dispatch order
    pub const ALL: [DiagramKind; 6] = [
        DiagramKind::Flowchart,
        DiagramKind::Sequence,
        DiagramKind::Class,
        DiagramKind::Er,
        DiagramKind::State,
        DiagramKind::Gantt,
    ];

    /// Header keywords accepted for this dialect (compared case-insensitively)
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DiagramKind::Flowchart => &["flowchart", "graph"],
            DiagramKind::Sequence => &["sequenceDiagram"],
            DiagramKind::Class => &["classDiagram", "classDiagram-v2"],
            DiagramKind::Er => &["erDiagram"],
            DiagramKind::State => &["stateDiagram", "stateDiagram-v2"],
            DiagramKind::Gantt => &["gantt"],
        }
    }

    /// Keyword the generators write in the header line
    pub fn canonical_keyword(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Sequence => "sequenceDiagram",
            DiagramKind::Class => "classDiagram",
            DiagramKind::Er => "erDiagram",
            DiagramKind::State => "stateDiagram-v2",
            DiagramKind::Gantt => "gantt",
        }
    }

    /// Find the dialect whose keyword equals `word`
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            kind.keywords()
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(word))
        })
    }

    /// Short lowercase name, matching the serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "class",
            DiagramKind::Er => "er",
            DiagramKind::State => "state",
            DiagramKind::Gantt => "gantt",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    #[serde(rename = "TB", alias = "TD")]
    TopDown,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomUp,
}

impl Direction {
    /// Returns true if this is a vertical layout (TD or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopDown | Direction::BottomUp)
    }

    /// Returns true if this is a horizontal layout (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parse direction from mermaid syntax (TD, TB, LR, RL, BT)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TB"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

/// Node shapes matching Mermaid.js syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A(label)`
    Rounded,
    /// Stadium: `A([label])`
    Stadium,
    /// Subroutine: `A[[label]]`
    Subroutine,
    /// Cylinder (database): `A[(label)]`
    Cylinder,
    /// Circle: `A((label))`
    Circle,
    /// Asymmetric (flag): `A>label]`
    Asymmetric,
    /// Rhombus (decision): `A{label}`
    Rhombus,
    /// Hexagon: `A{{label}}`
    Hexagon,
    /// Parallelogram: `A[/label/]`
    Parallelogram,
    /// Parallelogram leaning left: `A[\label\]`
    ParallelogramAlt,
    /// Trapezoid: `A[/label\]`
    Trapezoid,
    /// Inverted trapezoid: `A[\label/]`
    TrapezoidAlt,
    /// Double circle: `A(((label)))`
    DoubleCircle,
}

impl NodeShape {
    /// Every shape, in declaration order
    pub const ALL: [NodeShape; 14] = [
        NodeShape::Rectangle,
        NodeShape::Rounded,
        NodeShape::Stadium,
        NodeShape::Subroutine,
        NodeShape::Cylinder,
        NodeShape::Circle,
        NodeShape::Asymmetric,
        NodeShape::Rhombus,
        NodeShape::Hexagon,
        NodeShape::Parallelogram,
        NodeShape::ParallelogramAlt,
        NodeShape::Trapezoid,
        NodeShape::TrapezoidAlt,
        NodeShape::DoubleCircle,
    ];

    /// Opening and closing delimiters around the label
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::Rounded => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Cylinder => ("[(", ")]"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::Asymmetric => (">", "]"),
            NodeShape::Rhombus => ("{", "}"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Parallelogram => ("[/", "/]"),
            NodeShape::ParallelogramAlt => ("[\\", "\\]"),
            NodeShape::Trapezoid => ("[/", "\\]"),
            NodeShape::TrapezoidAlt => ("[\\", "/]"),
            NodeShape::DoubleCircle => ("(((", ")))"),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeShape::Rectangle => "rectangle",
            NodeShape::Rounded => "rounded",
            NodeShape::Stadium => "stadium",
            NodeShape::Subroutine => "subroutine",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Circle => "circle",
            NodeShape::Asymmetric => "asymmetric",
            NodeShape::Rhombus => "rhombus",
            NodeShape::Hexagon => "hexagon",
            NodeShape::Parallelogram => "parallelogram",
            NodeShape::ParallelogramAlt => "parallelogram_alt",
            NodeShape::Trapezoid => "trapezoid",
            NodeShape::TrapezoidAlt => "trapezoid_alt",
            NodeShape::DoubleCircle => "double_circle",
        };
        write!(f, "{}", name)
    }
}

/// Edge types matching Mermaid.js syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Solid line (no arrow): `---`
    Line,
    /// Dotted arrow: `-.->`
    DottedArrow,
    /// Dotted line: `-.-`
    DottedLine,
    /// Thick arrow: `==>`
    ThickArrow,
    /// Thick line: `===`
    ThickLine,
    /// Invisible edge: `~~~`
    Invisible,
    /// Circle end: `--o`
    CircleArrow,
    /// Cross end: `--x`
    CrossArrow,
    /// Arrows on both ends: `<-->`
    Bidirectional,
    /// Arrow pointing back at the source: `<---`
    ReverseArrow,
}

impl EdgeType {
    /// Every edge type, in declaration order
    pub const ALL: [EdgeType; 11] = [
        EdgeType::Arrow,
        EdgeType::Line,
        EdgeType::DottedArrow,
        EdgeType::DottedLine,
        EdgeType::ThickArrow,
        EdgeType::ThickLine,
        EdgeType::Invisible,
        EdgeType::CircleArrow,
        EdgeType::CrossArrow,
        EdgeType::Bidirectional,
        EdgeType::ReverseArrow,
    ];

    /// Returns true if this edge type has an arrowhead
    pub fn has_arrow(&self) -> bool {
        matches!(
            self,
            EdgeType::Arrow
                | EdgeType::DottedArrow
                | EdgeType::ThickArrow
                | EdgeType::CircleArrow
                | EdgeType::CrossArrow
                | EdgeType::Bidirectional
                | EdgeType::ReverseArrow
        )
    }

    /// Returns true if this edge type uses dotted lines
    pub fn is_dotted(&self) -> bool {
        matches!(self, EdgeType::DottedArrow | EdgeType::DottedLine)
    }

    /// Returns true if this edge type uses thick lines
    pub fn is_thick(&self) -> bool {
        matches!(self, EdgeType::ThickArrow | EdgeType::ThickLine)
    }

    /// Operator text for an edge spanning `length` ranks
    ///
    /// A length of 1 produces the base operator shown on each variant.
    pub fn operator(&self, length: usize) -> String {
        let extra = length.max(1) - 1;
        match self {
            EdgeType::Arrow => format!("{}>", "-".repeat(2 + extra)),
            EdgeType::Line => "-".repeat(3 + extra),
            EdgeType::DottedArrow => format!("-{}->", ".".repeat(1 + extra)),
            EdgeType::DottedLine => format!("-{}-", ".".repeat(1 + extra)),
            EdgeType::ThickArrow => format!("{}>", "=".repeat(2 + extra)),
            EdgeType::ThickLine => "=".repeat(3 + extra),
            EdgeType::Invisible => "~".repeat(3 + extra),
            EdgeType::CircleArrow => format!("{}o", "-".repeat(2 + extra)),
            EdgeType::CrossArrow => format!("{}x", "-".repeat(2 + extra)),
            EdgeType::Bidirectional => format!("<{}>", "-".repeat(2 + extra)),
            EdgeType::ReverseArrow => format!("<{}", "-".repeat(3 + extra)),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator(1))
    }
}
