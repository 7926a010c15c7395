//! Flowchart statement grammar using chumsky
//!
//! Recognises one `;`-separated statement at a time: node/edge chains and
//! the style directives. Block structure (`subgraph` ... `end`) is handled by
//! the line-level parser.

use chumsky::prelude::*;

use super::ast::{ClassAssign, ClassDef, FlowchartStatement, LinkStyle, Style};
use crate::core::chumsky_utils::{inline_whitespace, inline_whitespace_required, quoted_string};
use crate::core::{is_ident_char, EdgeType, NodeShape};

/// Node reference inside a chain (id plus optional shape and class)
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub id: String,
    /// Shape and raw label, when written with delimiters
    pub shape: Option<(NodeShape, String)>,
    pub class: Option<String>,
}

impl NodeRef {
    /// Returns true when the reference should also declare a node
    pub fn declares_node(&self) -> bool {
        self.shape.is_some() || self.class.is_some()
    }
}

/// Edge operator with its optional label
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub edge_type: EdgeType,
    pub length: usize,
    pub label: Option<String>,
}

/// `A --> B --> C`: a head node and one link per hop
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub head: NodeRef,
    pub hops: Vec<(Link, NodeRef)>,
}

const PLAIN_LABEL_STOP: &str = "[](){}|\"";
const SLANTED_LABEL_STOP: &str = "[](){}|\"/\\";

/// Chumsky-based flowchart statement parser
pub struct ChumskyFlowchartParser;

impl ChumskyFlowchartParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a node or edge chain
    pub fn parse_chain(&self, input: &str) -> Option<Chain> {
        Self::chain_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// Parse `classDef`, `class`, `style` or `linkStyle`
    pub fn parse_directive(&self, input: &str) -> Option<FlowchartStatement> {
        Self::directive_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    fn chain_parser<'src>() -> impl Parser<'src, &'src str, Chain> + Clone {
        Self::node_reference()
            .then(
                inline_whitespace()
                    .ignore_then(Self::link_parser())
                    .then(Self::node_reference())
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(inline_whitespace())
            .map(|(head, hops)| Chain { head, hops })
            .labelled("node or edge chain")
    }

    fn directive_parser<'src>() -> impl Parser<'src, &'src str, FlowchartStatement> + Clone {
        let class_def = just("classDef")
            .ignore_then(inline_whitespace_required())
            .ignore_then(Self::class_name())
            .then(inline_whitespace().ignore_then(Self::style_list()))
            .map(|(name, styles)| {
                FlowchartStatement::ClassDef(ClassDef {
                    name,
                    styles,
                    span: None,
                })
            });

        let class_assign = just("class")
            .ignore_then(inline_whitespace_required())
            .ignore_then(Self::id_list_parser())
            .then_ignore(inline_whitespace_required())
            .then(Self::class_name())
            .then_ignore(inline_whitespace())
            .map(|(ids, class)| {
                FlowchartStatement::ClassAssign(ClassAssign {
                    ids,
                    class,
                    span: None,
                })
            });

        let style = just("style")
            .ignore_then(inline_whitespace_required())
            .ignore_then(Self::node_id())
            .then(inline_whitespace().ignore_then(Self::style_list()))
            .map(|(id, styles)| {
                FlowchartStatement::Style(Style {
                    id,
                    styles,
                    span: None,
                })
            });

        let link_style = just("linkStyle")
            .ignore_then(inline_whitespace_required())
            .ignore_then(just("default").to(Vec::new()).or(Self::index_list_parser()))
            .then(inline_whitespace().ignore_then(Self::style_list()))
            .map(|(indices, styles)| {
                FlowchartStatement::LinkStyle(LinkStyle {
                    indices,
                    styles,
                    span: None,
                })
            });

        class_def
            .or(class_assign)
            .or(style)
            .or(link_style)
            .labelled("style directive")
    }

    fn node_id<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        any()
            .filter(|c: &char| is_ident_char(*c))
            .repeated()
            .at_least(1)
            .collect::<String>()
            .labelled("node identifier")
    }

    fn class_name<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        any()
            .filter(|c: &char| is_ident_char(*c) || *c == '-')
            .repeated()
            .at_least(1)
            .collect::<String>()
            .labelled("class name")
    }

    /// Parse a comma-separated list of identifiers: `A,B,C`
    fn id_list_parser<'src>() -> impl Parser<'src, &'src str, Vec<String>> + Clone {
        Self::node_id()
            .separated_by(just(',').padded_by(inline_whitespace()))
            .at_least(1)
            .collect()
    }

    /// Parse a comma-separated list of indices: `0,1,2`
    fn index_list_parser<'src>() -> impl Parser<'src, &'src str, Vec<usize>> + Clone {
        one_of('0'..='9')
            .repeated()
            .at_least(1)
            .at_most(9)
            .collect::<String>()
            .map(|s| s.parse::<usize>().unwrap_or(0))
            .separated_by(just(',').padded_by(inline_whitespace()))
            .at_least(1)
            .collect()
    }

    /// Parse the rest of the statement as `fill:#f9f,stroke:#333`
    fn style_list<'src>() -> impl Parser<'src, &'src str, Vec<String>> + Clone {
        any().repeated().collect::<String>().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    fn node_reference<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
        Self::node_id()
            .then(Self::shape_parser().or_not())
            .then(just(":::").ignore_then(Self::class_name()).or_not())
            .map(|((id, shape), class)| NodeRef { id, shape, class })
    }

    fn shape_parser<'src>() -> impl Parser<'src, &'src str, (NodeShape, String)> + Clone {
        let delimited = |shape: NodeShape, stop: &'static str| {
            let (open, close) = shape.delimiters();
            just(open)
                .ignore_then(Self::label_parser(stop))
                .then_ignore(just(close))
                .map(move |label| (shape, label))
        };

        // Longer delimiters first so `((` is not read as `(`
        delimited(NodeShape::DoubleCircle, PLAIN_LABEL_STOP)
            .or(delimited(NodeShape::Circle, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Stadium, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Rounded, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Subroutine, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Cylinder, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Parallelogram, SLANTED_LABEL_STOP))
            .or(delimited(NodeShape::Trapezoid, SLANTED_LABEL_STOP))
            .or(delimited(NodeShape::ParallelogramAlt, SLANTED_LABEL_STOP))
            .or(delimited(NodeShape::TrapezoidAlt, SLANTED_LABEL_STOP))
            .or(delimited(NodeShape::Rectangle, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Hexagon, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Rhombus, PLAIN_LABEL_STOP))
            .or(delimited(NodeShape::Asymmetric, PLAIN_LABEL_STOP))
            .labelled("node shape")
    }

    fn label_parser<'src>(stop: &'static str) -> impl Parser<'src, &'src str, String> + Clone {
        let quoted = inline_whitespace()
            .ignore_then(quoted_string())
            .then_ignore(inline_whitespace());
        let bare = none_of(stop)
            .repeated()
            .to_slice()
            .map(|s: &str| s.trim().to_string());
        quoted.or(bare).labelled("label")
    }

    /// Operator, then an optional `|label|`
    ///
    /// Also accepts the text-label forms `-- text -->`, `== text ==>` and
    /// `-. text .->`, which are normalised to the same [`Link`].
    fn link_parser<'src>() -> impl Parser<'src, &'src str, Link> + Clone {
        let pipe_label = just('|')
            .ignore_then(
                inline_whitespace()
                    .ignore_then(quoted_string())
                    .then_ignore(inline_whitespace())
                    .or(none_of('|')
                        .repeated()
                        .to_slice()
                        .map(|s: &str| s.trim().to_string())),
            )
            .then_ignore(just('|'))
            .then_ignore(inline_whitespace());

        let piped = Self::edge_operator()
            .then_ignore(inline_whitespace())
            .then(pipe_label.or_not())
            .map(|((edge_type, length), label)| Link {
                edge_type,
                length,
                label,
            });

        // A lone operator character belongs to the label (`yes-no`); one
        // followed by another operator character starts the closing operator
        let text = |stop: &'static str, inner: &'static str| {
            let lone = one_of(inner)
                .then_ignore(none_of(stop).filter(|c: &char| *c != '>').rewind())
                .ignored();
            inline_whitespace_required()
                .ignore_then(
                    none_of(stop)
                        .ignored()
                        .or(lone)
                        .repeated()
                        .at_least(1)
                        .to_slice(),
                )
                .map(|s: &str| s.trim().to_string())
        };

        let dashed_text = just("--")
            .ignore_then(text("-|\"", "-"))
            .then(Self::edge_operator());
        let thick_text = just("==")
            .ignore_then(text("=|\"", "="))
            .then(Self::edge_operator());
        let dotted_text = just("-.")
            .ignore_then(text(".-|\"", ".-"))
            .then(
                just('.')
                    .repeated()
                    .at_least(1)
                    .collect::<String>()
                    .then(just("->").to(true).or(just('-').to(false)))
                    .map(|(dots, arrow)| {
                        let edge_type = if arrow {
                            EdgeType::DottedArrow
                        } else {
                            EdgeType::DottedLine
                        };
                        (edge_type, dots.chars().count())
                    }),
            );

        let texted = dashed_text
            .or(thick_text)
            .or(dotted_text)
            .then_ignore(inline_whitespace())
            .map(|(label, (edge_type, length))| Link {
                edge_type,
                length,
                label: Some(label),
            });

        piped.or(texted).labelled("edge")
    }

    /// Recognise an edge operator, returning its type and rank length
    ///
    /// Every run of `-`, `.`, `=` or `~` is consumed in full before the head
    /// is checked. Circle and cross heads (`--o`, `--x`) must be followed by
    /// whitespace or a label so that `A --- oB` stays a plain line.
    pub(crate) fn edge_operator<'src>() -> impl Parser<'src, &'src str, (EdgeType, usize)> + Clone
    {
        let run = |c: char, min: usize| {
            just(c)
                .repeated()
                .at_least(min)
                .collect::<String>()
                .map(|s| s.chars().count())
        };
        let head_end = one_of(" \t|").rewind().ignored().or(end());

        let bidirectional = just('<')
            .ignore_then(run('-', 2))
            .then_ignore(just('>'))
            .map(|n| (EdgeType::Bidirectional, n - 1));
        let reverse = just('<')
            .ignore_then(run('-', 3))
            .map(|n| (EdgeType::ReverseArrow, n - 2));
        let arrow = run('-', 2)
            .then_ignore(just('>'))
            .map(|n| (EdgeType::Arrow, n - 1));
        let circle = run('-', 2)
            .then_ignore(just('o'))
            .then_ignore(head_end.clone())
            .map(|n| (EdgeType::CircleArrow, n - 1));
        let cross = run('-', 2)
            .then_ignore(just('x'))
            .then_ignore(head_end)
            .map(|n| (EdgeType::CrossArrow, n - 1));
        let line = run('-', 3).map(|n| (EdgeType::Line, n - 2));
        let dotted_arrow = just('-')
            .ignore_then(run('.', 1))
            .then_ignore(just("->"))
            .map(|n| (EdgeType::DottedArrow, n));
        let dotted_line = just('-')
            .ignore_then(run('.', 1))
            .then_ignore(just('-'))
            .map(|n| (EdgeType::DottedLine, n));
        let thick_arrow = run('=', 2)
            .then_ignore(just('>'))
            .map(|n| (EdgeType::ThickArrow, n - 1));
        let thick_line = run('=', 3).map(|n| (EdgeType::ThickLine, n - 2));
        let invisible = run('~', 3).map(|n| (EdgeType::Invisible, n - 2));

        bidirectional
            .or(reverse)
            .or(arrow)
            .or(circle)
            .or(cross)
            .or(line)
            .or(dotted_arrow)
            .or(dotted_line)
            .or(thick_arrow)
            .or(thick_line)
            .or(invisible)
            .labelled("edge operator")
    }
}

impl Default for ChumskyFlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}
