//! Flowchart parser
//!
//! Walks the lexed lines of a `flowchart`/`graph` block, splitting each line
//! into `;`-separated statements. Statements are recognised by
//! [`ChumskyFlowchartParser`]; `subgraph` ... `end` nesting is handled here.

use tracing::{debug, span, trace, Level};

use super::ast::{Edge, FlowchartDiagram, FlowchartStatement, Node, Subgraph};
use super::chumsky_parser::{Chain, ChumskyFlowchartParser, NodeRef};
use crate::core::{
    expect_header, is_identifier, split_statements, strip_keyword, unquote, Content, DiagramError,
    DiagramKind, Direction, LineCursor, LineOutcome, ParseContext, Parser, Result, SourceLine,
    Span,
};

/// Flowchart parser
pub struct FlowchartParser {
    grammar: ChumskyFlowchartParser,
}

/// Statements of one nesting level and where the level was closed
struct Block<'a> {
    statements: Vec<FlowchartStatement>,
    direction: Option<Direction>,
    end: Option<&'a SourceLine>,
}

impl FlowchartParser {
    pub fn new() -> Self {
        Self {
            grammar: ChumskyFlowchartParser::new(),
        }
    }

    fn parse_block<'a>(
        &self,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
        open: Option<&'a SourceLine>,
    ) -> Result<Block<'a>> {
        let mut statements = Vec::new();
        let mut direction = None;

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if text == "end" {
                return match open {
                    Some(_) => Ok(Block {
                        statements,
                        direction,
                        end: Some(line),
                    }),
                    None => Err(DiagramError::unexpected_close(
                        DiagramKind::Flowchart,
                        "end",
                        line.line,
                    )),
                };
            }

            if let Some(title) = strip_keyword(text, "subgraph") {
                ctx.check_depth(depth + 1, line)?;
                trace!(depth = depth + 1, title, "Opening subgraph");
                let (id, label) = parse_subgraph_title(title);
                let inner = self.parse_block(cursor, ctx, depth + 1, Some(line))?;
                let end_span = inner.end.map(SourceLine::span).unwrap_or_else(|| line.span());
                statements.push(FlowchartStatement::Subgraph(Subgraph {
                    id,
                    label,
                    direction: inner.direction,
                    body: inner.statements,
                    span: Some(line.span().merge(end_span)),
                }));
                continue;
            }

            if let Some(rest) = strip_keyword(text, "direction") {
                let outcome = match (open, rest.parse::<Direction>()) {
                    (Some(_), Ok(dir)) => LineOutcome::Matched(dir),
                    (None, Ok(_)) => LineOutcome::Skipped("direction outside a subgraph"),
                    (_, Err(_)) => LineOutcome::Skipped("unknown direction"),
                };
                if let Some(dir) = outcome.resolve(ctx, line)? {
                    direction = Some(dir);
                }
                continue;
            }

            if let Some(parsed) = self.classify(line).resolve(ctx, line)? {
                statements.extend(parsed);
            }
        }

        match open {
            Some(open_line) => Err(DiagramError::unclosed(
                DiagramKind::Flowchart,
                "subgraph",
                open_line.line,
            )),
            None => Ok(Block {
                statements,
                direction,
                end: None,
            }),
        }
    }

    /// Classify one statement that is not a block keyword
    fn classify(&self, line: &SourceLine) -> LineOutcome<Vec<FlowchartStatement>> {
        if let Some(mut directive) = self.grammar.parse_directive(&line.text) {
            directive.set_span(line.span());
            return LineOutcome::Matched(vec![directive]);
        }
        match self.grammar.parse_chain(&line.text) {
            Some(chain) => LineOutcome::Matched(chain_statements(chain, line.span())),
            None => LineOutcome::Skipped("not a node, edge or style statement"),
        }
    }
}

impl Default for FlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for FlowchartParser {
    type Output = FlowchartDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<FlowchartDiagram> {
        let parse_span = span!(Level::INFO, "parse_flowchart", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::Flowchart)?;
        let (direction, inline) = parse_header(&header.text);

        // Statements may follow the header after `;` and share physical lines
        let mut units: Vec<SourceLine> = inline
            .into_iter()
            .map(|part| SourceLine::new(part, header.line, header.column))
            .collect();
        while let Some(line) = cursor.next() {
            units.extend(
                split_statements(&line.text)
                    .into_iter()
                    .map(|part| SourceLine::new(part, line.line, line.column)),
            );
        }

        let mut units_cursor = LineCursor::new(&units);
        let block = self.parse_block(&mut units_cursor, ctx, 0, None)?;

        let last = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        debug!(
            direction = %direction,
            statements = block.statements.len(),
            "Parsed flowchart"
        );

        Ok(FlowchartDiagram {
            direction,
            body: block.statements,
            span: Some(header.span().merge(last)),
        })
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Flowchart
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

/// Direction and trailing `;` statements of a header line
fn parse_header(text: &str) -> (Direction, Vec<&str>) {
    let (head, rest) = text.split_once(';').unwrap_or((text, ""));
    let direction = head
        .split_whitespace()
        .nth(1)
        .and_then(|word| word.parse().ok())
        .unwrap_or_default();
    (direction, split_statements(rest))
}

/// `id`, `id[label]`, `id [label]`, `"quoted title"` or free text
fn parse_subgraph_title(title: &str) -> (String, Option<String>) {
    if title.starts_with('"') {
        return (unquote(title), None);
    }
    if let Some(open) = title.find('[') {
        let id = title[..open].trim();
        if is_identifier(id) && title.ends_with(']') {
            let label = unquote(&title[open + 1..title.len() - 1]);
            return (id.to_string(), Some(label));
        }
    }
    (title.to_string(), None)
}

fn node_from_ref(node: &NodeRef, span: Span) -> Node {
    let mut declared = match &node.shape {
        Some((shape, label)) => Node::new(node.id.clone(), *shape, Content::detect(label)),
        None => Node::bare(node.id.clone()),
    };
    declared.class = node.class.clone();
    declared.span = Some(span);
    declared
}

/// Lower a chain to statements: declared nodes first, then one edge per hop
fn chain_statements(chain: Chain, span: Span) -> Vec<FlowchartStatement> {
    if chain.hops.is_empty() {
        return vec![FlowchartStatement::Node(node_from_ref(&chain.head, span))];
    }

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    if chain.head.declares_node() {
        nodes.push(FlowchartStatement::Node(node_from_ref(&chain.head, span)));
    }

    let mut from = chain.head.id;
    for (link, to) in chain.hops {
        if to.declares_node() {
            nodes.push(FlowchartStatement::Node(node_from_ref(&to, span)));
        }
        let mut edge = Edge::new(from, to.id.clone(), link.edge_type).with_length(link.length);
        edge.label = link.label.as_deref().map(Content::detect);
        edge.span = Some(span);
        edges.push(FlowchartStatement::Edge(edge));
        from = to.id;
    }

    nodes.extend(edges);
    nodes
}
