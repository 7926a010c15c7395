//! Sequence diagram parser
//!
//! Line oriented: every line is a keyword statement, a note, a message or the
//! opening, separator or `end` of a block. Blocks nest recursively.

use tracing::{debug, span, trace, Level};

use super::ast::{
    ActorRef, ActorText, Activation, Alt, Autonumber, Block, Branch, Create, Critical, Message,
    Note, NotePosition, Par, Participant, ParticipantKind, Rect, SequenceBox, SequenceDiagram,
    SequenceStatement, Title,
};
use crate::core::{
    expect_header, skip_header_tail, split_colon, strip_keyword, ArrowType, DiagramError,
    DiagramKind, LineCursor, LineOutcome, ParseContext, Parser, Result, SourceLine, Span,
};

/// Sequence diagram parser
pub struct SequenceParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Loop,
    Alt,
    Opt,
    Par,
    Critical,
    Break,
    Rect,
    Box,
}

impl BlockKind {
    const ALL: [BlockKind; 8] = [
        BlockKind::Loop,
        BlockKind::Alt,
        BlockKind::Opt,
        BlockKind::Par,
        BlockKind::Critical,
        BlockKind::Break,
        BlockKind::Rect,
        BlockKind::Box,
    ];

    fn keyword(self) -> &'static str {
        match self {
            BlockKind::Loop => "loop",
            BlockKind::Alt => "alt",
            BlockKind::Opt => "opt",
            BlockKind::Par => "par",
            BlockKind::Critical => "critical",
            BlockKind::Break => "break",
            BlockKind::Rect => "rect",
            BlockKind::Box => "box",
        }
    }

    /// Keyword that starts a new branch inside this block
    fn separator(self) -> Option<&'static str> {
        match self {
            BlockKind::Alt => Some("else"),
            BlockKind::Par => Some("and"),
            BlockKind::Critical => Some("option"),
            _ => None,
        }
    }

    /// The block opened by `text`, with the rest of the line
    fn open(text: &str) -> Option<(BlockKind, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| strip_keyword(text, kind.keyword()).map(|rest| (kind, rest)))
    }
}

/// How a run of statements ended
enum Stop<'a> {
    End(&'a SourceLine),
    Separator(Option<String>),
    Eof,
}

fn label(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl SequenceParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_statements<'a>(
        &self,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
        enclosing: Option<BlockKind>,
    ) -> Result<(Vec<SequenceStatement>, Stop<'a>)> {
        let mut statements = Vec::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if text.eq_ignore_ascii_case("end") {
                return match enclosing {
                    Some(_) => Ok((statements, Stop::End(line))),
                    None => Err(DiagramError::unexpected_close(
                        DiagramKind::Sequence,
                        "end",
                        line.line,
                    )),
                };
            }

            if let Some(separator) = enclosing.and_then(BlockKind::separator) {
                if let Some(rest) = strip_keyword(text, separator) {
                    return Ok((statements, Stop::Separator(label(rest))));
                }
            }

            if let Some((kind, rest)) = BlockKind::open(text) {
                ctx.check_depth(depth + 1, line)?;
                trace!(block = kind.keyword(), depth = depth + 1, "Opening block");
                statements.push(self.parse_block(kind, rest, line, cursor, ctx, depth + 1)?);
                continue;
            }

            if let Some(statement) = classify(line).resolve(ctx, line)? {
                statements.push(statement);
            }
        }

        Ok((statements, Stop::Eof))
    }

    fn parse_block<'a>(
        &self,
        kind: BlockKind,
        rest: &str,
        open: &'a SourceLine,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
    ) -> Result<SequenceStatement> {
        let (statements, mut stop) = self.parse_statements(cursor, ctx, depth, Some(kind))?;
        let mut branches = Vec::new();

        let end = loop {
            match stop {
                Stop::End(end) => break end,
                Stop::Eof => {
                    return Err(DiagramError::unclosed(
                        DiagramKind::Sequence,
                        kind.keyword(),
                        open.line,
                    ))
                }
                Stop::Separator(branch_label) => {
                    let (branch, next) = self.parse_statements(cursor, ctx, depth, Some(kind))?;
                    branches.push(Branch {
                        label: branch_label,
                        statements: branch,
                    });
                    stop = next;
                }
            }
        };

        let span = Some(open.span().merge(end.span()));
        let label = label(rest);
        Ok(match kind {
            BlockKind::Loop => SequenceStatement::Loop(Block { label, statements, span }),
            BlockKind::Opt => SequenceStatement::Opt(Block { label, statements, span }),
            BlockKind::Break => SequenceStatement::Break(Block { label, statements, span }),
            BlockKind::Alt => SequenceStatement::Alt(Alt {
                label,
                statements,
                else_blocks: branches,
                span,
            }),
            BlockKind::Par => SequenceStatement::Par(Par {
                label,
                statements,
                and_blocks: branches,
                span,
            }),
            BlockKind::Critical => SequenceStatement::Critical(Critical {
                label,
                statements,
                option_blocks: branches,
                span,
            }),
            BlockKind::Rect => SequenceStatement::Rect(Rect {
                color: label,
                statements,
                span,
            }),
            BlockKind::Box => SequenceStatement::Box(SequenceBox {
                label,
                statements,
                span,
            }),
        })
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for SequenceParser {
    type Output = SequenceDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<SequenceDiagram> {
        let parse_span = span!(Level::INFO, "parse_sequence", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::Sequence)?;
        skip_header_tail(ctx, header);
        let (statements, _) = self.parse_statements(&mut cursor, ctx, 0, None)?;

        debug!(statements = statements.len(), "Parsed sequence diagram");

        let end = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        Ok(SequenceDiagram {
            statements,
            span: Some(header.span().merge(end)),
        })
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Classify a line that is not a block keyword
fn classify(line: &SourceLine) -> LineOutcome<SequenceStatement> {
    let text = line.text.as_str();
    let span = Some(line.span());

    for (keyword, kind) in [
        ("participant", ParticipantKind::Participant),
        ("actor", ParticipantKind::Actor),
    ] {
        if let Some(rest) = strip_keyword(text, keyword) {
            let Some((id, alias)) = participant_name(rest) else {
                return LineOutcome::Skipped("participant without a name");
            };
            let participant = Participant { id, alias, span };
            return LineOutcome::Matched(match kind {
                ParticipantKind::Participant => SequenceStatement::Participant(participant),
                ParticipantKind::Actor => SequenceStatement::Actor(participant),
            });
        }
    }

    if let Some(rest) = strip_keyword(text, "create") {
        let parsed = [ParticipantKind::Participant, ParticipantKind::Actor]
            .into_iter()
            .find_map(|kind| strip_keyword(rest, kind.keyword()).map(|name| (kind, name)))
            .and_then(|(kind, name)| participant_name(name).map(|(id, alias)| (kind, id, alias)));
        return match parsed {
            Some((participant_kind, id, alias)) => LineOutcome::Matched(SequenceStatement::Create(
                Create {
                    participant_kind,
                    id,
                    alias,
                    span,
                },
            )),
            None => LineOutcome::Skipped("create without participant or actor"),
        };
    }

    for (keyword, build) in [
        ("activate", SequenceStatement::Activate as fn(ActorRef) -> SequenceStatement),
        ("deactivate", SequenceStatement::Deactivate),
        ("destroy", SequenceStatement::Destroy),
    ] {
        if let Some(actor) = strip_keyword(text, keyword) {
            if actor.is_empty() {
                return LineOutcome::Skipped("missing actor");
            }
            return LineOutcome::Matched(build(ActorRef {
                actor: actor.to_string(),
                span,
            }));
        }
    }

    for (keyword, build) in [
        ("links", SequenceStatement::Link as fn(ActorText) -> SequenceStatement),
        ("link", SequenceStatement::Link),
        ("properties", SequenceStatement::Properties),
    ] {
        if let Some(rest) = strip_keyword(text, keyword) {
            return match split_colon(rest) {
                Some((actor, value)) if !actor.trim().is_empty() => {
                    LineOutcome::Matched(build(ActorText {
                        actor: actor.trim().to_string(),
                        text: value.trim().to_string(),
                        span,
                    }))
                }
                _ => LineOutcome::Skipped("expected `actor: text`"),
            };
        }
    }

    if let Some(rest) = strip_keyword(text, "autonumber") {
        return autonumber(rest, span).into();
    }

    if let Some(title) = title_text(text) {
        return LineOutcome::Matched(SequenceStatement::Title(Title {
            text: title.to_string(),
            span,
        }));
    }

    if let Some(rest) = strip_keyword(text, "note") {
        return note(rest, span).into();
    }

    match message(text) {
        Some(mut message) => {
            message.span = span;
            LineOutcome::Matched(SequenceStatement::Message(message))
        }
        None => LineOutcome::Skipped("not a sequence statement"),
    }
}

/// `Id` or `Id as Alias`
fn participant_name(rest: &str) -> Option<(String, Option<String>)> {
    let (id, alias) = match rest.split_once(" as ") {
        Some((id, alias)) => (id.trim(), label(alias)),
        None => (rest.trim(), None),
    };
    (!id.is_empty()).then(|| (id.to_string(), alias))
}

/// `title Text` or `title: Text`
fn title_text(text: &str) -> Option<&str> {
    match text.get(..6) {
        Some(head) if head.eq_ignore_ascii_case("title:") => Some(text[6..].trim()),
        _ => strip_keyword(text, "title"),
    }
}

fn autonumber(rest: &str, span: Option<Span>) -> Option<SequenceStatement> {
    if rest.eq_ignore_ascii_case("off") {
        return Some(SequenceStatement::Autonumber(Autonumber {
            start: None,
            step: None,
            visible: false,
            span,
        }));
    }
    let numbers = rest
        .split_whitespace()
        .map(str::parse::<u64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    match numbers.as_slice() {
        [] | [_] | [_, _] => Some(SequenceStatement::Autonumber(Autonumber {
            start: numbers.first().copied(),
            step: numbers.get(1).copied(),
            visible: true,
            span,
        })),
        _ => None,
    }
}

/// `left of A: text`, `right of A: text` or `over A,B: text`
fn note(rest: &str, span: Option<Span>) -> Option<SequenceStatement> {
    let (position, rest) = [NotePosition::Left, NotePosition::Right, NotePosition::Over]
        .into_iter()
        .find_map(|position| strip_keyword(rest, position.keyword()).map(|rest| (position, rest)))?;
    let (actors, text) = split_colon(rest)?;
    let actors: Vec<String> = actors
        .split(',')
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .map(str::to_string)
        .collect();
    if actors.is_empty() {
        return None;
    }
    Some(SequenceStatement::Note(Note {
        position,
        actors,
        text: text.trim().to_string(),
        span,
    }))
}

/// `From->>+To: text`
fn message(text: &str) -> Option<Message> {
    let (idx, arrow_type, len) = ArrowType::find(text)?;
    let from = text[..idx].trim();
    let mut rest = &text[idx + len..];

    let activation = match rest.chars().next() {
        Some('+') => Some(Activation::Activate),
        Some('-') => Some(Activation::Deactivate),
        _ => None,
    };
    if activation.is_some() {
        rest = &rest[1..];
    }

    let (to, text) = match split_colon(rest) {
        Some((to, text)) => (to.trim(), Some(text.trim().to_string())),
        None => (rest.trim(), None),
    };
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some(Message {
        from: from.to_string(),
        to: to.to_string(),
        arrow_type,
        text,
        activation,
        span: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParseConfig, SkippedLine};

    fn parse(input: &str) -> SequenceDiagram {
        SequenceParser::new().parse(input).unwrap()
    }

    fn parse_skipping(input: &str) -> (SequenceDiagram, Vec<SkippedLine>) {
        let lines = crate::core::lex(input);
        let mut ctx = ParseContext::new(ParseConfig::default());
        ctx.set_dialect(DiagramKind::Sequence);
        let diagram = SequenceParser::new().parse_lines(&lines, &mut ctx).unwrap();
        (diagram, ctx.into_skipped())
    }

    #[test]
    fn test_participants_and_messages() {
        let diagram = parse(
            "sequenceDiagram\n  participant A as Alice\n  actor B\n  A->>B: Hello\n  B-->>A: Hi back",
        );
        assert_eq!(diagram.statements.len(), 4);
        match &diagram.statements[0] {
            SequenceStatement::Participant(p) => {
                assert_eq!(p.id, "A");
                assert_eq!(p.alias.as_deref(), Some("Alice"));
            }
            other => panic!("expected participant, got {:?}", other),
        }
        assert!(matches!(&diagram.statements[1], SequenceStatement::Actor(p) if p.id == "B"));
        match &diagram.statements[3] {
            SequenceStatement::Message(m) => {
                assert_eq!(m.from, "B");
                assert_eq!(m.to, "A");
                assert_eq!(m.arrow_type, ArrowType::Dotted);
                assert_eq!(m.text.as_deref(), Some("Hi back"));
            }
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_every_arrow_type() {
        for arrow in ArrowType::ALL {
            let diagram = parse(&format!("sequenceDiagram\n  A{}B: x", arrow.symbol()));
            assert!(
                matches!(&diagram.statements[0], SequenceStatement::Message(m) if m.arrow_type == arrow),
                "arrow {}",
                arrow
            );
        }
    }

    #[test]
    fn test_message_activation_shorthand() {
        let diagram = parse("sequenceDiagram\n  A->>+B: start\n  B-->>-A: done\n  A->>B");
        let activations: Vec<_> = diagram
            .statements
            .iter()
            .map(|s| match s {
                SequenceStatement::Message(m) => m.activation,
                _ => None,
            })
            .collect();
        assert_eq!(
            activations,
            vec![Some(Activation::Activate), Some(Activation::Deactivate), None]
        );
        assert!(matches!(&diagram.statements[2], SequenceStatement::Message(m) if m.text.is_none()));
    }

    #[test]
    fn test_notes() {
        let diagram = parse("sequenceDiagram\n  Note right of A: thinking\n  note over A,B: shared");
        match &diagram.statements[1] {
            SequenceStatement::Note(n) => {
                assert_eq!(n.position, NotePosition::Over);
                assert_eq!(n.actors, vec!["A", "B"]);
                assert_eq!(n.text, "shared");
            }
            other => panic!("expected note, got {:?}", other),
        }
    }

    #[test]
    fn test_alt_with_else_branches() {
        let diagram = parse(
            "sequenceDiagram\n  alt is sick\n    B->>A: Not so good\n  else is well\n    B->>A: Fine\n  else\n    B->>A: ?\n  end",
        );
        match &diagram.statements[0] {
            SequenceStatement::Alt(alt) => {
                assert_eq!(alt.label.as_deref(), Some("is sick"));
                assert_eq!(alt.statements.len(), 1);
                assert_eq!(alt.else_blocks.len(), 2);
                assert_eq!(alt.else_blocks[0].label.as_deref(), Some("is well"));
                assert_eq!(alt.else_blocks[1].label, None);
            }
            other => panic!("expected alt, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_blocks() {
        let diagram = parse(
            "sequenceDiagram\n  loop every minute\n    par\n      A->>B: x\n    and\n      A->>C: y\n    end\n  end\n  critical connect\n    A->>DB: open\n  option timeout\n    A->>A: retry\n  end",
        );
        match &diagram.statements[0] {
            SequenceStatement::Loop(block) => match &block.statements[0] {
                SequenceStatement::Par(par) => assert_eq!(par.and_blocks.len(), 1),
                other => panic!("expected par, got {:?}", other),
            },
            other => panic!("expected loop, got {:?}", other),
        }
        assert!(matches!(&diagram.statements[1], SequenceStatement::Critical(c) if c.option_blocks.len() == 1));
    }

    #[test]
    fn test_separator_outside_its_block_is_skipped() {
        let (diagram, skipped) = parse_skipping("sequenceDiagram\n  loop\n    else nope\n  end");
        assert!(matches!(&diagram.statements[0], SequenceStatement::Loop(b) if b.statements.is_empty()));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].line, 3);
    }

    #[test]
    fn test_rect_box_and_keywords() {
        let diagram = parse(
            "sequenceDiagram\n  autonumber 10 5\n  title: Checkout\n  box Aqua Team\n    participant A\n  end\n  rect rgb(0, 255, 0)\n    activate A\n    deactivate A\n  end\n  create actor C as Carl\n  destroy C\n  link A: Dashboard @ https://example.com\n  properties A: {\"class\": \"x\"}\n  autonumber off",
        );
        let s = &diagram.statements;
        assert!(matches!(&s[0], SequenceStatement::Autonumber(a) if a.start == Some(10) && a.step == Some(5) && a.visible));
        assert!(matches!(&s[1], SequenceStatement::Title(t) if t.text == "Checkout"));
        assert!(matches!(&s[2], SequenceStatement::Box(b) if b.label.as_deref() == Some("Aqua Team")));
        assert!(matches!(&s[3], SequenceStatement::Rect(r) if r.color.as_deref() == Some("rgb(0, 255, 0)") && r.statements.len() == 2));
        assert!(matches!(&s[4], SequenceStatement::Create(c) if c.participant_kind == ParticipantKind::Actor && c.alias.as_deref() == Some("Carl")));
        assert!(matches!(&s[5], SequenceStatement::Destroy(d) if d.actor == "C"));
        assert!(matches!(&s[6], SequenceStatement::Link(l) if l.text == "Dashboard @ https://example.com"));
        assert!(matches!(&s[7], SequenceStatement::Properties(p) if p.actor == "A"));
        assert!(matches!(&s[8], SequenceStatement::Autonumber(a) if !a.visible));
    }

    #[test]
    fn test_unknown_lines_are_skipped() {
        let (diagram, skipped) = parse_skipping("sequenceDiagram\n  A->>B: x\n  what is this\n  B->>A: y");
        assert_eq!(diagram.statements.len(), 2);
        assert_eq!(skipped[0].text, "what is this");
    }

    #[test]
    fn test_stray_end_is_fatal() {
        let err = SequenceParser::new().parse("sequenceDiagram\n  A->>B: x\n  end").unwrap_err();
        assert!(matches!(err, DiagramError::UnbalancedBlock { line: 3, .. }));
    }

    #[test]
    fn test_unclosed_block_reports_opening_line() {
        let err = SequenceParser::new()
            .parse("sequenceDiagram\n  A->>B: x\n  loop forever\n    A->>B: y")
            .unwrap_err();
        assert!(matches!(err, DiagramError::UnbalancedBlock { line: 3, .. }));
    }

    #[test]
    fn test_nesting_limit() {
        let mut input = String::from("sequenceDiagram\n");
        for _ in 0..5 {
            input.push_str("opt\n");
        }
        for _ in 0..5 {
            input.push_str("end\n");
        }
        let lines = crate::core::lex(&input);
        let mut ctx = ParseContext::new(ParseConfig::new().with_max_nesting_depth(3));
        ctx.set_dialect(DiagramKind::Sequence);
        let err = SequenceParser::new().parse_lines(&lines, &mut ctx).unwrap_err();
        assert!(matches!(err, DiagramError::NestingTooDeep { limit: 3, line: 5, .. }));
    }

    #[test]
    fn test_spans_cover_blocks() {
        let diagram = parse("sequenceDiagram\n  opt maybe\n    A->>B: x\n  end");
        match &diagram.statements[0] {
            SequenceStatement::Opt(block) => {
                let span = block.span.unwrap();
                assert_eq!(span.start.line, 2);
                assert_eq!(span.end.line, 4);
            }
            other => panic!("expected opt, got {:?}", other),
        }
    }
}
