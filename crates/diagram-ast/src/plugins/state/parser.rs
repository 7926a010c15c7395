//! State diagram parser
//!
//! Each composite state opens a new scope that is parsed recursively until
//! its closing `}`. States declared twice in one scope are merged.

use tracing::{debug, span, trace, Level};

use super::ast::{Divider, State, StateDiagram, StateNote, StateStatement, StateType};
use super::chumsky_parser::{ChumskyStateParser, StateHeader};
use crate::core::{
    expect_header, is_identifier, skip_header_tail, split_colon, strip_keyword, DiagramError,
    DiagramKind, Direction, LineCursor, ParseContext, Parser, Result, SourceLine, Span,
};

/// How a scope ended
enum Stop<'a> {
    Close(&'a SourceLine),
    Eof,
}

/// State diagram parser
pub struct StateParser {
    grammar: ChumskyStateParser,
}

impl StateParser {
    pub fn new() -> Self {
        Self {
            grammar: ChumskyStateParser::new(),
        }
    }

    /// Parse statements until `}` or end of input
    ///
    /// `direction` is only writable at the top level; nested scopes pass
    /// `None` and skip direction lines.
    fn parse_scope<'a>(
        &self,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
        mut direction: Option<&mut Option<Direction>>,
    ) -> Result<(Vec<StateStatement>, Stop<'a>)> {
        let mut statements = Vec::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if text == "}" {
                if depth == 0 {
                    return Err(DiagramError::unexpected_close(DiagramKind::State, "}", line.line));
                }
                return Ok((statements, Stop::Close(line)));
            }

            if text == "--" {
                statements.push(StateStatement::Divider(Divider {
                    span: Some(line.span()),
                }));
                continue;
            }

            if let Some(rest) = strip_keyword(text, "direction") {
                match (rest.parse::<Direction>(), direction.as_deref_mut()) {
                    (Ok(parsed), Some(slot)) => *slot = Some(parsed),
                    (Ok(_), None) => ctx.skip(line, "direction inside composite state"),
                    (Err(_), _) => ctx.skip(line, "unknown direction"),
                }
                continue;
            }

            if let Some(header) = self.grammar.parse_note(text) {
                let (note, last) = match header.text {
                    Some(note) => (note, line),
                    None => read_note_body(line, cursor)?,
                };
                let mut note = StateNote::new(header.state, note).with_position(header.position);
                note.span = Some(line.span().merge(last.span()));
                statements.push(StateStatement::Note(note));
                continue;
            }

            if let Some(header) = self.grammar.parse_state_header(text) {
                let state = self.parse_state(header, line, cursor, ctx, depth)?;
                merge_state(&mut statements, state);
                continue;
            }

            if let Some(mut transition) = self.grammar.parse_transition(text) {
                transition.span = Some(line.span());
                trace!(from = %transition.from, to = %transition.to, "Parsed transition");
                statements.push(StateStatement::Transition(transition));
                continue;
            }

            if let Some((id, description)) = split_colon(text) {
                let id = id.trim();
                if is_identifier(id) {
                    upsert_state(&mut statements, id, line.span(), |state| {
                        state.describe(description.trim())
                    });
                    continue;
                }
            }

            if is_identifier(text) {
                upsert_state(&mut statements, text, line.span(), |_| {});
                continue;
            }

            ctx.skip(line, "not a state statement");
        }

        Ok((statements, Stop::Eof))
    }

    fn parse_state<'a>(
        &self,
        header: StateHeader,
        open: &'a SourceLine,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
    ) -> Result<State> {
        let mut state = State::new(header.id).with_type(header.state_type);
        state.label = header.label;
        state.span = Some(open.span());
        if !header.opens_body {
            return Ok(state);
        }

        ctx.check_depth(depth + 1, open)?;
        let (inner, stop) = self.parse_scope(cursor, ctx, depth + 1, None)?;
        match stop {
            Stop::Close(close) => state.span = Some(open.span().merge(close.span())),
            Stop::Eof => return Err(DiagramError::unclosed(DiagramKind::State, "state", open.line)),
        }
        trace!(state = %state.id, children = inner.len(), "Parsed composite state");
        state.composite_states = Some(inner);
        Ok(state)
    }
}

impl Default for StateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for StateParser {
    type Output = StateDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<StateDiagram> {
        let parse_span = span!(Level::INFO, "parse_state", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::State)?;
        skip_header_tail(ctx, header);
        let mut diagram = StateDiagram::new();

        let (statements, _) = self.parse_scope(&mut cursor, ctx, 0, Some(&mut diagram.direction))?;
        diagram.statements = statements;

        debug!(statements = diagram.statements.len(), "Parsed state diagram");
        let end = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        diagram.span = Some(header.span().merge(end));
        Ok(diagram)
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::State
    }

    fn name(&self) -> &'static str {
        "state"
    }
}

/// Collect lines up to `end note`, returning the text and the closing line
fn read_note_body<'a>(
    open: &SourceLine,
    cursor: &mut LineCursor<'a>,
) -> Result<(String, &'a SourceLine)> {
    let mut body = Vec::new();
    while let Some(line) = cursor.next() {
        if line.text.eq_ignore_ascii_case("end note") {
            return Ok((body.join("\n"), line));
        }
        body.push(line.text.as_str());
    }
    Err(DiagramError::unclosed(DiagramKind::State, "note", open.line))
}

fn upsert_state(
    statements: &mut Vec<StateStatement>,
    id: &str,
    span: Span,
    update: impl FnOnce(&mut State),
) {
    let existing = statements.iter_mut().find_map(|statement| match statement {
        StateStatement::State(state) if state.id == id => Some(state),
        _ => None,
    });
    match existing {
        Some(state) => update(state),
        None => {
            let mut state = State::new(id);
            state.span = Some(span);
            update(&mut state);
            statements.push(StateStatement::State(state));
        }
    }
}

/// Fold a repeated declaration into the first one in the same scope
fn merge_state(statements: &mut Vec<StateStatement>, state: State) {
    let existing = statements.iter_mut().find_map(|statement| match statement {
        StateStatement::State(existing) if existing.id == state.id => Some(existing),
        _ => None,
    });
    match existing {
        Some(existing) => {
            if state.label.is_some() {
                existing.label = state.label;
            }
            if state.state_type != StateType::State {
                existing.state_type = state.state_type;
            }
            if let Some(inner) = state.composite_states {
                existing
                    .composite_states
                    .get_or_insert_with(Vec::new)
                    .extend(inner);
            }
        }
        None => statements.push(StateStatement::State(state)),
    }
}
