//! Gantt chart parser
//!
//! Header directives set chart metadata, `section` lines open a new section,
//! and every `name : fields` line is a task in the current section.

use chumsky::prelude::*;
use tracing::{debug, span, trace, Level};

use super::ast::{GanttDiagram, GanttSection, GanttTask, TaskStatus};
use crate::core::{
    expect_header, skip_header_tail, strip_keyword, DiagramKind, LineCursor, ParseContext,
    Parser as CoreParser, Result, SourceLine,
};

/// Directives that are recognised but carry nothing this AST models
const IGNORED_DIRECTIVES: [&str; 8] = [
    "tickInterval",
    "weekday",
    "includes",
    "inclusiveEndDates",
    "topAxis",
    "displayMode",
    "accTitle",
    "accDescr",
];

/// Gantt chart parser
pub struct GanttParser;

impl GanttParser {
    pub fn new() -> Self {
        Self
    }

    /// `name : field, field, ...` split into the name and trimmed fields
    fn task_line<'src>() -> impl Parser<'src, &'src str, (String, Vec<String>)> + Clone {
        let name = none_of(":")
            .repeated()
            .at_least(1)
            .to_slice()
            .map(|s: &str| s.trim().to_string())
            .filter(|name: &String| !name.is_empty());
        let field = none_of(",")
            .repeated()
            .to_slice()
            .map(|s: &str| s.trim().to_string());

        name.then_ignore(just(':'))
            .then(field.separated_by(just(',')).at_least(1).collect::<Vec<_>>())
    }

    /// Parse a task line; `None` when the fields do not form a task
    pub fn parse_task(&self, input: &str) -> Option<GanttTask> {
        let (name, fields) = Self::task_line()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()?;
        build_task(name, fields)
    }

    /// Apply a header directive; returns false if `text` is not one
    fn apply_directive(diagram: &mut GanttDiagram, text: &str) -> bool {
        let slot = if let Some(rest) = strip_keyword(text, "title") {
            (&mut diagram.title, rest)
        } else if let Some(rest) = strip_keyword(text, "dateFormat") {
            (&mut diagram.date_format, rest)
        } else if let Some(rest) = strip_keyword(text, "axisFormat") {
            (&mut diagram.axis_format, rest)
        } else if let Some(rest) = strip_keyword(text, "excludes") {
            (&mut diagram.excludes, rest)
        } else if let Some(rest) = strip_keyword(text, "todayMarker") {
            (&mut diagram.today_marker, rest)
        } else {
            return false;
        };
        let (field, value) = slot;
        *field = Some(value.to_string());
        true
    }
}

impl Default for GanttParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreParser for GanttParser {
    type Output = GanttDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<GanttDiagram> {
        let parse_span = span!(Level::INFO, "parse_gantt", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::Gantt)?;
        skip_header_tail(ctx, header);
        let mut diagram = GanttDiagram::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if let Some(name) = strip_keyword(text, "section") {
                let mut section = GanttSection::new(name);
                section.span = Some(line.span());
                diagram.sections.push(section);
                continue;
            }

            if Self::apply_directive(&mut diagram, text) {
                continue;
            }

            let directive = text.split([' ', ':']).next().unwrap_or_default();
            if IGNORED_DIRECTIVES
                .iter()
                .any(|ignored| ignored.eq_ignore_ascii_case(directive))
            {
                ctx.skip(line, "unsupported gantt directive");
                continue;
            }

            match self.parse_task(text) {
                Some(mut task) => {
                    task.span = Some(line.span());
                    trace!(task = %task.name, "Parsed task");
                    if diagram.sections.is_empty() {
                        diagram.sections.push(GanttSection::implicit());
                    }
                    if let Some(section) = diagram.sections.last_mut() {
                        section.span = Some(match section.span {
                            Some(span) => span.merge(line.span()),
                            None => line.span(),
                        });
                        section.tasks.push(task);
                    }
                }
                None => ctx.skip(line, "not a gantt directive or task"),
            }
        }

        debug!(
            sections = diagram.sections.len(),
            tasks = diagram.tasks().count(),
            "Parsed gantt chart"
        );
        let end = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        diagram.span = Some(header.span().merge(end));
        Ok(diagram)
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Gantt
    }

    fn name(&self) -> &'static str {
        "gantt"
    }
}

/// Interpret task fields: leading status tags, then
/// `duration`, `start, duration` or `id, start, duration`
///
/// Only the first status tag is kept.
fn build_task(name: String, fields: Vec<String>) -> Option<GanttTask> {
    if fields.iter().any(String::is_empty) {
        return None;
    }

    let mut status = None;
    let mut rest = fields.as_slice();
    while let Some((first, tail)) = rest.split_first() {
        match TaskStatus::from_keyword(first) {
            Some(tag) => {
                status.get_or_insert(tag);
                rest = tail;
            }
            None => break,
        }
    }

    let task = match rest {
        [duration] => GanttTask::new(name, duration.as_str()),
        [start, duration] => GanttTask::new(name, duration.as_str()).with_start(start.as_str()),
        [id, start, duration] => GanttTask::new(name, duration.as_str())
            .with_id(id.as_str())
            .with_start(start.as_str()),
        _ => return None,
    };
    Some(GanttTask { status, ..task })
}
