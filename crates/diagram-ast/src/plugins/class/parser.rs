//! Class diagram parser
//!
//! Drives [`ChumskyClassParser`] over the lexed lines. Class bodies and
//! namespaces are `{ ... }` blocks; repeated declarations of one class merge
//! into its first definition.

use tracing::{debug, span, trace, Level};

use super::ast::{ClassDefinition, ClassDiagram, ClassMember, ClassNamespace, ClassStatement};
use super::chumsky_parser::{parse_member, ChumskyClassParser, ClassHeader};
use crate::core::{
    expect_header, is_identifier, skip_header_tail, split_colon, strip_keyword, DiagramError,
    DiagramKind, Direction, LineCursor, LineOutcome, ParseContext, Parser, Result, SourceLine,
    Span,
};

/// Class diagram parser
pub struct ClassParser {
    grammar: ChumskyClassParser,
}

/// Contents of a `{ ... }` class body
struct Body<'a> {
    members: Vec<ClassMember>,
    annotation: Option<String>,
    end: &'a SourceLine,
}

impl ClassParser {
    pub fn new() -> Self {
        Self {
            grammar: ChumskyClassParser::new(),
        }
    }

    fn parse_body<'a>(
        &self,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        open: &SourceLine,
    ) -> Result<Body<'a>> {
        let mut members = Vec::new();
        let mut annotation = None;

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();
            if text == "}" {
                return Ok(Body {
                    members,
                    annotation,
                    end: line,
                });
            }
            if let Some((value, None)) = self.grammar.parse_annotation(text) {
                annotation = Some(value);
                continue;
            }
            let outcome = LineOutcome::from(parse_member(text));
            if let Some(member) = outcome.resolve(ctx, line)? {
                members.push(member);
            }
        }

        Err(DiagramError::unclosed(DiagramKind::Class, "class", open.line))
    }

    /// Build a class from a header line, reading its body when one opens
    fn parse_class<'a>(
        &self,
        header: ClassHeader,
        line: &'a SourceLine,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
    ) -> Result<ClassDefinition> {
        let mut class = ClassDefinition::new(header.id);
        if let Some(label) = header.label {
            class.name = label;
        }
        class.generics = header.generics;
        class.span = Some(line.span());

        if header.opens_body {
            ctx.check_depth(depth + 1, line)?;
            let body = self.parse_body(cursor, ctx, line)?;
            class.members = body.members;
            class.annotation = body.annotation;
            class.span = Some(line.span().merge(body.end.span()));
        }
        trace!(id = %class.id, members = class.members.len(), "Parsed class");
        Ok(class)
    }

    fn parse_namespace<'a>(
        &self,
        name: &str,
        open: &'a SourceLine,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
        depth: usize,
    ) -> Result<ClassNamespace> {
        let mut classes: Vec<ClassDefinition> = Vec::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();
            if text == "}" {
                return Ok(ClassNamespace {
                    name: name.to_string(),
                    classes,
                    span: Some(open.span().merge(line.span())),
                });
            }
            let header = strip_keyword(text, "class")
                .and_then(|rest| self.grammar.parse_class_header(rest));
            match header {
                Some(header) => {
                    let class = self.parse_class(header, line, cursor, ctx, depth)?;
                    match classes.iter_mut().find(|existing| existing.id == class.id) {
                        Some(existing) => merge_class(existing, class),
                        None => classes.push(class),
                    }
                }
                None => ctx.skip(line, "only classes belong in a namespace"),
            }
        }

        Err(DiagramError::unclosed(DiagramKind::Class, "namespace", open.line))
    }
}

impl Default for ClassParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ClassParser {
    type Output = ClassDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<ClassDiagram> {
        let parse_span = span!(Level::INFO, "parse_class", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::Class)?;
        skip_header_tail(ctx, header);
        let mut diagram = ClassDiagram::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if text == "}" {
                return Err(DiagramError::unexpected_close(DiagramKind::Class, "}", line.line));
            }

            if let Some(rest) = strip_keyword(text, "direction") {
                match rest.parse::<Direction>() {
                    Ok(direction) => diagram.direction = Some(direction),
                    Err(_) => ctx.skip(line, "unknown direction"),
                }
                continue;
            }

            if let Some(name) = strip_keyword(text, "namespace").and_then(|rest| rest.strip_suffix('{')) {
                let name = name.trim();
                if !name.is_empty() {
                    ctx.check_depth(1, line)?;
                    let namespace = self.parse_namespace(name, line, &mut cursor, ctx, 1)?;
                    diagram.statements.push(ClassStatement::Namespace(namespace));
                    continue;
                }
            }

            if let Some(header) =
                strip_keyword(text, "class").and_then(|rest| self.grammar.parse_class_header(rest))
            {
                let class = self.parse_class(header, line, &mut cursor, ctx, 0)?;
                let id = class.id.clone();
                upsert_class(&mut diagram.statements, &id, line.span(), |existing| {
                    merge_class(existing, class)
                });
                continue;
            }

            if let Some(outcome) = self.classify(line, &mut diagram.statements) {
                if let Some(statement) = outcome.resolve(ctx, line)? {
                    diagram.statements.push(statement);
                }
            }
        }

        debug!(statements = diagram.statements.len(), "Parsed class diagram");
        let end = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        diagram.span = Some(header.span().merge(end));
        Ok(diagram)
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Class
    }

    fn name(&self) -> &'static str {
        "class"
    }
}

impl ClassParser {
    /// Classify a statement line. Lines that update an existing class
    /// return `None`.
    fn classify(
        &self,
        line: &SourceLine,
        statements: &mut Vec<ClassStatement>,
    ) -> Option<LineOutcome<ClassStatement>> {
        let text = line.text.as_str();
        let span = line.span();

        if let Some(rest) = strip_keyword(text, "note") {
            return Some(match self.grammar.parse_note(rest) {
                Some(mut note) => {
                    note.span = Some(span);
                    LineOutcome::Matched(ClassStatement::Note(note))
                }
                None => LineOutcome::Skipped("malformed note"),
            });
        }

        if let Some((annotation, target)) = self.grammar.parse_annotation(text) {
            let Some(id) = target else {
                return Some(LineOutcome::Skipped("annotation outside a class body"));
            };
            upsert_class(statements, &id, span, |class| class.annotation = Some(annotation));
            return None;
        }

        if let Some(mut relation) = self.grammar.parse_relation(text) {
            relation.span = Some(span);
            return Some(LineOutcome::Matched(ClassStatement::Relation(relation)));
        }

        if let Some((id, member)) = split_colon(text) {
            let id = id.trim();
            if is_identifier(id) {
                return match parse_member(member) {
                    Some(member) => {
                        upsert_class(statements, id, span, |class| class.members.push(member));
                        None
                    }
                    None => Some(LineOutcome::Skipped("malformed member")),
                };
            }
        }

        Some(LineOutcome::Skipped("not a class diagram statement"))
    }
}

fn find_class<'s>(statements: &'s mut [ClassStatement], id: &str) -> Option<&'s mut ClassDefinition> {
    statements.iter_mut().find_map(|statement| match statement {
        ClassStatement::Class(class) if class.id == id => Some(class),
        ClassStatement::Namespace(namespace) => {
            namespace.classes.iter_mut().find(|class| class.id == id)
        }
        _ => None,
    })
}

/// Apply `update` to the class `id`, declaring it first if needed
fn upsert_class(
    statements: &mut Vec<ClassStatement>,
    id: &str,
    span: Span,
    update: impl FnOnce(&mut ClassDefinition),
) {
    if let Some(class) = find_class(statements, id) {
        update(class);
        return;
    }
    let mut class = ClassDefinition::new(id);
    class.span = Some(span);
    update(&mut class);
    statements.push(ClassStatement::Class(class));
}

/// Fold a repeated declaration into the first one
fn merge_class(existing: &mut ClassDefinition, class: ClassDefinition) {
    if class.name != class.id {
        existing.name = class.name;
    }
    if class.generics.is_some() {
        existing.generics = class.generics;
    }
    if class.annotation.is_some() {
        existing.annotation = class.annotation;
    }
    existing.members.extend(class.members);
}
