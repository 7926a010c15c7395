//! Entity-relationship diagram parser
//!
//! Relationships are single lines; entities are either a bare name or a
//! `NAME { ... }` attribute block. Entities are only created by those two
//! forms, never implied by a relationship.

use tracing::{debug, span, trace, Level};

use super::ast::{Entity, ErDiagram, ErStatement};
use super::chumsky_parser::{ChumskyErParser, EntityHeader};
use crate::core::{
    expect_header, skip_header_tail, DiagramError, DiagramKind, LineCursor, LineOutcome,
    ParseContext, Parser, Result, SourceLine,
};

/// ER diagram parser
pub struct ErParser {
    grammar: ChumskyErParser,
}

impl ErParser {
    pub fn new() -> Self {
        Self {
            grammar: ChumskyErParser::new(),
        }
    }

    fn parse_entity<'a>(
        &self,
        header: EntityHeader,
        open: &'a SourceLine,
        cursor: &mut LineCursor<'a>,
        ctx: &mut ParseContext,
    ) -> Result<Entity> {
        let mut entity = Entity::new(header.name);
        entity.alias = header.alias;
        entity.span = Some(open.span());
        if !header.opens_body {
            return Ok(entity);
        }

        ctx.check_depth(1, open)?;
        while let Some(line) = cursor.next() {
            if line.text == "}" {
                entity.span = Some(open.span().merge(line.span()));
                trace!(entity = %entity.name, attributes = entity.attributes.len(), "Parsed entity");
                return Ok(entity);
            }
            let outcome = LineOutcome::from(self.grammar.parse_attribute(&line.text));
            if let Some(attribute) = outcome.resolve(ctx, line)? {
                entity.attributes.push(attribute);
            }
        }

        Err(DiagramError::unclosed(DiagramKind::Er, "entity", open.line))
    }
}

impl Default for ErParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ErParser {
    type Output = ErDiagram;

    fn parse_lines(&self, lines: &[SourceLine], ctx: &mut ParseContext) -> Result<ErDiagram> {
        let parse_span = span!(Level::INFO, "parse_er", lines = lines.len());
        let _enter = parse_span.enter();

        let mut cursor = LineCursor::new(lines);
        let header = expect_header(&mut cursor, DiagramKind::Er)?;
        skip_header_tail(ctx, header);
        let mut diagram = ErDiagram::new();

        while let Some(line) = cursor.next() {
            let text = line.text.as_str();

            if text == "}" {
                return Err(DiagramError::unexpected_close(DiagramKind::Er, "}", line.line));
            }

            if let Some(mut relationship) = self.grammar.parse_relationship(text) {
                relationship.span = Some(line.span());
                diagram.statements.push(ErStatement::Relationship(relationship));
                continue;
            }

            match self.grammar.parse_entity_header(text) {
                Some(entity_header) => {
                    let entity = self.parse_entity(entity_header, line, &mut cursor, ctx)?;
                    merge_entity(&mut diagram.statements, entity);
                }
                None => ctx.skip(line, "not a relationship or entity"),
            }
        }

        debug!(statements = diagram.statements.len(), "Parsed ER diagram");
        let end = lines.last().map(SourceLine::span).unwrap_or_else(|| header.span());
        diagram.span = Some(header.span().merge(end));
        Ok(diagram)
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Er
    }

    fn name(&self) -> &'static str {
        "er"
    }
}

/// Repeated entity blocks extend the first declaration
fn merge_entity(statements: &mut Vec<ErStatement>, entity: Entity) {
    let existing = statements.iter_mut().find_map(|statement| match statement {
        ErStatement::Entity(existing) if existing.name == entity.name => Some(existing),
        _ => None,
    });
    match existing {
        Some(existing) => {
            if entity.alias.is_some() {
                existing.alias = entity.alias;
            }
            existing.attributes.extend(entity.attributes);
        }
        None => statements.push(ErStatement::Entity(entity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cardinality, ParseConfig};
    use crate::plugins::er::KeyType;

    fn parse(input: &str) -> ErDiagram {
        ErParser::new().parse(input).unwrap()
    }

    #[test]
    fn test_relationship_line() {
        let diagram = parse("erDiagram\nA ||--o{ B : has");
        let rel = diagram.relationships().next().unwrap();
        assert_eq!(rel.from_cardinality, Cardinality::ExactlyOne);
        assert_eq!(rel.to_cardinality, Cardinality::ZeroOrMore);
        assert_eq!(rel.label.as_deref(), Some("has"));
        assert_eq!(diagram.entities().count(), 0);
    }

    #[test]
    fn test_entity_blocks() {
        let diagram = parse(
            "erDiagram\n  CUSTOMER {\n    string name PK\n    string email UK \"contact\"\n  }\n  ORDER\n  CUSTOMER ||--o{ ORDER : places",
        );
        let entities: Vec<_> = diagram.entities().collect();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].attributes.len(), 2);
        assert_eq!(entities[0].attributes[0].key, Some(KeyType::Pk));
        assert_eq!(entities[0].attributes[1].comment.as_deref(), Some("contact"));
        assert!(entities[1].attributes.is_empty());
        let span = entities[0].span.unwrap();
        assert_eq!((span.start.line, span.end.line), (2, 5));
    }

    #[test]
    fn test_repeated_entities_merge() {
        let diagram = parse("erDiagram\n  A {\n    int x\n  }\n  A[\"Alpha\"] {\n    int y\n  }\n  A");
        let entities: Vec<_> = diagram.entities().collect();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].alias.as_deref(), Some("Alpha"));
        assert_eq!(entities[0].attributes.len(), 2);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let lines = crate::core::lex("erDiagram\n  A {\n    nonsense\n  }\n  A -- B");
        let mut ctx = ParseContext::new(ParseConfig::default());
        ctx.set_dialect(DiagramKind::Er);
        let diagram = ErParser::new().parse_lines(&lines, &mut ctx).unwrap();
        assert_eq!(diagram.statements.len(), 1);
        let skipped: Vec<_> = ctx.skipped().iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![3, 5]);
    }

    #[test]
    fn test_unbalanced_braces_are_fatal() {
        let err = ErParser::new().parse("erDiagram\n  A {\n    int x").unwrap_err();
        assert!(matches!(err, DiagramError::UnbalancedBlock { line: 2, .. }));
        let err = ErParser::new().parse("erDiagram\n  }").unwrap_err();
        assert!(matches!(err, DiagramError::UnbalancedBlock { line: 2, .. }));
    }
}
