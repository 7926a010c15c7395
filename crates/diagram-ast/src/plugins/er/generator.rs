//! ER diagram code generator

use super::ast::{Entity, ErAttribute, ErDiagram, ErRelationship, ErStatement};
use crate::core::{is_identifier, quote, quote_if_needed, CodeWriter, DiagramKind, GenerateConfig, Generator};

/// Emits ER diagram source text
#[derive(Debug, Clone, Default)]
pub struct ErGenerator {
    config: GenerateConfig,
}

impl ErGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn write_entity(&self, out: &mut CodeWriter, entity: &Entity) {
        let mut head = entity_name(&entity.name);
        if let Some(alias) = &entity.alias {
            head.push_str(&format!("[{}]", quote(alias)));
        }
        if entity.attributes.is_empty() {
            out.line(head);
            return;
        }
        out.line(format!("{} {{", head));
        out.nested(|out| {
            for attribute in &entity.attributes {
                out.line(attribute_text(attribute));
            }
        });
        out.line("}");
    }
}

impl Generator for ErGenerator {
    type Input = ErDiagram;

    fn generate(&self, diagram: &ErDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(DiagramKind::Er.canonical_keyword());
        out.nested(|out| {
            for statement in &diagram.statements {
                match statement {
                    ErStatement::Entity(entity) => self.write_entity(out, entity),
                    ErStatement::Relationship(relationship) => {
                        out.line(relationship_text(relationship))
                    }
                }
            }
        });
        out.finish()
    }

    fn name(&self) -> &'static str {
        "er"
    }
}

fn entity_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn attribute_text(attribute: &ErAttribute) -> String {
    let mut text = format!("{} {}", attribute.attr_type, attribute.name);
    if let Some(key) = attribute.key {
        text.push(' ');
        text.push_str(key.as_str());
    }
    if let Some(comment) = &attribute.comment {
        text.push(' ');
        text.push_str(&quote(comment));
    }
    text
}

fn relationship_text(relationship: &ErRelationship) -> String {
    let mut text = format!(
        "{} {} {}",
        entity_name(&relationship.from),
        relationship.operator(),
        entity_name(&relationship.to)
    );
    if let Some(label) = &relationship.label {
        text.push_str(" : ");
        text.push_str(&quote_if_needed(label));
    }
    text
}
