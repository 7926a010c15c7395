//! Class diagram code generator

use super::ast::{ClassDefinition, ClassDiagram, ClassMember, ClassRelation, ClassStatement, MemberType};
use crate::core::{quote, CodeWriter, DiagramKind, GenerateConfig, Generator};

/// Emits class diagram source text
#[derive(Debug, Clone, Default)]
pub struct ClassGenerator {
    config: GenerateConfig,
}

impl ClassGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn write_class(&self, out: &mut CodeWriter, class: &ClassDefinition) {
        let mut head = format!("class {}", class.id);
        if let Some(generics) = &class.generics {
            head.push_str(&format!("~{}~", generics));
        }
        if class.name != class.id {
            head.push_str(&format!("[{}]", quote(&class.name)));
        }
        if !class.has_body() {
            out.line(head);
            return;
        }
        out.line(format!("{} {{", head));
        out.nested(|out| {
            if let Some(annotation) = &class.annotation {
                out.line(format!("<<{}>>", annotation));
            }
            for member in &class.members {
                out.line(member_text(member));
            }
        });
        out.line("}");
    }
}

impl Generator for ClassGenerator {
    type Input = ClassDiagram;

    fn generate(&self, diagram: &ClassDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(DiagramKind::Class.canonical_keyword());
        out.nested(|out| {
            if let Some(direction) = diagram.direction {
                out.line(format!("direction {}", direction));
            }
            for statement in &diagram.statements {
                match statement {
                    ClassStatement::Class(class) => self.write_class(out, class),
                    ClassStatement::Relation(relation) => out.line(relation_text(relation)),
                    ClassStatement::Namespace(namespace) => {
                        out.line(format!("namespace {} {{", namespace.name));
                        out.nested(|out| {
                            for class in &namespace.classes {
                                self.write_class(out, class);
                            }
                        });
                        out.line("}");
                    }
                    ClassStatement::Note(note) => match &note.for_class {
                        Some(class) => out.line(format!("note for {} {}", class, quote(&note.text))),
                        None => out.line(format!("note {}", quote(&note.text))),
                    },
                }
            }
        });
        out.finish()
    }

    fn name(&self) -> &'static str {
        "class"
    }
}

fn classifiers(member: &ClassMember) -> &'static str {
    match (member.is_static, member.is_abstract) {
        (true, true) => "$*",
        (true, false) => "$",
        (false, true) => "*",
        (false, false) => "",
    }
}

fn member_text(member: &ClassMember) -> String {
    let visibility = member.visibility.map(|v| v.to_char().to_string()).unwrap_or_default();
    match member.member_type {
        MemberType::Method => {
            let mut text = format!(
                "{}{}({}){}",
                visibility,
                member.name,
                member.parameters.as_deref().unwrap_or_default(),
                classifiers(member)
            );
            if let Some(return_type) = &member.return_type {
                text.push(' ');
                text.push_str(return_type);
            }
            text
        }
        MemberType::Attribute => match &member.return_type {
            Some(ty) => format!("{}{} {}{}", visibility, ty, member.name, classifiers(member)),
            None => format!("{}{}{}", visibility, member.name, classifiers(member)),
        },
    }
}

fn relation_text(relation: &ClassRelation) -> String {
    let mut text = relation.from.clone();
    if let Some(cardinality) = &relation.cardinality_from {
        text.push(' ');
        text.push_str(&quote(cardinality));
    }
    text.push(' ');
    text.push_str(relation.relation_type.symbol());
    if let Some(cardinality) = &relation.cardinality_to {
        text.push(' ');
        text.push_str(&quote(cardinality));
    }
    text.push(' ');
    text.push_str(&relation.to);
    if let Some(label) = &relation.label {
        text.push_str(" : ");
        text.push_str(label);
    }
    text
}
