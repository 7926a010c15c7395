//! Sequence diagram code generator

use super::ast::{Branch, Message, Participant, SequenceDiagram, SequenceStatement};
use crate::core::{CodeWriter, DiagramKind, GenerateConfig, Generator};

/// Emits sequence diagram source text
///
/// Every statement kind is written by default. With
/// [`GenerateConfig::drop_unsupported_sequence_statements`] the output is
/// limited to what older generators produced: activation, create, destroy,
/// link, properties and autonumber lines are left out, and the contents of a
/// `box` are written without the box.
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    config: GenerateConfig,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn legacy(&self) -> bool {
        self.config.drop_unsupported_sequence_statements
    }

    fn write_body(&self, out: &mut CodeWriter, statements: &[SequenceStatement]) {
        for statement in statements {
            self.write_statement(out, statement);
        }
    }

    fn write_block(
        &self,
        out: &mut CodeWriter,
        keyword: &str,
        label: Option<&str>,
        statements: &[SequenceStatement],
        separator: &str,
        branches: &[Branch],
    ) {
        out.line(with_label(keyword, label));
        out.nested(|out| self.write_body(out, statements));
        for branch in branches {
            out.line(with_label(separator, branch.label.as_deref()));
            out.nested(|out| self.write_body(out, &branch.statements));
        }
        out.line("end");
    }

    fn write_statement(&self, out: &mut CodeWriter, statement: &SequenceStatement) {
        if self.legacy() && statement.is_legacy_unsupported() {
            if let SequenceStatement::Box(group) = statement {
                self.write_body(out, &group.statements);
            }
            return;
        }

        match statement {
            SequenceStatement::Participant(p) => out.line(participant_text("participant", p)),
            SequenceStatement::Actor(p) => out.line(participant_text("actor", p)),
            SequenceStatement::Message(m) => out.line(self.message_text(m)),
            SequenceStatement::Note(note) => out.line(format!(
                "Note {} {}: {}",
                note.position.keyword(),
                note.actors.join(","),
                note.text
            )),
            SequenceStatement::Loop(b) => {
                self.write_block(out, "loop", b.label.as_deref(), &b.statements, "", &[])
            }
            SequenceStatement::Opt(b) => {
                self.write_block(out, "opt", b.label.as_deref(), &b.statements, "", &[])
            }
            SequenceStatement::Break(b) => {
                self.write_block(out, "break", b.label.as_deref(), &b.statements, "", &[])
            }
            SequenceStatement::Alt(a) => self.write_block(
                out,
                "alt",
                a.label.as_deref(),
                &a.statements,
                "else",
                &a.else_blocks,
            ),
            SequenceStatement::Par(p) => self.write_block(
                out,
                "par",
                p.label.as_deref(),
                &p.statements,
                "and",
                &p.and_blocks,
            ),
            SequenceStatement::Critical(c) => self.write_block(
                out,
                "critical",
                c.label.as_deref(),
                &c.statements,
                "option",
                &c.option_blocks,
            ),
            SequenceStatement::Rect(r) => {
                self.write_block(out, "rect", r.color.as_deref(), &r.statements, "", &[])
            }
            SequenceStatement::Box(b) => {
                self.write_block(out, "box", b.label.as_deref(), &b.statements, "", &[])
            }
            SequenceStatement::Activate(a) => out.line(format!("activate {}", a.actor)),
            SequenceStatement::Deactivate(a) => out.line(format!("deactivate {}", a.actor)),
            SequenceStatement::Create(c) => {
                let mut text = format!("create {} {}", c.participant_kind.keyword(), c.id);
                if let Some(alias) = &c.alias {
                    text.push_str(" as ");
                    text.push_str(alias);
                }
                out.line(text);
            }
            SequenceStatement::Destroy(a) => out.line(format!("destroy {}", a.actor)),
            SequenceStatement::Link(l) => out.line(format!("link {}: {}", l.actor, l.text)),
            SequenceStatement::Properties(p) => {
                out.line(format!("properties {}: {}", p.actor, p.text))
            }
            SequenceStatement::Autonumber(a) => {
                let text = match (a.visible, a.start, a.step) {
                    (false, _, _) => "autonumber off".to_string(),
                    (true, Some(start), Some(step)) => format!("autonumber {} {}", start, step),
                    (true, Some(start), None) => format!("autonumber {}", start),
                    (true, None, _) => "autonumber".to_string(),
                };
                out.line(text);
            }
            SequenceStatement::Title(t) => out.line(format!("title {}", t.text)),
        }
    }

    fn message_text(&self, message: &Message) -> String {
        let activation = match message.activation {
            Some(activation) if !self.legacy() => activation.symbol(),
            _ => "",
        };
        let mut text = format!(
            "{}{}{}{}",
            message.from,
            message.arrow_type.symbol(),
            activation,
            message.to
        );
        if let Some(body) = &message.text {
            text.push_str(": ");
            text.push_str(body);
        }
        text
    }
}

impl Generator for SequenceGenerator {
    type Input = SequenceDiagram;

    fn generate(&self, diagram: &SequenceDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(DiagramKind::Sequence.canonical_keyword());
        out.nested(|out| self.write_body(out, &diagram.statements));
        out.finish()
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

fn with_label(keyword: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} {}", keyword, label),
        None => keyword.to_string(),
    }
}

fn participant_text(keyword: &str, participant: &Participant) -> String {
    match &participant.alias {
        Some(alias) => format!("{} {} as {}", keyword, participant.id, alias),
        None => format!("{} {}", keyword, participant.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrowType, Outline, Parser};
    use crate::plugins::sequence::{ActorRef, Activation, Alt, SequenceBox, SequenceParser};

    #[test]
    fn test_generates_messages() {
        let diagram = SequenceDiagram::new()
            .with_statement(SequenceStatement::Participant(
                Participant::new("A").with_alias("Alice"),
            ))
            .with_statement(SequenceStatement::Message(
                Message::new("A", "B", ArrowType::Solid).with_text("Hello"),
            ));
        assert_eq!(
            SequenceGenerator::new().generate(&diagram),
            "sequenceDiagram\n    participant A as Alice\n    A->>B: Hello\n"
        );
    }

    #[test]
    fn test_generates_branches() {
        let diagram = SequenceDiagram::new().with_statement(SequenceStatement::Alt(Alt {
            label: Some("ok".into()),
            statements: vec![SequenceStatement::Message(Message::new(
                "A",
                "B",
                ArrowType::SolidOpen,
            ))],
            else_blocks: vec![Branch {
                label: None,
                statements: vec![],
            }],
            span: None,
        }));
        assert_eq!(
            SequenceGenerator::new().generate(&diagram),
            "sequenceDiagram\n    alt ok\n        A->B\n    else\n    end\n"
        );
    }

    #[test]
    fn test_legacy_mode_drops_newer_statements() {
        let mut message = Message::new("A", "B", ArrowType::Solid).with_text("go");
        message.activation = Some(Activation::Activate);
        let diagram = SequenceDiagram::new()
            .with_statement(SequenceStatement::Box(SequenceBox {
                label: Some("Team".into()),
                statements: vec![SequenceStatement::Participant(Participant::new("A"))],
                span: None,
            }))
            .with_statement(SequenceStatement::Activate(ActorRef::new("A")))
            .with_statement(SequenceStatement::Message(message));

        let full = SequenceGenerator::new().generate(&diagram);
        assert!(full.contains("box Team"));
        assert!(full.contains("activate A"));
        assert!(full.contains("A->>+B: go"));

        let legacy = SequenceGenerator::with_config(
            GenerateConfig::default().drop_unsupported_sequence_statements(true),
        )
        .generate(&diagram);
        assert_eq!(legacy, "sequenceDiagram\n    participant A\n    A->>B: go\n");
    }

    #[test]
    fn test_round_trip_preserves_outline() {
        let input = "sequenceDiagram\n  title Demo\n  autonumber\n  actor U as User\n  U->>+S: request\n  loop retry\n    S-->>U: wait\n  end\n  par\n    S-)A: a\n  and\n    S-)B: b\n  end\n  Note over U,S: done\n  rect rgb(1,2,3)\n    S--xU: fail\n  end";
        let parser = SequenceParser::new();
        let first = parser.parse(input).unwrap();
        let text = SequenceGenerator::new().generate(&first);
        let second = parser.parse(&text).unwrap();
        assert_eq!(
            Outline::of_all(&first.statements),
            Outline::of_all(&second.statements)
        );
    }
}
