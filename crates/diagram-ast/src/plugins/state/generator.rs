//! State diagram code generator

use super::ast::{State, StateDiagram, StateNote, StateNotePosition, StateStatement, StateTransition};
use crate::core::{quote, quote_if_needed, CodeWriter, DiagramKind, GenerateConfig, Generator};

/// Emits state diagram source text
#[derive(Debug, Clone, Default)]
pub struct StateGenerator {
    config: GenerateConfig,
}

impl StateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn write_statements(&self, out: &mut CodeWriter, statements: &[StateStatement]) {
        for statement in statements {
            match statement {
                StateStatement::State(state) => self.write_state(out, state),
                StateStatement::Transition(transition) => out.line(transition_text(transition)),
                StateStatement::Note(note) => write_note(out, note),
                StateStatement::Divider(_) => out.line("--"),
            }
        }
    }

    /// Declaration line, optional body, then one line per description part
    ///
    /// Only fork, join and choice carry a stereotype; `Start` and `End`
    /// declarations are written as plain states.
    fn write_state(&self, out: &mut CodeWriter, state: &State) {
        let mut head = match &state.label {
            Some(label) => format!("state {} as {}", quote(label), state.id),
            None => format!("state {}", state.id),
        };
        if let Some(stereotype) = state.state_type.stereotype() {
            head.push_str(&format!(" <<{}>>", stereotype));
        }

        match &state.composite_states {
            Some(inner) => {
                out.line(format!("{} {{", head));
                out.nested(|out| self.write_statements(out, inner));
                out.line("}");
            }
            None => out.line(head),
        }

        if let Some(description) = &state.description {
            for part in description.split('\n') {
                out.line(format!("{} : {}", state.id, part));
            }
        }
    }
}

impl Generator for StateGenerator {
    type Input = StateDiagram;

    fn generate(&self, diagram: &StateDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(DiagramKind::State.canonical_keyword());
        out.nested(|out| {
            if let Some(direction) = diagram.direction {
                out.line(format!("direction {}", direction));
            }
            self.write_statements(out, &diagram.statements);
        });
        out.finish()
    }

    fn name(&self) -> &'static str {
        "state"
    }
}

fn transition_text(transition: &StateTransition) -> String {
    match &transition.label {
        Some(label) => format!(
            "{} --> {} : {}",
            transition.from,
            transition.to,
            quote_if_needed(label)
        ),
        None => format!("{} --> {}", transition.from, transition.to),
    }
}

/// Multi-line notes use the `end note` form
fn write_note(out: &mut CodeWriter, note: &StateNote) {
    let position = note.position.unwrap_or(StateNotePosition::Right).keyword();
    if note.note.contains('\n') {
        out.line(format!("note {} {}", position, note.state));
        out.nested(|out| {
            for line in note.note.lines() {
                out.line(line);
            }
        });
        out.line("end note");
    } else {
        out.line(format!(
            "note {} {} : {}",
            position,
            note.state,
            quote_if_needed(&note.note)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outline, Parser};
    use crate::plugins::state::{StateParser, StateType};

    #[test]
    fn test_generates_states_and_transitions() {
        let diagram = StateDiagram::new()
            .with_statement(State::new("Idle").with_description("waiting"))
            .with_statement(StateTransition::new("[*]", "Idle"))
            .with_statement(StateTransition::new("Idle", "[*]").with_label("done"));
        assert_eq!(
            StateGenerator::new().generate(&diagram),
            "stateDiagram-v2\n    state Idle\n    Idle : waiting\n    [*] --> Idle\n    Idle --> [*] : done\n"
        );
    }

    #[test]
    fn test_pseudo_state_declarations_are_plain_states() {
        for state_type in [StateType::Start, StateType::End] {
            let diagram = StateDiagram::new()
                .with_statement(State::new("S").with_type(state_type))
                .with_statement(StateTransition::new("[*]", "S"))
                .with_statement(StateTransition::new("S", "[*]"));
            let text = StateGenerator::new().generate(&diagram);
            assert_eq!(text, "stateDiagram-v2\n    state S\n    [*] --> S\n    S --> [*]\n");

            let reparsed = StateParser::new().parse(&text).unwrap();
            let StateStatement::State(state) = &reparsed.statements[0] else {
                panic!("expected a state declaration");
            };
            assert_eq!(state.state_type, StateType::State);
            let kinds: Vec<_> = reparsed
                .transitions()
                .map(|t| (t.from_kind(), t.to_kind()))
                .collect();
            assert_eq!(
                kinds,
                vec![
                    (StateType::Start, StateType::State),
                    (StateType::State, StateType::End)
                ]
            );
        }
    }

    #[test]
    fn test_generates_composites_and_notes() {
        let diagram = StateDiagram::new()
            .with_statement(
                State::new("Active")
                    .with_child(State::new("split").with_type(StateType::Fork))
                    .with_child(StateNote::new("split", "a\nb").with_position(StateNotePosition::Left)),
            );
        assert_eq!(
            StateGenerator::new().generate(&diagram),
            "stateDiagram-v2\n    state Active {\n        state split <<fork>>\n        note left of split\n            a\n            b\n        end note\n    }\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_outline() {
        let input = "stateDiagram-v2\n  direction LR\n  [*] --> Off\n  state \"Powered on\" as On {\n    [*] --> Idle\n    Idle --> Busy : job arrives\n    --\n    state pick <<choice>>\n  }\n  On : two\n  On : lines\n  Off --> On\n  note right of Off : unplugged\n  note left of On\n    stays on\n    until reset\n  end note";
        let parser = StateParser::new();
        let first = parser.parse(input).unwrap();
        let text = StateGenerator::new().generate(&first);
        let second = parser.parse(&text).unwrap();
        assert_eq!(Outline::of_all(&first.statements), Outline::of_all(&second.statements));
        assert_eq!(first.direction, second.direction);
        let on = second.states().next().unwrap();
        assert_eq!(on.label.as_deref(), Some("Powered on"));
        assert_eq!(on.description.as_deref(), Some("two\nlines"));
    }
}
