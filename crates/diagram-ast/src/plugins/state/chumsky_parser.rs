//! State statement parser using chumsky

use chumsky::prelude::*;

use super::ast::{StateNotePosition, StateTransition, StateType, PSEUDO_STATE};
use crate::core::chumsky_utils::{colon_text, inline_whitespace, inline_whitespace_required, quoted_string};
use crate::core::is_ident_char;

/// A `state` declaration line
#[derive(Debug, Clone, PartialEq)]
pub struct StateHeader {
    pub id: String,
    pub label: Option<String>,
    pub state_type: StateType,
    pub opens_body: bool,
}

/// A `note left of X` line; `text` is `None` when the note continues
/// until `end note`
#[derive(Debug, Clone, PartialEq)]
pub struct NoteHeader {
    pub position: StateNotePosition,
    pub state: String,
    pub text: Option<String>,
}

/// Chumsky-based state statement parser
pub struct ChumskyStateParser;

impl ChumskyStateParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_transition(&self, input: &str) -> Option<StateTransition> {
        Self::transition_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    pub fn parse_state_header(&self, input: &str) -> Option<StateHeader> {
        Self::state_header_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    pub fn parse_note(&self, input: &str) -> Option<NoteHeader> {
        Self::note_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// State ids stop at `-` so that `A-->B` splits correctly
    fn state_id<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        any()
            .filter(|c: &char| is_ident_char(*c))
            .repeated()
            .at_least(1)
            .to_slice()
            .map(|s: &str| s.to_string())
            .labelled("state id")
    }

    fn state_ref<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        just(PSEUDO_STATE)
            .to(PSEUDO_STATE.to_string())
            .or(Self::state_id())
    }

    fn transition_parser<'src>() -> impl Parser<'src, &'src str, StateTransition> + Clone {
        Self::state_ref()
            .then_ignore(inline_whitespace())
            .then_ignore(just("-->"))
            .then_ignore(inline_whitespace())
            .then(Self::state_ref())
            .then(colon_text())
            .then_ignore(inline_whitespace())
            .map(|((from, to), label)| StateTransition {
                from,
                to,
                label: label.filter(|l| !l.is_empty()),
                span: None,
            })
    }

    fn state_header_parser<'src>() -> impl Parser<'src, &'src str, StateHeader> + Clone {
        let described = quoted_string()
            .then_ignore(inline_whitespace_required())
            .then_ignore(just("as"))
            .then_ignore(inline_whitespace_required())
            .then(Self::state_id())
            .map(|(label, id)| (id, Some(label)));
        let plain = Self::state_id().map(|id| (id, None));

        let stereotype = just("<<")
            .ignore_then(choice((
                just("fork").to(StateType::Fork),
                just("join").to(StateType::Join),
                just("choice").to(StateType::Choice),
            )))
            .then_ignore(just(">>"));

        just("state")
            .ignore_then(inline_whitespace_required())
            .ignore_then(described.or(plain))
            .then(inline_whitespace().ignore_then(stereotype).or_not())
            .then(inline_whitespace().ignore_then(just('{')).or_not())
            .then_ignore(inline_whitespace())
            .map(|(((id, label), state_type), brace)| StateHeader {
                id,
                label,
                state_type: state_type.unwrap_or_default(),
                opens_body: brace.is_some(),
            })
    }

    fn note_parser<'src>() -> impl Parser<'src, &'src str, NoteHeader> + Clone {
        let position = just("left")
            .to(StateNotePosition::Left)
            .or(just("right").to(StateNotePosition::Right));

        just("note")
            .ignore_then(inline_whitespace_required())
            .ignore_then(position)
            .then_ignore(inline_whitespace_required())
            .then_ignore(just("of"))
            .then_ignore(inline_whitespace_required())
            .then(Self::state_id())
            .then(colon_text())
            .then_ignore(inline_whitespace())
            .map(|((position, state), text)| NoteHeader {
                position,
                state,
                text,
            })
    }
}

impl Default for ChumskyStateParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ChumskyStateParser {
        ChumskyStateParser::new()
    }

    #[test]
    fn test_transitions() {
        let t = parser().parse_transition("[*] --> Idle").unwrap();
        assert_eq!((t.from.as_str(), t.to.as_str()), ("[*]", "Idle"));
        assert_eq!(t.label, None);

        let t = parser().parse_transition("Idle-->Running : start now").unwrap();
        assert_eq!(t.to, "Running");
        assert_eq!(t.label.as_deref(), Some("start now"));

        assert!(parser().parse_transition("Idle -> Running").is_none());
    }

    #[test]
    fn test_state_headers() {
        let h = parser().parse_state_header("state \"Waiting for input\" as Waiting").unwrap();
        assert_eq!(h.id, "Waiting");
        assert_eq!(h.label.as_deref(), Some("Waiting for input"));
        assert!(!h.opens_body);

        let h = parser().parse_state_header("state Active {").unwrap();
        assert!(h.opens_body);

        let h = parser().parse_state_header("state split <<fork>>").unwrap();
        assert_eq!(h.state_type, StateType::Fork);

        assert!(parser().parse_state_header("stateful").is_none());
    }

    #[test]
    fn test_notes() {
        let n = parser().parse_note("note right of Idle : waits here").unwrap();
        assert_eq!(n.position, StateNotePosition::Right);
        assert_eq!(n.state, "Idle");
        assert_eq!(n.text.as_deref(), Some("waits here"));

        let n = parser().parse_note("note left of Idle").unwrap();
        assert_eq!(n.text, None);

        assert!(parser().parse_note("note over Idle : x").is_none());
    }
}
