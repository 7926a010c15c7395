//! State diagram AST
//!
//! Composite states own their inner statement list, so a diagram is a tree
//! of scopes. Pseudo-states (`[*]`) are kept verbatim on transitions.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Outline, Outlined, Span};

/// Endpoint text used for start and end pseudo-states
pub const PSEUDO_STATE: &str = "[*]";

/// A parsed state diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub statements: Vec<StateStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl StateDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(mut self, statement: impl Into<StateStatement>) -> Self {
        self.statements.push(statement.into());
        self
    }

    /// Top-level states only; composite children stay in their state
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.statements.iter().filter_map(|statement| match statement {
            StateStatement::State(state) => Some(state),
            _ => None,
        })
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.statements.iter().filter_map(|statement| match statement {
            StateStatement::Transition(transition) => Some(transition),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateStatement {
    State(State),
    Transition(StateTransition),
    Note(StateNote),
    Divider(Divider),
}

impl Outlined for StateStatement {
    fn outline(&self) -> Outline {
        match self {
            StateStatement::State(state) => match &state.composite_states {
                Some(inner) => Outline::node("composite", Outline::of_all(inner)),
                None => Outline::leaf("state"),
            },
            StateStatement::Transition(_) => Outline::leaf("transition"),
            StateStatement::Note(_) => Outline::leaf("note"),
            StateStatement::Divider(_) => Outline::leaf("divider"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateType {
    #[default]
    State,
    Fork,
    Join,
    Choice,
    /// Kind of a transition source written `[*]`, see [`StateTransition::from_kind`]
    ///
    /// There is no declaration syntax for it, so a declared state of this
    /// type is generated as a plain `state` line.
    Start,
    /// Kind of a transition target written `[*]`, see [`StateTransition::to_kind`]
    End,
}

impl StateType {
    /// The `<<...>>` stereotype for special states
    pub fn stereotype(&self) -> Option<&'static str> {
        match self {
            StateType::Fork => Some("fork"),
            StateType::Join => Some("join"),
            StateType::Choice => Some("choice"),
            StateType::State | StateType::Start | StateType::End => None,
        }
    }
}

/// A declared state
///
/// `label` comes from `state "label" as Id`; `description` collects the
/// `Id : text` lines, joined with newlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    #[serde(rename = "type")]
    pub state_type: StateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_states: Option<Vec<StateStatement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl State {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state_type: StateType::State,
            label: None,
            description: None,
            composite_states: None,
            span: None,
        }
    }

    pub fn with_type(mut self, state_type: StateType) -> Self {
        self.state_type = state_type;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_child(mut self, statement: impl Into<StateStatement>) -> Self {
        self.composite_states
            .get_or_insert_with(Vec::new)
            .push(statement.into());
        self
    }

    pub fn is_composite(&self) -> bool {
        self.composite_states.is_some()
    }

    /// Append one description line
    pub fn describe(&mut self, text: &str) {
        match &mut self.description {
            Some(description) => {
                description.push('\n');
                description.push_str(text);
            }
            None => self.description = Some(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransition {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl StateTransition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            span: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `START` when the source is `[*]`
    pub fn from_kind(&self) -> StateType {
        if self.from == PSEUDO_STATE {
            StateType::Start
        } else {
            StateType::State
        }
    }

    /// `END` when the target is `[*]`
    pub fn to_kind(&self) -> StateType {
        if self.to == PSEUDO_STATE {
            StateType::End
        } else {
            StateType::State
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateNotePosition {
    Left,
    Right,
}

impl StateNotePosition {
    pub fn keyword(&self) -> &'static str {
        match self {
            StateNotePosition::Left => "left of",
            StateNotePosition::Right => "right of",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateNote {
    pub state: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<StateNotePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl StateNote {
    pub fn new(state: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            note: note.into(),
            position: None,
            span: None,
        }
    }

    pub fn with_position(mut self, position: StateNotePosition) -> Self {
        self.position = Some(position);
        self
    }
}

/// `--` between concurrent regions of a composite state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Divider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl From<State> for StateStatement {
    fn from(value: State) -> Self {
        StateStatement::State(value)
    }
}

impl From<StateTransition> for StateStatement {
    fn from(value: StateTransition) -> Self {
        StateStatement::Transition(value)
    }
}

impl From<StateNote> for StateStatement {
    fn from(value: StateNote) -> Self {
        StateStatement::Note(value)
    }
}

impl From<Divider> for StateStatement {
    fn from(value: Divider) -> Self {
        StateStatement::Divider(value)
    }
}
