//! Sequence diagram AST

use serde::{Deserialize, Serialize};

use crate::core::{ArrowType, Outline, Outlined, Span};

/// A parsed sequence diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDiagram {
    pub statements: Vec<SequenceStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl SequenceDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(mut self, statement: SequenceStatement) -> Self {
        self.statements.push(statement);
        self
    }
}

/// One sequence statement; block variants own their nested statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceStatement {
    Participant(Participant),
    Actor(Participant),
    Message(Message),
    Note(Note),
    Loop(Block),
    Alt(Alt),
    Opt(Block),
    Par(Par),
    Critical(Critical),
    Break(Block),
    Rect(Rect),
    Box(SequenceBox),
    Activate(ActorRef),
    Deactivate(ActorRef),
    Create(Create),
    Destroy(ActorRef),
    Link(ActorText),
    Properties(ActorText),
    Autonumber(Autonumber),
    Title(Title),
}

impl SequenceStatement {
    /// Statement kinds the legacy generator never emitted
    pub fn is_legacy_unsupported(&self) -> bool {
        matches!(
            self,
            SequenceStatement::Activate(_)
                | SequenceStatement::Deactivate(_)
                | SequenceStatement::Create(_)
                | SequenceStatement::Destroy(_)
                | SequenceStatement::Box(_)
                | SequenceStatement::Link(_)
                | SequenceStatement::Properties(_)
                | SequenceStatement::Autonumber(_)
        )
    }
}

fn branching(
    kind: &'static str,
    branch_kind: &'static str,
    statements: &[SequenceStatement],
    branches: &[Branch],
) -> Outline {
    let mut children = Outline::of_all(statements);
    children.extend(
        branches
            .iter()
            .map(|branch| Outline::node(branch_kind, Outline::of_all(&branch.statements))),
    );
    Outline::node(kind, children)
}

impl Outlined for SequenceStatement {
    fn outline(&self) -> Outline {
        let block = |kind, statements: &[SequenceStatement]| {
            Outline::node(kind, Outline::of_all(statements))
        };
        match self {
            SequenceStatement::Participant(_) => Outline::leaf("participant"),
            SequenceStatement::Actor(_) => Outline::leaf("actor"),
            SequenceStatement::Message(_) => Outline::leaf("message"),
            SequenceStatement::Note(_) => Outline::leaf("note"),
            SequenceStatement::Loop(b) => block("loop", &b.statements),
            SequenceStatement::Opt(b) => block("opt", &b.statements),
            SequenceStatement::Break(b) => block("break", &b.statements),
            SequenceStatement::Rect(r) => block("rect", &r.statements),
            SequenceStatement::Box(b) => block("box", &b.statements),
            SequenceStatement::Alt(a) => branching("alt", "else", &a.statements, &a.else_blocks),
            SequenceStatement::Par(p) => branching("par", "and", &p.statements, &p.and_blocks),
            SequenceStatement::Critical(c) => {
                branching("critical", "option", &c.statements, &c.option_blocks)
            }
            SequenceStatement::Activate(_) => Outline::leaf("activate"),
            SequenceStatement::Deactivate(_) => Outline::leaf("deactivate"),
            SequenceStatement::Create(_) => Outline::leaf("create"),
            SequenceStatement::Destroy(_) => Outline::leaf("destroy"),
            SequenceStatement::Link(_) => Outline::leaf("link"),
            SequenceStatement::Properties(_) => Outline::leaf("properties"),
            SequenceStatement::Autonumber(_) => Outline::leaf("autonumber"),
            SequenceStatement::Title(_) => Outline::leaf("title"),
        }
    }
}

/// `participant A as Alice` (also used for `actor`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: None,
            span: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// `+`/`-` shorthand on a message target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Activate,
    Deactivate,
}

impl Activation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Activation::Activate => "+",
            Activation::Deactivate => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub from: String,
    pub to: String,
    pub arrow_type: ArrowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Message {
    pub fn new(from: impl Into<String>, to: impl Into<String>, arrow_type: ArrowType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            arrow_type,
            text: None,
            activation: None,
            span: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotePosition {
    Left,
    Right,
    Over,
}

impl NotePosition {
    pub fn keyword(&self) -> &'static str {
        match self {
            NotePosition::Left => "left of",
            NotePosition::Right => "right of",
            NotePosition::Over => "over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub position: NotePosition,
    pub actors: Vec<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `loop`, `opt` and `break` blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// One `else`, `and` or `option` branch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
    pub else_blocks: Vec<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Par {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
    pub and_blocks: Vec<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Critical {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
    pub option_blocks: Vec<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `rect rgb(...)` highlight
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub statements: Vec<SequenceStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `box Aqua Group` participant grouping
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub statements: Vec<SequenceStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRef {
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ActorRef {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            span: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Participant,
    Actor,
}

impl ParticipantKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ParticipantKind::Participant => "participant",
            ParticipantKind::Actor => "actor",
        }
    }
}

/// `create participant X`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    pub participant_kind: ParticipantKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `link A: text` and `properties A: text`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorText {
    pub actor: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autonumber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u64>,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}
