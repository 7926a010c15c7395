//! Class diagram AST

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Outline, Outlined, RelationType, Span};

/// A parsed class diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub statements: Vec<ClassStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ClassDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(mut self, statement: impl Into<ClassStatement>) -> Self {
        self.statements.push(statement.into());
        self
    }

    /// Every class definition, including those inside namespaces
    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.statements.iter().flat_map(|statement| match statement {
            ClassStatement::Class(class) => std::slice::from_ref(class).iter(),
            ClassStatement::Namespace(namespace) => namespace.classes.iter(),
            _ => std::slice::Iter::default(),
        })
    }

    pub fn relations(&self) -> impl Iterator<Item = &ClassRelation> {
        self.statements.iter().filter_map(|statement| match statement {
            ClassStatement::Relation(relation) => Some(relation),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassStatement {
    Class(ClassDefinition),
    Relation(ClassRelation),
    Namespace(ClassNamespace),
    Note(ClassNote),
}

impl Outlined for ClassStatement {
    fn outline(&self) -> Outline {
        match self {
            ClassStatement::Class(class) => class.outline(),
            ClassStatement::Relation(_) => Outline::leaf("relation"),
            ClassStatement::Namespace(namespace) => {
                Outline::node("namespace", Outline::of_all(&namespace.classes))
            }
            ClassStatement::Note(_) => Outline::leaf("note"),
        }
    }
}

impl Outlined for ClassDefinition {
    fn outline(&self) -> Outline {
        Outline::node("class", Outline::of_all(&self.members))
    }
}

impl Outlined for ClassMember {
    fn outline(&self) -> Outline {
        match self.member_type {
            MemberType::Attribute => Outline::leaf("attribute"),
            MemberType::Method => Outline::leaf("method"),
        }
    }
}

/// A class; `name` differs from `id` only when a label was given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    /// Text of a `<<annotation>>`, without the angle brackets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub members: Vec<ClassMember>,
    /// Generic parameter written as `~T~`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            annotation: None,
            members: Vec::new(),
            generics: None,
            span: None,
        }
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// True when the body braces are needed to write this class
    pub fn has_body(&self) -> bool {
        self.annotation.is_some() || !self.members.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Attribute,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[serde(rename = "+")]
    Public,
    #[serde(rename = "-")]
    Private,
    #[serde(rename = "#")]
    Protected,
    #[serde(rename = "~")]
    Package,
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

/// An attribute or method line of a class body
///
/// For attributes `return_type` holds the declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    pub member_type: MemberType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Raw parameter list of a method, without parentheses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
}

impl ClassMember {
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            member_type: MemberType::Attribute,
            visibility: None,
            name: name.into(),
            return_type: None,
            parameters: None,
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn method(name: impl Into<String>, parameters: impl Into<String>) -> Self {
        Self {
            member_type: MemberType::Method,
            parameters: Some(parameters.into()),
            ..Self::attribute(name)
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn is_method(&self) -> bool {
        self.member_type == MemberType::Method
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRelation {
    pub from: String,
    pub to: String,
    pub relation_type: RelationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ClassRelation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation_type: RelationType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation_type,
            label: None,
            cardinality_from: None,
            cardinality_to: None,
            span: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNamespace {
    pub name: String,
    pub classes: Vec<ClassDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// `note for Class "text"` or a free-floating `note "text"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_class: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl From<ClassDefinition> for ClassStatement {
    fn from(value: ClassDefinition) -> Self {
        ClassStatement::Class(value)
    }
}

impl From<ClassRelation> for ClassStatement {
    fn from(value: ClassRelation) -> Self {
        ClassStatement::Relation(value)
    }
}

impl From<ClassNamespace> for ClassStatement {
    fn from(value: ClassNamespace) -> Self {
        ClassStatement::Namespace(value)
    }
}

impl From<ClassNote> for ClassStatement {
    fn from(value: ClassNote) -> Self {
        ClassStatement::Note(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_include_namespaced() {
        let diagram = ClassDiagram::new()
            .with_statement(ClassDefinition::new("A"))
            .with_statement(ClassNamespace {
                name: "N".into(),
                classes: vec![ClassDefinition::new("B"), ClassDefinition::new("C")],
                span: None,
            })
            .with_statement(ClassRelation::new("A", "B", RelationType::Link));
        let ids: Vec<_> = diagram.classes().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(diagram.relations().count(), 1);
    }

    #[test]
    fn test_outline_counts_members() {
        let class = ClassDefinition::new("A")
            .with_member(ClassMember::attribute("x"))
            .with_member(ClassMember::method("run", ""));
        let outline = ClassStatement::Class(class).outline();
        assert_eq!(outline.children[0].kind, "attribute");
        assert_eq!(outline.children[1].kind, "method");
    }

    #[test]
    fn test_visibility_serializes_as_sigil() {
        let member = ClassMember::attribute("x").with_visibility(Visibility::Protected);
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["visibility"], "#");
        assert_eq!(json["memberType"], "attribute");
    }
}
