//! Entity-relationship diagram AST

use serde::{Deserialize, Serialize};

use crate::core::{Cardinality, Identification, Outline, Outlined, Span};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErDiagram {
    pub statements: Vec<ErStatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ErDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(mut self, statement: impl Into<ErStatement>) -> Self {
        self.statements.push(statement.into());
        self
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.statements.iter().filter_map(|statement| match statement {
            ErStatement::Entity(entity) => Some(entity),
            _ => None,
        })
    }

    pub fn relationships(&self) -> impl Iterator<Item = &ErRelationship> {
        self.statements.iter().filter_map(|statement| match statement {
            ErStatement::Relationship(relationship) => Some(relationship),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErStatement {
    Entity(Entity),
    Relationship(ErRelationship),
}

impl Outlined for ErStatement {
    fn outline(&self) -> Outline {
        match self {
            ErStatement::Entity(entity) => Outline::node(
                "entity",
                entity.attributes.iter().map(|_| Outline::leaf("attribute")).collect(),
            ),
            ErStatement::Relationship(_) => Outline::leaf("relationship"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    /// Display name given as `NAME["alias"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub attributes: Vec<ErAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            attributes: Vec::new(),
            span: None,
        }
    }

    pub fn with_attribute(mut self, attribute: ErAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Pk,
    Fk,
    Uk,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Pk => "PK",
            KeyType::Fk => "FK",
            KeyType::Uk => "UK",
        }
    }
}

/// `type name [PK|FK|UK] ["comment"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ErAttribute {
    pub fn new(attr_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            key: None,
            comment: None,
        }
    }

    pub fn with_key(mut self, key: KeyType) -> Self {
        self.key = Some(key);
        self
    }
}

/// `FROM ||--o{ TO : label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErRelationship {
    pub from: String,
    pub to: String,
    pub from_cardinality: Cardinality,
    pub to_cardinality: Cardinality,
    pub identification: Identification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ErRelationship {
    pub fn new(
        from: impl Into<String>,
        from_cardinality: Cardinality,
        to: impl Into<String>,
        to_cardinality: Cardinality,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_cardinality,
            to_cardinality,
            identification: Identification::Identifying,
            label: None,
            span: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The six-character operator, e.g. `||--o{`
    pub fn operator(&self) -> String {
        format!(
            "{}{}{}",
            self.from_cardinality.left_symbol(),
            self.identification.symbol(),
            self.to_cardinality.right_symbol()
        )
    }
}

impl From<Entity> for ErStatement {
    fn from(value: Entity) -> Self {
        ErStatement::Entity(value)
    }
}

impl From<ErRelationship> for ErStatement {
    fn from(value: ErRelationship) -> Self {
        ErStatement::Relationship(value)
    }
}
