//! Operator token tables shared by grammars and generators
//!
//! Each table is ordered longest symbol first so that scanning with
//! `starts_with` never lets a short operator shadow a longer one
//! (`--` must not match the front of `-->`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence message arrows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowType {
    /// `->>`
    Solid,
    /// `-->>`
    Dotted,
    /// `->`
    SolidOpen,
    /// `-->`
    DottedOpen,
    /// `-x`
    SolidCross,
    /// `--x`
    DottedCross,
    /// `-)`
    SolidPoint,
    /// `--)`
    DottedPoint,
}

const ARROW_TABLE: [(&str, ArrowType); 8] = [
    ("-->>", ArrowType::Dotted),
    ("->>", ArrowType::Solid),
    ("--x", ArrowType::DottedCross),
    ("--)", ArrowType::DottedPoint),
    ("-->", ArrowType::DottedOpen),
    ("-x", ArrowType::SolidCross),
    ("-)", ArrowType::SolidPoint),
    ("->", ArrowType::SolidOpen),
];

impl ArrowType {
    pub const ALL: [ArrowType; 8] = [
        ArrowType::Solid,
        ArrowType::Dotted,
        ArrowType::SolidOpen,
        ArrowType::DottedOpen,
        ArrowType::SolidCross,
        ArrowType::DottedCross,
        ArrowType::SolidPoint,
        ArrowType::DottedPoint,
    ];

    pub fn symbol(&self) -> &'static str {
        ARROW_TABLE
            .iter()
            .find(|(_, arrow)| arrow == self)
            .map(|(symbol, _)| *symbol)
            .unwrap_or("->>")
    }

    /// Arrow at the start of `text`, with its byte length
    pub fn match_prefix(text: &str) -> Option<(ArrowType, usize)> {
        ARROW_TABLE
            .iter()
            .find(|(symbol, _)| text.starts_with(symbol))
            .map(|(symbol, arrow)| (*arrow, symbol.len()))
    }

    /// First arrow in `text`: byte offset, arrow and byte length
    pub fn find(text: &str) -> Option<(usize, ArrowType, usize)> {
        text.char_indices()
            .filter(|(_, c)| *c == '-')
            .find_map(|(idx, _)| {
                Self::match_prefix(&text[idx..]).map(|(arrow, len)| (idx, arrow, len))
            })
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Class diagram relationship kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// `<|--`
    Inheritance,
    /// `*--`
    Composition,
    /// `o--`
    Aggregation,
    /// `-->`
    Association,
    /// `--`
    Link,
    /// `..>`
    Dependency,
    /// `..|>`
    Realization,
    /// `..`
    DashedLink,
}

/// Relation symbols, longest first; the flag marks mirrored spellings
/// whose endpoints are swapped
pub const RELATION_TABLE: [(&str, RelationType, bool); 14] = [
    ("<|--", RelationType::Inheritance, false),
    ("--|>", RelationType::Inheritance, true),
    ("..|>", RelationType::Realization, false),
    ("<|..", RelationType::Realization, true),
    ("*--", RelationType::Composition, false),
    ("--*", RelationType::Composition, true),
    ("o--", RelationType::Aggregation, false),
    ("--o", RelationType::Aggregation, true),
    ("-->", RelationType::Association, false),
    ("<--", RelationType::Association, true),
    ("..>", RelationType::Dependency, false),
    ("<..", RelationType::Dependency, true),
    ("--", RelationType::Link, false),
    ("..", RelationType::DashedLink, false),
];

impl RelationType {
    pub const ALL: [RelationType; 8] = [
        RelationType::Inheritance,
        RelationType::Composition,
        RelationType::Aggregation,
        RelationType::Association,
        RelationType::Link,
        RelationType::Dependency,
        RelationType::Realization,
        RelationType::DashedLink,
    ];

    /// Canonical (unswapped) spelling
    pub fn symbol(&self) -> &'static str {
        RELATION_TABLE
            .iter()
            .find(|(_, relation, swapped)| relation == self && !swapped)
            .map(|(symbol, _, _)| *symbol)
            .unwrap_or("--")
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// ER relationship multiplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Cardinality::ZeroOrOne,
        Cardinality::ExactlyOne,
        Cardinality::ZeroOrMore,
        Cardinality::OneOrMore,
    ];

    /// Symbol on the left-hand side of a relationship (`|o`, `||`, `}o`, `}|`)
    pub fn left_symbol(&self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "|o",
            Cardinality::ExactlyOne => "||",
            Cardinality::ZeroOrMore => "}o",
            Cardinality::OneOrMore => "}|",
        }
    }

    /// Symbol on the right-hand side of a relationship (`o|`, `||`, `o{`, `|{`)
    pub fn right_symbol(&self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "o|",
            Cardinality::ExactlyOne => "||",
            Cardinality::ZeroOrMore => "o{",
            Cardinality::OneOrMore => "|{",
        }
    }
}

/// Whether an ER relationship is identifying (`--`) or not (`..`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Identification {
    #[default]
    Identifying,
    NonIdentifying,
}

impl Identification {
    pub const ALL: [Identification; 2] =
        [Identification::Identifying, Identification::NonIdentifying];

    pub fn symbol(&self) -> &'static str {
        match self {
            Identification::Identifying => "--",
            Identification::NonIdentifying => "..",
        }
    }
}
