//! ER statement parser using chumsky

use chumsky::prelude::*;

use super::ast::{ErAttribute, ErRelationship, KeyType};
use crate::core::chumsky_utils::{
    colon_text, identifier, inline_whitespace, inline_whitespace_required, quoted_string,
};
use crate::core::{Cardinality, Identification};

/// An entity line: `NAME["alias"] {`, `NAME {}` or a bare `NAME`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHeader {
    pub name: String,
    pub alias: Option<String>,
    pub opens_body: bool,
}

/// Chumsky-based ER statement parser
pub struct ChumskyErParser;

impl ChumskyErParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_relationship(&self, input: &str) -> Option<ErRelationship> {
        Self::relationship_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    pub fn parse_entity_header(&self, input: &str) -> Option<EntityHeader> {
        Self::entity_header_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    pub fn parse_attribute(&self, input: &str) -> Option<ErAttribute> {
        Self::attribute_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    fn entity_name<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        quoted_string().or(identifier()).labelled("entity name")
    }

    fn left_cardinality<'src>() -> impl Parser<'src, &'src str, Cardinality> + Clone {
        choice(Cardinality::ALL.map(|cardinality| {
            just(cardinality.left_symbol()).to(cardinality)
        }))
    }

    fn right_cardinality<'src>() -> impl Parser<'src, &'src str, Cardinality> + Clone {
        choice(Cardinality::ALL.map(|cardinality| {
            just(cardinality.right_symbol()).to(cardinality)
        }))
    }

    fn identification<'src>() -> impl Parser<'src, &'src str, Identification> + Clone {
        choice(Identification::ALL.map(|kind| just(kind.symbol()).to(kind)))
    }

    fn relationship_parser<'src>() -> impl Parser<'src, &'src str, ErRelationship> + Clone {
        Self::entity_name()
            .then_ignore(inline_whitespace())
            .then(Self::left_cardinality())
            .then(Self::identification())
            .then(Self::right_cardinality())
            .then_ignore(inline_whitespace())
            .then(Self::entity_name())
            .then(colon_text())
            .then_ignore(inline_whitespace())
            .map(
                |(((((from, from_cardinality), identification), to_cardinality), to), label)| {
                    ErRelationship {
                        from,
                        to,
                        from_cardinality,
                        to_cardinality,
                        identification,
                        label: label.filter(|l| !l.is_empty()),
                        span: None,
                    }
                },
            )
    }

    fn entity_header_parser<'src>() -> impl Parser<'src, &'src str, EntityHeader> + Clone {
        let alias = just('[')
            .ignore_then(
                quoted_string().or(none_of("]")
                    .repeated()
                    .at_least(1)
                    .to_slice()
                    .map(|s: &str| s.trim().to_string())),
            )
            .then_ignore(just(']'));

        let body = just('{')
            .ignore_then(inline_whitespace())
            .ignore_then(just('}').or_not())
            .map(|closed| closed.is_none())
            .or_not()
            .map(|open| open.unwrap_or(false));

        Self::entity_name()
            .then(alias.or_not())
            .then_ignore(inline_whitespace())
            .then(body)
            .then_ignore(inline_whitespace())
            .map(|((name, alias), opens_body)| EntityHeader {
                name,
                alias,
                opens_body,
            })
    }

    fn attribute_parser<'src>() -> impl Parser<'src, &'src str, ErAttribute> + Clone {
        let word = none_of(" \t\"")
            .repeated()
            .at_least(1)
            .to_slice()
            .map(|s: &str| s.to_string());

        let key = choice((
            just("PK").to(KeyType::Pk),
            just("FK").to(KeyType::Fk),
            just("UK").to(KeyType::Uk),
        ));

        // Only the first of several keys is kept
        let keys = key
            .separated_by(inline_whitespace().then(just(',')).then(inline_whitespace()))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|keys| keys.first().copied());

        word.clone()
            .then_ignore(inline_whitespace_required())
            .then(word)
            .then(inline_whitespace_required().ignore_then(keys).or_not())
            .then(inline_whitespace().ignore_then(quoted_string()).or_not())
            .then_ignore(inline_whitespace())
            .map(|(((attr_type, name), key), comment)| ErAttribute {
                name,
                attr_type,
                key: key.flatten(),
                comment,
            })
    }
}

impl Default for ChumskyErParser {
    fn default() -> Self {
        Self::new()
    }
}
