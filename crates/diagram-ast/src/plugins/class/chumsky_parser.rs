//! Class diagram statement parser using chumsky
//!
//! Recognises single class diagram lines: relations, class headers, notes
//! and annotations. Member lines are split by hand since their grammar is
//! mostly "everything up to the next delimiter".

use chumsky::prelude::*;

use super::ast::{ClassMember, ClassNote, ClassRelation, MemberType, Visibility};
use crate::core::chumsky_utils::{colon_text, inline_whitespace, quoted_string};
use crate::core::{is_ident_char, RelationType, RELATION_TABLE};

/// A `class` line: `class Id~T~["Label"] {`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassHeader {
    pub id: String,
    pub generics: Option<String>,
    pub label: Option<String>,
    /// The line ends in `{` and a member body follows
    pub opens_body: bool,
}

/// Chumsky-based class diagram statement parser
pub struct ChumskyClassParser;

impl ChumskyClassParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a relation such as `A "1" --> "*" B : owns`
    pub fn parse_relation(&self, input: &str) -> Option<ClassRelation> {
        Self::relation_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// Parse what follows the `class` keyword
    pub fn parse_class_header(&self, input: &str) -> Option<ClassHeader> {
        Self::class_header_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// Parse what follows the `note` keyword
    pub fn parse_note(&self, input: &str) -> Option<ClassNote> {
        Self::note_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// Parse `<<annotation>>` optionally followed by a class id
    pub fn parse_annotation(&self, input: &str) -> Option<(String, Option<String>)> {
        Self::annotation_parser()
            .then(
                inline_whitespace()
                    .ignore_then(Self::class_id())
                    .or_not(),
            )
            .then_ignore(inline_whitespace())
            .then_ignore(end())
            .parse(input)
            .into_result()
            .ok()
    }

    /// `Name` or a dotted path `pkg.Name`; a `..` run is left for the relation
    fn class_id<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        let segment = any().filter(|c: &char| is_ident_char(*c)).repeated().at_least(1);
        segment
            .clone()
            .then(just('.').then(segment).repeated())
            .to_slice()
            .map(|s: &str| s.to_string())
            .labelled("class id")
    }

    fn relation_operator<'src>() -> impl Parser<'src, &'src str, (RelationType, bool)> + Clone {
        choice(
            RELATION_TABLE.map(|(symbol, relation, swapped)| just(symbol).to((relation, swapped))),
        )
        .labelled("relation")
    }

    fn relation_parser<'src>() -> impl Parser<'src, &'src str, ClassRelation> + Clone {
        let cardinality = quoted_string().then_ignore(inline_whitespace()).or_not();

        Self::class_id()
            .then_ignore(inline_whitespace())
            .then(cardinality.clone())
            .then(Self::relation_operator())
            .then_ignore(inline_whitespace())
            .then(cardinality)
            .then(Self::class_id())
            .then(colon_text())
            .then_ignore(inline_whitespace())
            .map(
                |(((((from, card_from), (relation_type, swapped)), card_to), to), label)| {
                    let (from, to, cardinality_from, cardinality_to) = if swapped {
                        (to, from, card_to, card_from)
                    } else {
                        (from, to, card_from, card_to)
                    };
                    ClassRelation {
                        from,
                        to,
                        relation_type,
                        label: label.filter(|l| !l.is_empty()),
                        cardinality_from,
                        cardinality_to,
                        span: None,
                    }
                },
            )
    }

    fn class_header_parser<'src>() -> impl Parser<'src, &'src str, ClassHeader> + Clone {
        let generics = just('~')
            .ignore_then(none_of('~').repeated().at_least(1).to_slice())
            .then_ignore(just('~'))
            .map(|s: &str| s.to_string());

        let label = just('[')
            .ignore_then(quoted_string())
            .then_ignore(just(']'));

        let body = just('{')
            .ignore_then(inline_whitespace())
            .ignore_then(just('}').or_not())
            .map(|closed| closed.is_none())
            .or_not()
            .map(|open| open.unwrap_or(false));

        Self::class_id()
            .then(generics.or_not())
            .then(label.or_not())
            .then_ignore(inline_whitespace())
            .then(body)
            .then_ignore(inline_whitespace())
            .map(|(((id, generics), label), opens_body)| ClassHeader {
                id,
                generics,
                label,
                opens_body,
            })
    }

    fn note_parser<'src>() -> impl Parser<'src, &'src str, ClassNote> + Clone {
        let target = just("for")
            .ignore_then(one_of(" \t").repeated().at_least(1))
            .ignore_then(Self::class_id())
            .then_ignore(inline_whitespace());

        target
            .or_not()
            .then(quoted_string())
            .then_ignore(inline_whitespace())
            .map(|(for_class, text)| ClassNote {
                for_class,
                text,
                span: None,
            })
    }

    fn annotation_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        just("<<")
            .ignore_then(none_of('>').repeated().at_least(1).to_slice())
            .then_ignore(just(">>"))
            .map(|s: &str| s.trim().to_string())
    }
}

impl Default for ChumskyClassParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip trailing `$`/`*` classifiers, returning `(rest, static, abstract)`
fn strip_classifiers(text: &str) -> (&str, bool, bool) {
    let mut rest = text.trim_end();
    let (mut is_static, mut is_abstract) = (false, false);
    loop {
        if let Some(stripped) = rest.strip_suffix('$') {
            is_static = true;
            rest = stripped.trim_end();
        } else if let Some(stripped) = rest.strip_suffix('*') {
            is_abstract = true;
            rest = stripped.trim_end();
        } else {
            return (rest, is_static, is_abstract);
        }
    }
}

/// Parse one member line of a class body
///
/// A `(...)` makes the line a method whose trailing text is the return
/// type; otherwise it is an attribute written `type name`, `name: type` or
/// as a bare name.
pub fn parse_member(text: &str) -> Option<ClassMember> {
    let text = text.trim();
    let mut chars = text.chars();
    let visibility = chars.next().and_then(Visibility::from_char);
    let body = if visibility.is_some() { chars.as_str() } else { text };

    let (member_type, name, return_type, parameters, is_static, is_abstract) =
        match (body.find('('), body.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                let (after, is_static, is_abstract) = {
                    let after = body[close + 1..].trim_start();
                    let classifiers = after
                        .chars()
                        .take_while(|c| matches!(c, '$' | '*'))
                        .collect::<String>();
                    let (rest, s, a) = strip_classifiers(&after[classifiers.len()..]);
                    (
                        rest,
                        s || classifiers.contains('$'),
                        a || classifiers.contains('*'),
                    )
                };
                let return_type = after.trim().trim_start_matches(':').trim();
                (
                    MemberType::Method,
                    body[..open].trim(),
                    (!return_type.is_empty()).then(|| return_type.to_string()),
                    Some(body[open + 1..close].trim().to_string()),
                    is_static,
                    is_abstract,
                )
            }
            _ => {
                let (rest, is_static, is_abstract) = strip_classifiers(body);
                let (name, ty) = match rest.split_once(':') {
                    Some((name, ty)) => (name.trim(), Some(ty.trim())),
                    None => match rest.trim().rsplit_once(char::is_whitespace) {
                        Some((ty, name)) => (name.trim(), Some(ty.trim())),
                        None => (rest.trim(), None),
                    },
                };
                (
                    MemberType::Attribute,
                    name,
                    ty.filter(|t| !t.is_empty()).map(str::to_string),
                    None,
                    is_static,
                    is_abstract,
                )
            }
        };

    if name.is_empty() {
        return None;
    }
    Some(ClassMember {
        member_type,
        visibility,
        name: name.to_string(),
        return_type,
        parameters,
        is_static,
        is_abstract,
    })
}
