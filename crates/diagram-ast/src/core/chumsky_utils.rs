//! Shared chumsky combinators for statement lines
//!
//! Grammars hand single trimmed lines to chumsky; these helpers cover the
//! lexical pieces every dialect shares.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs)
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse an identifier made of [`is_ident_char`](super::is_ident_char)
/// characters plus `-` and `.` after the first character
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| super::is_ident_char(*c))
        .then(
            any()
                .filter(|c: &char| super::is_ident_char(*c) || *c == '-' || *c == '.')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| s.to_string())
        .labelled("identifier")
}

/// Parse a double-quoted string, returning the decoded contents
pub fn quoted_string<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'))
        .map(|s: &str| s.replace("#quot;", "\""))
        .labelled("quoted string")
}

/// Parse the rest of the input as trimmed text, possibly quoted
pub fn rest_text<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .repeated()
        .to_slice()
        .map(|s: &str| super::unquote(s))
}

/// Parse an optional `: text` suffix
pub fn colon_text<'src>() -> impl Parser<'src, &'src str, Option<String>> + Clone {
    inline_whitespace()
        .ignore_then(just(':'))
        .ignore_then(inline_whitespace())
        .ignore_then(rest_text())
        .or_not()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_whitespace() {
        let parser = inline_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse(" \ttest").into_result().is_ok());
        assert!(parser.parse("\ntest").into_result().is_err());
    }

    #[test]
    fn test_identifier() {
        let parser = identifier().then_ignore(end());
        assert_eq!(parser.parse("node_1").into_result(), Ok("node_1".to_string()));
        assert_eq!(parser.parse("a.b-c").into_result(), Ok("a.b-c".to_string()));
        assert!(parser.parse("-a").into_result().is_err());
    }

    #[test]
    fn test_quoted_string() {
        let parser = quoted_string().then_ignore(end());
        assert_eq!(
            parser.parse("\"a #quot;b#quot;\"").into_result(),
            Ok("a \"b\"".to_string())
        );
        assert!(parser.parse("\"open").into_result().is_err());
    }

    #[test]
    fn test_colon_text() {
        let parser = colon_text().then_ignore(end());
        assert_eq!(
            parser.parse(" : hello there").into_result(),
            Ok(Some("hello there".to_string()))
        );
        assert_eq!(parser.parse("").into_result(), Ok(None));
    }
}
