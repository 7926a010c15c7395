//! Shared text utilities for diagram processing
//!
//! Label quoting and unquoting, special-character detection and identifier
//! checks used by both the grammars and the generators.

/// Characters that force a label to be quoted when generated
pub const SPECIAL_CHARS: [char; 4] = ['@', '#', ':', ';'];

/// Characters that terminate an unquoted label in bracketed positions
pub const STRUCTURAL_CHARS: [char; 9] = ['[', ']', '(', ')', '{', '}', '|', '"', '>'];

/// Returns true if `label` must be wrapped in quotes to survive a re-parse
///
/// Special characters and whitespace always force quoting, even when the
/// original source wrote the label bare.
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty()
        || label
            .chars()
            .any(|c| c.is_whitespace() || SPECIAL_CHARS.contains(&c) || STRUCTURAL_CHARS.contains(&c))
}

/// Wrap a label in double quotes, escaping embedded quotes as `#quot;`
pub fn quote(label: &str) -> String {
    format!("\"{}\"", label.replace('"', "#quot;"))
}

/// Quote `label` only when [`needs_quoting`] says so
pub fn quote_if_needed(label: &str) -> String {
    if needs_quoting(label) {
        quote(label)
    } else {
        label.to_string()
    }
}

/// Strip one pair of surrounding double quotes and decode `#quot;`
///
/// Text that is not quoted is returned trimmed but otherwise verbatim.
pub fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    inner.replace("#quot;", "\"")
}

/// Returns true for characters allowed in a bare identifier
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `text` can be written as a bare identifier
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_ident_char)
}

/// Split `text` at the first `:` that is not inside double quotes
pub fn split_colon(text: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    for (idx, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some((&text[..idx], &text[idx + 1..])),
            _ => {}
        }
    }
    None
}

/// Split `text` on `;` outside quotes and brackets, dropping empty parts
pub fn split_statements(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth = depth.saturating_sub(1),
            ';' if !in_quotes && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Strip a leading keyword, matched case-insensitively as a whole word
///
/// Returns the trimmed rest of the line when `line` starts with `keyword`
/// followed by whitespace or the end of the line.
pub fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(needs_quoting("hello world"));
        assert!(needs_quoting("user@example"));
        assert!(needs_quoting("#1"));
        assert!(needs_quoting("a:b"));
        assert!(needs_quoting("a;b"));
        assert!(needs_quoting("f(x)"));
        assert!(needs_quoting(""));
        assert!(!needs_quoting("Start"));
        assert!(!needs_quoting("yes/no"));
    }

    #[test]
    fn test_quote_round_trip() {
        let quoted = quote("say \"hi\"");
        assert_eq!(quoted, "\"say #quot;hi#quot;\"");
        assert_eq!(unquote(&quoted), "say \"hi\"");
    }

    #[test]
    fn test_unquote_bare_text() {
        assert_eq!(unquote("  plain  "), "plain");
        assert_eq!(unquote("\"quoted\""), "quoted");
        assert_eq!(unquote("\"unterminated"), "\"unterminated");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("Start"), "Start");
        assert_eq!(quote_if_needed("Two words"), "\"Two words\"");
    }

    #[test]
    fn test_split_colon_respects_quotes() {
        assert_eq!(split_colon("A : label"), Some(("A ", " label")));
        assert_eq!(split_colon("\"a:b\" : c"), Some(("\"a:b\" ", " c")));
        assert_eq!(split_colon("no colon"), None);
    }

    #[test]
    fn test_split_statements() {
        assert_eq!(split_statements("A-->B; B-->C;"), vec!["A-->B", "B-->C"]);
        assert_eq!(split_statements("A[\"x;y\"] --> B"), vec!["A[\"x;y\"] --> B"]);
        assert_eq!(split_statements("A[x;y]"), vec!["A[x;y]"]);
    }

    #[test]
    fn test_strip_keyword() {
        assert_eq!(strip_keyword("loop Every minute", "loop"), Some("Every minute"));
        assert_eq!(strip_keyword("LOOP", "loop"), Some(""));
        assert_eq!(strip_keyword("looping", "loop"), None);
        assert_eq!(strip_keyword("lo", "loop"), None);
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("node_1"));
        assert!(is_identifier("ノード"));
        assert!(!is_identifier("two words"));
        assert!(!is_identifier(""));
    }
}
