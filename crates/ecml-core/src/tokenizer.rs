//! Tag scanning.
//!
//! Splits text into [`Token`]s: plain text interleaved with `[keyword ...]` tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::attributes::{Attributes, parse_attributes};
use crate::token::{Tag, Token};

/// Regex to match a tag: `[` keyword, optional attribute region, `]`.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-z0-9.]+)([^\]]+)?\]").unwrap());

/// Check if a keyword is valid: one or more of `a-z`, `0-9` or `.`.
///
/// # Example
///
/// ```
/// use ecml_core::is_valid_keyword;
///
/// assert!(is_valid_keyword("embed.video2"));
/// assert!(!is_valid_keyword("Embed"));
/// assert!(!is_valid_keyword(""));
/// ```
#[must_use]
pub fn is_valid_keyword(keyword: &str) -> bool {
    !keyword.is_empty()
        && keyword
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.')
}

/// Split text into an ordered token sequence.
///
/// Tags are matched left to right without overlap. Text between tags becomes
/// text tokens; empty gaps (adjacent tags, a tag at either end) produce none.
/// Concatenating [`Token::raw_text`] of the result reproduces the input.
///
/// Malformed syntax never fails: a `[` with no closing `]` stays in the
/// surrounding text, and a tag with an unterminated quote gets no attributes.
///
/// # Example
///
/// ```
/// use ecml_core::{Token, tokenize};
///
/// let tokens = tokenize(r#"Watch [youtube id="abc"] now"#);
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0], Token::text("Watch "));
///
/// let tag = tokens[1].as_tag().unwrap();
/// assert_eq!(tag.keyword(), "youtube");
/// assert_eq!(tag.attributes().get_str("id"), Some("abc"));
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last_end = 0;
    let mut tag_count = 0usize;

    for caps in TAG_RE.captures_iter(text) {
        let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let region = caps.get(2).map_or("", |m| m.as_str());

        if whole.start() > last_end {
            tokens.push(Token::text(&text[last_end..whole.start()]));
        }

        let attributes = parse_attributes(region).unwrap_or_else(|| {
            tracing::warn!(tag = whole.as_str(), "Unterminated quote in tag, ignoring attributes");
            Attributes::new()
        });
        tokens.push(Token::Tag(Tag::from_parts(
            whole.as_str(),
            keyword.as_str(),
            attributes,
        )));

        last_end = whole.end();
        tag_count += 1;
    }

    if last_end < text.len() {
        tokens.push(Token::text(&text[last_end..]));
    }

    tracing::trace!(tags = tag_count, tokens = tokens.len(), "Tokenized text");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttrValue;
    use pretty_assertions::assert_eq;

    fn single_tag(text: &str) -> Tag {
        let tokens = tokenize(text);
        match tokens.first() {
            Some(Token::Tag(tag)) => tag.clone(),
            other => panic!("expected tag token, got {other:?}"),
        }
    }

    fn attrs<const N: usize>(entries: [(&str, AttrValue); N]) -> Attributes {
        entries.into_iter().collect()
    }

    fn concat(tokens: &[Token]) -> String {
        tokens.iter().map(Token::raw_text).collect()
    }

    #[test]
    fn test_plain_text_is_single_token() {
        let text = "Nothing to see here.\nJust text, (parens) and {braces}.";
        assert_eq!(tokenize(text), vec![Token::text(text)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_mixed_attributes() {
        let tag = single_tag(r#"[bar foo="234" bool bool2=true f-.2 pow='pow']"#);
        assert_eq!(tag.keyword(), "bar");
        assert_eq!(
            tag.attributes(),
            &attrs([
                ("foo", "234".into()),
                ("bool", true.into()),
                ("bool2", true.into()),
                ("f-.2", true.into()),
                ("pow", "pow".into()),
            ])
        );
    }

    #[test]
    fn test_dotted_keyword_with_escaped_quote() {
        let tag = single_tag(r#"[bar.123  cat="fig\"ht"]"#);
        assert_eq!(tag.keyword(), "bar.123");
        assert_eq!(tag.attributes(), &attrs([("cat", r#"fig"ht"#.into())]));
    }

    #[test]
    fn test_unterminated_quote() {
        let tag = single_tag(r#"[foo a="b]"#);
        assert_eq!(tag.keyword(), "foo");
        assert!(tag.attributes().is_empty());
    }

    #[test]
    fn test_escaped_closing_quote_is_unterminated() {
        let tag = single_tag(r#"[foo a="b\"]"#);
        assert_eq!(tag.keyword(), "foo");
        assert!(tag.attributes().is_empty());
    }

    #[test]
    fn test_trailing_bare_boolean_is_lost() {
        let tag = single_tag("[foo a=1 bool]");
        assert_eq!(tag.attributes(), &attrs([("a", "1".into())]));
    }

    #[test]
    fn test_tag_without_attributes() {
        let tag = single_tag("[hr]");
        assert_eq!(tag.raw(), "[hr]");
        assert_eq!(tag.keyword(), "hr");
        assert!(tag.attributes().is_empty());
    }

    #[test]
    fn test_interleaving() {
        let tokens = tokenize("a [x] b [y k=v] c");
        let kinds: Vec<_> = tokens.iter().map(Token::raw_text).collect();
        assert_eq!(kinds, ["a ", "[x]", " b ", "[y k=v]", " c"]);
        assert!(tokens[1].as_tag().is_some());
        assert!(tokens[3].as_tag().is_some());
    }

    #[test]
    fn test_adjacent_tags_have_no_empty_text() {
        let tokens = tokenize("[a][b]");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| !t.is_text()));
    }

    #[test]
    fn test_tags_at_both_ends() {
        let tokens = tokenize("[a] middle [b]");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::text(" middle "));
    }

    #[test]
    fn test_unclosed_bracket_is_text() {
        let text = "before [foo bar=1 and never closed";
        assert_eq!(tokenize(text), vec![Token::text(text)]);
    }

    #[test]
    fn test_invalid_keyword_is_text() {
        for text in ["[Foo]", "[]", "[ foo]", "[-x]", "[é]"] {
            assert_eq!(tokenize(text), vec![Token::text(text)], "input: {text}");
        }
    }

    #[test]
    fn test_keyword_stops_at_first_non_keyword_char() {
        let tag = single_tag("[foo-bar baz=1]");
        assert_eq!(tag.keyword(), "foo");
        assert_eq!(
            tag.attributes(),
            &attrs([("-bar", true.into()), ("baz", "1".into())])
        );
    }

    #[test]
    fn test_opening_bracket_inside_attributes() {
        let tokens = tokenize("[a [b] c");
        assert_eq!(tokens.len(), 2);
        let tag = tokens[0].as_tag().unwrap();
        assert_eq!(tag.raw(), "[a [b]");
        assert_eq!(tag.keyword(), "a");
        assert_eq!(tokens[1], Token::text(" c"));
    }

    #[test]
    fn test_bracketed_prose_that_matches() {
        // Lowercase words in brackets are tags too.
        let tokens = tokenize("see [note 1] below");
        assert_eq!(tokens[1].as_tag().unwrap().keyword(), "note");
    }

    #[test]
    fn test_multiline_attribute_region() {
        let tag = single_tag("[embed\nsrc=a.png alt=\"two\nlines\"]");
        assert_eq!(tag.keyword(), "embed");
        assert_eq!(tag.attributes().get_str("alt"), Some("two\nlines"));
    }

    #[test]
    fn test_lossless_concatenation() {
        let inputs = [
            "",
            "plain",
            "[a]",
            "x[a]y[b c=d]z",
            "[[a]]",
            "] [ [a b=\"unterminated] tail",
            "üñí [cödé] [code x='ü'] end",
            "[a][b][c]",
        ];
        for input in inputs {
            assert_eq!(concat(&tokenize(input)), input, "input: {input}");
        }
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let first = tokenize("[a] [b]");
        let second = tokenize("[c]");
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].as_tag().unwrap().keyword(), "c");
    }

    #[test]
    fn test_concurrent_calls() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let text = format!("x [t{i} n={i}] y");
                    tokenize(&text)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let tokens = handle.join().unwrap();
            let tag = tokens[1].as_tag().unwrap();
            assert_eq!(tag.keyword(), format!("t{i}"));
            assert_eq!(tag.attributes().get_str("n"), Some(i.to_string().as_str()));
        }
    }

    #[test]
    fn test_is_valid_keyword() {
        assert!(is_valid_keyword("bar"));
        assert!(is_valid_keyword("bar.123"));
        assert!(is_valid_keyword("..."));
        assert!(!is_valid_keyword(""));
        assert!(!is_valid_keyword("Bar"));
        assert!(!is_valid_keyword("foo-bar"));
        assert!(!is_valid_keyword("foo bar"));
    }
}
