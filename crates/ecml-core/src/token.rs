//! Token types produced by the tokenizer.

use crate::attributes::{ATTR_OPERATOR, ATTR_SEPARATOR, AttrValue, Attributes, TRIM_CHARS};
use crate::tokenizer::is_valid_keyword;

/// A parsed tag: `[keyword name="value" flag]`.
///
/// Tags are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tag {
    raw: String,
    keyword: String,
    attributes: Attributes,
}

impl Tag {
    /// Create a tag from its source text, keyword and parsed attributes.
    ///
    /// Returns `None` if `keyword` is not a valid tag keyword
    /// (see [`is_valid_keyword`]).
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        keyword: impl Into<String>,
        attributes: Attributes,
    ) -> Option<Self> {
        let keyword = keyword.into();
        is_valid_keyword(&keyword).then(|| Self::from_parts(raw, keyword, attributes))
    }

    /// Build a tag whose keyword was already matched by the tag pattern.
    pub(crate) fn from_parts(
        raw: impl Into<String>,
        keyword: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            raw: raw.into(),
            keyword: keyword.into(),
            attributes,
        }
    }

    /// Original matched text, e.g. `[bar foo="1"]`.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tag keyword, e.g. `bar`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Parsed attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Rebuild tag syntax from the keyword and attributes.
    ///
    /// The result tokenizes back to a tag with the same keyword and
    /// attributes. Boolean `true` attributes are written bare, except in last
    /// position where a bare name would be dropped. Names and values are
    /// double-quoted only when they contain separators, quotes or `=`.
    ///
    /// Returns `None` when the attributes have no such syntax: an empty name,
    /// a `]` anywhere, a string value spelled `true` or `false`, or an empty
    /// string value in last position.
    ///
    /// # Example
    ///
    /// ```
    /// use ecml_core::tokenize;
    ///
    /// let tokens = tokenize(r#"[video  src='a "b"' autoplay loop=false w=640]"#);
    /// let tag = tokens[0].as_tag().unwrap();
    /// assert_eq!(
    ///     tag.to_syntax().as_deref(),
    ///     Some(r#"[video src="a \"b\"" autoplay loop=false w=640]"#)
    /// );
    /// ```
    #[must_use]
    pub fn to_syntax(&self) -> Option<String> {
        let mut result = String::with_capacity(self.raw.len());
        result.push('[');
        result.push_str(&self.keyword);

        let last = self.attributes.len().saturating_sub(1);
        for (idx, (name, value)) in self.attributes.iter().enumerate() {
            if name.is_empty() {
                return None;
            }
            result.push(ATTR_SEPARATOR);
            push_operand(&mut result, name)?;
            match value {
                AttrValue::Bool(true) if idx < last => {}
                AttrValue::Bool(b) => {
                    result.push(ATTR_OPERATOR);
                    result.push_str(if *b { "true" } else { "false" });
                }
                AttrValue::String(s) => {
                    if s == "true" || s == "false" || (s.is_empty() && idx == last) {
                        return None;
                    }
                    result.push(ATTR_OPERATOR);
                    push_operand(&mut result, s)?;
                }
            }
        }

        result.push(']');
        Some(result)
    }
}

/// Append a name or value in a form the attribute parser reads back unchanged.
///
/// Quoted text only treats `\"` as an escape, so trailing backslashes are
/// written after the closing quote where they stay literal.
fn push_operand(out: &mut String, operand: &str) -> Option<()> {
    if operand.contains(']') {
        return None;
    }

    let needs_quotes = operand.is_empty()
        || operand.contains(|c: char| {
            c == ATTR_SEPARATOR
                || c == ATTR_OPERATOR
                || c == '"'
                || c == '\''
                || TRIM_CHARS.contains(&c)
        });
    if !needs_quotes {
        out.push_str(operand);
        return Some(());
    }

    let body = operand.trim_end_matches('\\');
    out.push('"');
    out.push_str(&body.replace('"', r#"\""#));
    out.push('"');
    out.push_str(&operand[body.len()..]);
    Some(())
}

/// A single unit of tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Token {
    /// Literal text emitted unchanged.
    Text {
        /// The literal text.
        content: String,
    },
    /// A tag to be resolved by the per-tag hook.
    Tag(Tag),
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Whether this is a text token.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// The tag, if this is a tag token.
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text { .. } => None,
        }
    }

    /// Source text of the token: `content` for text, `raw` for tags.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        match self {
            Self::Text { content } => content,
            Self::Tag(tag) => tag.raw(),
        }
    }
}

impl From<Tag> for Token {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use pretty_assertions::assert_eq;

    fn single_tag(text: &str) -> Tag {
        tokenize(text)[0].as_tag().cloned().unwrap()
    }

    fn assert_reparses(source: &str) {
        let tag = single_tag(source);
        assert!(!tag.attributes().is_empty(), "{source}");
        let rebuilt = tag.to_syntax().unwrap();
        let reparsed = single_tag(&rebuilt);
        assert_eq!(reparsed.keyword(), tag.keyword(), "{rebuilt}");
        assert_eq!(reparsed.attributes(), tag.attributes(), "{rebuilt}");
    }

    #[test]
    fn test_text_token() {
        let token = Token::text("hello");
        assert!(token.is_text());
        assert_eq!(token.raw_text(), "hello");
        assert!(token.as_tag().is_none());
    }

    #[test]
    fn test_tag_token() {
        let tag = Tag::new("[b]", "b", Attributes::new()).unwrap();
        let token = Token::from(tag.clone());
        assert!(!token.is_text());
        assert_eq!(token.raw_text(), "[b]");
        assert_eq!(token.as_tag(), Some(&tag));
    }

    #[test]
    fn test_new_rejects_invalid_keyword() {
        assert!(Tag::new("", "", Attributes::new()).is_none());
        assert!(Tag::new("[Bold]", "Bold", Attributes::new()).is_none());
        assert!(Tag::new("[a b]", "a b", Attributes::new()).is_none());
        assert!(Tag::new("[embed.v2]", "embed.v2", Attributes::new()).is_some());
    }

    #[test]
    fn test_to_syntax_no_attributes() {
        let tag = Tag::new("[hr   ]", "hr", Attributes::new()).unwrap();
        assert_eq!(tag.to_syntax().as_deref(), Some("[hr]"));
    }

    #[test]
    fn test_to_syntax_reparses_to_same_attributes() {
        assert_reparses(r#"[embed.video  id='x"y' wide w=640 on=false]"#);
        assert_reparses(r#"[q text="it's \"quoted\"" path=C:\dir\ n=0]"#);
    }

    #[test]
    fn test_to_syntax_value_with_trailing_backslash() {
        let tag = single_tag(r"[x a=b\ c=1]");
        assert_eq!(tag.attributes().get_str("a"), Some(r"b\"));
        assert_eq!(tag.to_syntax().as_deref(), Some(r"[x a=b\ c=1]"));
        assert_reparses(r"[x a=b\ c=1]");
        assert_reparses(r#"[x a="one two"\ c=1]"#);
    }

    #[test]
    fn test_to_syntax_quoted_name() {
        let tag = single_tag(r#"[x "my name"=1 z=2]"#);
        assert_eq!(tag.to_syntax().as_deref(), Some(r#"[x "my name"=1 z=2]"#));
        assert_reparses(r#"[x "my name"=1 z=2]"#);
        assert_reparses(r#"[x 'a=b' "c d"]"#);
    }

    #[test]
    fn test_to_syntax_trailing_flag_is_explicit() {
        let attrs: Attributes = [
            ("flag", AttrValue::from(true)),
            ("a", AttrValue::from("1")),
            ("last", AttrValue::from(true)),
        ]
        .into_iter()
        .collect();
        let tag = Tag::new("", "x", attrs).unwrap();
        assert_eq!(tag.to_syntax().as_deref(), Some("[x flag a=1 last=true]"));
    }

    #[test]
    fn test_to_syntax_unrepresentable() {
        let cases: [(&str, AttrValue); 5] = [
            ("a", "x]y".into()),
            ("a]", "1".into()),
            ("", "1".into()),
            ("a", AttrValue::String("true".to_owned())),
            ("a", "".into()),
        ];
        for (name, value) in cases {
            let attrs: Attributes = [(name, value)].into_iter().collect();
            let tag = Tag::new("", "x", attrs).unwrap();
            assert_eq!(tag.to_syntax(), None, "{name}");
        }
    }

    #[test]
    fn test_to_syntax_empty_value_before_last() {
        let attrs: Attributes = [("a", AttrValue::from("")), ("b", AttrValue::from("2"))]
            .into_iter()
            .collect();
        let tag = Tag::new("", "x", attrs).unwrap();
        let rebuilt = tag.to_syntax().unwrap();
        assert_eq!(rebuilt, r#"[x a="" b=2]"#);
        assert_eq!(single_tag(&rebuilt).attributes(), tag.attributes());
    }
}
