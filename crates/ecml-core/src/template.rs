//! Template-based tag handler.
//!
//! Templates are plain text with `{name}` placeholders filled from the tag's
//! attributes. `{{` and `}}` produce literal braces.

use crate::context::Context;
use crate::handler::TagHandler;
use crate::hooks::HookError;
use crate::token::Tag;

/// Renders a tag by substituting its attributes into a template.
///
/// Missing attributes render as an empty string, booleans as `true`/`false`.
/// Substituted values are HTML-escaped unless escaping is turned off.
///
/// # Example
///
/// ```
/// use ecml_core::{Context, Processor, TagHandlers, TemplateHandler};
///
/// let youtube = TemplateHandler::new(
///     "youtube",
///     r#"<iframe src="https://www.youtube.com/embed/{id}"></iframe>"#,
/// );
/// let processor = Processor::new(TagHandlers::new().with_handler(youtube));
///
/// let output = processor.process("[youtube id=dQw4w9WgXcQ]", &Context::new()).unwrap();
/// assert_eq!(output, r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHandler {
    keyword: String,
    template: String,
    escape: bool,
}

impl TemplateHandler {
    /// Create a handler with HTML escaping enabled.
    #[must_use]
    pub fn new(keyword: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            template: template.into(),
            escape: true,
        }
    }

    /// Enable or disable HTML escaping of substituted values.
    #[must_use]
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// The template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fill the template from a tag's attributes.
    #[must_use]
    pub fn fill(&self, tag: &Tag) -> String {
        let mut output = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(pos) = rest.find(['{', '}']) {
            output.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if rest[pos..].starts_with("{{") {
                output.push('{');
                rest = &after[1..];
            } else if rest[pos..].starts_with("}}") {
                output.push('}');
                rest = &after[1..];
            } else if rest[pos..].starts_with('{')
                && let Some(end) = after.find('}')
            {
                let name = &after[..end];
                if let Some(value) = tag.attributes().get(name) {
                    let value = value.to_string();
                    if self.escape {
                        output.push_str(&escape_html(&value));
                    } else {
                        output.push_str(&value);
                    }
                }
                rest = &after[end + 1..];
            } else {
                // Lone brace
                output.push_str(&rest[pos..=pos]);
                rest = after;
            }
        }

        output.push_str(rest);
        output
    }
}

impl TagHandler for TemplateHandler {
    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn render(&self, tag: &Tag, _ctx: &Context) -> Result<Option<String>, HookError> {
        Ok(Some(self.fill(tag)))
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for HTML text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
