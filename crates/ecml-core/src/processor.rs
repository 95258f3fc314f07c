//! Two-phase tag processor.
//!
//! Tokenizes text, lets the token-list hook rewrite the sequence, then renders
//! each item in isolation.

use std::collections::BTreeMap;

use crate::context::Context;
use crate::error::ProcessError;
use crate::hooks::{EcmlHooks, HookValue};
use crate::token::Token;
use crate::tokenizer::tokenize;
use crate::views::ViewRegistry;

/// Processor turning tagged text into output via [`EcmlHooks`].
///
/// The processor holds no per-call state, so one instance can serve any
/// number of calls.
///
/// # Example
///
/// ```
/// use ecml_core::{Context, Processor, TagHandlers, TemplateHandler};
///
/// let handlers = TagHandlers::new()
///     .with_handler(TemplateHandler::new("kbd", "<kbd>{key}</kbd>"));
/// let processor = Processor::new(handlers);
///
/// let output = processor
///     .process("Press [kbd key=Esc] or [unknown]", &Context::new())
///     .unwrap();
/// assert_eq!(output, "Press <kbd>Esc</kbd> or [unknown]");
/// ```
pub struct Processor<H> {
    hooks: H,
    views: ViewRegistry,
}

impl<H: EcmlHooks> Processor<H> {
    /// Create a processor with the default view registry.
    #[must_use]
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            views: ViewRegistry::default(),
        }
    }

    /// Replace the view registry used by [`process_view`](Self::process_view).
    #[must_use]
    pub fn with_views(mut self, views: ViewRegistry) -> Self {
        self.views = views;
        self
    }

    /// Installed hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Registered views.
    #[must_use]
    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// Replace tags in `text` with hook output.
    ///
    /// 1. Tokenize `text`.
    /// 2. Pass the tokens to [`EcmlHooks::filter_tokens`]; the result must be a
    ///    [`HookValue::List`].
    /// 3. Render each item: strings and text tokens verbatim, tags through
    ///    [`EcmlHooks::render_tag`].
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::InvalidTokenList`] or
    /// [`ProcessError::InvalidToken`] when the token-list hook returns
    /// something unusable, and [`ProcessError::Hook`] when a hook fails.
    /// No partial output is returned.
    pub fn process(&self, text: &str, ctx: &Context) -> Result<String, ProcessError> {
        let tokens = tokenize(text);
        tracing::debug!(view = ctx.view(), tokens = tokens.len(), "Processing tokens");

        let items = match self.hooks.filter_tokens(ctx, tokens)? {
            HookValue::List(items) => items,
            other => {
                return Err(ProcessError::InvalidTokenList {
                    found: other.kind(),
                });
            }
        };

        let mut output = String::with_capacity(text.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                HookValue::Str(s) => output.push_str(&s),
                HookValue::Token(Token::Text { content }) => output.push_str(&content),
                HookValue::Token(Token::Tag(tag)) => {
                    tracing::trace!(keyword = tag.keyword(), "Rendering tag");
                    output.push_str(&self.hooks.render_tag(ctx, &tag)?);
                }
                other => {
                    return Err(ProcessError::InvalidToken {
                        index,
                        found: other.kind(),
                    });
                }
            }
        }

        Ok(output)
    }

    /// Process the output of a view.
    ///
    /// Text of views missing from the registry is returned unchanged. Otherwise
    /// it is processed with a [`Context`] carrying the view name and params.
    pub fn process_view(
        &self,
        view: &str,
        text: &str,
        params: BTreeMap<String, String>,
    ) -> Result<String, ProcessError> {
        if !self.views.contains(view) {
            tracing::trace!(view, "View not registered, skipping");
            return Ok(text.to_owned());
        }

        let ctx = Context::for_view(view).with_params(params);
        self.process(text, &ctx)
    }
}
