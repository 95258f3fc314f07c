//! Keyword-dispatched tag handlers.

use crate::context::Context;
use crate::hooks::{EcmlHooks, HookError};
use crate::token::Tag;

/// Handler for tags with one keyword.
///
/// # Example
///
/// ```
/// use ecml_core::{Context, HookError, Tag, TagHandler};
///
/// struct Hr;
///
/// impl TagHandler for Hr {
///     fn keyword(&self) -> &str { "hr" }
///
///     fn render(&self, _tag: &Tag, _ctx: &Context) -> Result<Option<String>, HookError> {
///         Ok(Some("<hr>".to_owned()))
///     }
/// }
/// ```
pub trait TagHandler: Send + Sync {
    /// Tag keyword handled, e.g. `youtube`.
    fn keyword(&self) -> &str;

    /// Render the tag.
    ///
    /// Returns `Ok(None)` to decline, leaving the tag's source text in place.
    fn render(&self, tag: &Tag, ctx: &Context) -> Result<Option<String>, HookError>;
}

/// [`EcmlHooks`] implementation dispatching tags to [`TagHandler`]s by keyword.
///
/// The first handler registered for a keyword wins. Tags without a handler,
/// or whose handler declines, are emitted as their original source text.
#[derive(Default)]
pub struct TagHandlers {
    handlers: Vec<Box<dyn TagHandler>>,
}

impl TagHandlers {
    /// Create an empty handler set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    #[must_use]
    pub fn with_handler<T: TagHandler + 'static>(mut self, handler: T) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Register a boxed handler.
    pub fn push(&mut self, handler: Box<dyn TagHandler>) {
        self.handlers.push(handler);
    }

    /// Keywords with a registered handler, in registration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.keyword())
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl EcmlHooks for TagHandlers {
    fn render_tag(&self, ctx: &Context, tag: &Tag) -> Result<String, HookError> {
        let Some(handler) = self.handlers.iter().find(|h| h.keyword() == tag.keyword()) else {
            tracing::trace!(keyword = tag.keyword(), "No handler, passing tag through");
            return Ok(tag.raw().to_owned());
        };

        Ok(handler
            .render(tag, ctx)?
            .unwrap_or_else(|| tag.raw().to_owned()))
    }
}
