//! Extension points called by the processor.
//!
//! The processor calls two hooks:
//!
//! 1. [`EcmlHooks::filter_tokens`] sees the whole token sequence and returns the
//!    sequence to render. It may add, drop, reorder or replace items.
//! 2. [`EcmlHooks::render_tag`] turns one tag into text. It only sees the tag
//!    and the context, never its siblings.

use std::error::Error as StdError;
use std::fmt;

use crate::context::Context;
use crate::token::{Tag, Token};

/// Error raised by a hook implementation.
///
/// Returned errors abort [`Processor::process`](crate::Processor::process).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl HookError {
    /// Create an error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Loosely typed value returned by [`EcmlHooks::filter_tokens`].
///
/// Hosts may hand back anything; the processor accepts only
/// [`HookValue::List`], and inside it only [`HookValue::Str`] and
/// [`HookValue::Token`] items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookValue {
    /// No value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Raw string, spliced into the output verbatim.
    Str(String),
    /// Token.
    Token(Token),
    /// Ordered sequence of values.
    List(Vec<HookValue>),
}

impl HookValue {
    /// Short name of the value's type, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Token(_) => "token",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for HookValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl From<Vec<Token>> for HookValue {
    fn from(tokens: Vec<Token>) -> Self {
        Self::List(tokens.into_iter().map(Self::Token).collect())
    }
}

impl From<Token> for HookValue {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<&str> for HookValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for HookValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for HookValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for HookValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Host-supplied hooks for the two processing phases.
///
/// `filter_tokens` defaults to identity; `render_tag` must be provided.
///
/// # Example
///
/// ```
/// use ecml_core::{Context, EcmlHooks, HookError, Processor, Tag};
///
/// struct Upper;
///
/// impl EcmlHooks for Upper {
///     fn render_tag(&self, _ctx: &Context, tag: &Tag) -> Result<String, HookError> {
///         Ok(tag.keyword().to_uppercase())
///     }
/// }
///
/// let processor = Processor::new(Upper);
/// let output = processor.process("a [b] c", &Context::new()).unwrap();
/// assert_eq!(output, "a B c");
/// ```
pub trait EcmlHooks {
    /// Inspect or replace the full token sequence before rendering.
    ///
    /// Must return [`HookValue::List`]; anything else fails the whole call.
    fn filter_tokens(&self, _ctx: &Context, tokens: Vec<Token>) -> Result<HookValue, HookError> {
        Ok(HookValue::from(tokens))
    }

    /// Render one tag to its replacement text.
    fn render_tag(&self, ctx: &Context, tag: &Tag) -> Result<String, HookError>;
}

impl<H: EcmlHooks + ?Sized> EcmlHooks for &H {
    fn filter_tokens(&self, ctx: &Context, tokens: Vec<Token>) -> Result<HookValue, HookError> {
        (**self).filter_tokens(ctx, tokens)
    }

    fn render_tag(&self, ctx: &Context, tag: &Tag) -> Result<String, HookError> {
        (**self).render_tag(ctx, tag)
    }
}

impl<H: EcmlHooks + ?Sized> EcmlHooks for Box<H> {
    fn filter_tokens(&self, ctx: &Context, tokens: Vec<Token>) -> Result<HookValue, HookError> {
        (**self).filter_tokens(ctx, tokens)
    }

    fn render_tag(&self, ctx: &Context, tag: &Tag) -> Result<String, HookError> {
        (**self).render_tag(ctx, tag)
    }
}
