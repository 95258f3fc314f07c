//! ECML: bracketed tag extraction and substitution.
//!
//! This crate finds tags such as `[youtube autoplay id="abc"]` in arbitrary
//! text and replaces them with text supplied by host hooks, leaving everything
//! else untouched.
//!
//! # Architecture
//!
//! Processing has two phases, both driven by [`EcmlHooks`]:
//!
//! 1. **Token list** ([`EcmlHooks::filter_tokens`]): the hook sees the whole
//!    [`Token`] sequence produced by [`tokenize`] and may rewrite it.
//!
//! 2. **Per tag** ([`EcmlHooks::render_tag`]): each tag is rendered on its own;
//!    text passes through verbatim.
//!
//! Tag syntax problems never fail: unclosed brackets stay text, and a tag with
//! an unterminated quote keeps its keyword but loses all attributes.
//!
//! # Example
//!
//! ```
//! use ecml_core::{Context, Processor, TagHandlers, TemplateHandler};
//!
//! let handlers = TagHandlers::new()
//!     .with_handler(TemplateHandler::new("b", "<strong>{text}</strong>"));
//! let processor = Processor::new(handlers);
//!
//! let output = processor
//!     .process(r#"Say [b text="hello"] to [nobody]."#, &Context::new())
//!     .unwrap();
//! assert_eq!(output, "Say <strong>hello</strong> to [nobody].");
//! ```

mod attributes;
mod context;
mod error;
mod handler;
mod hooks;
mod processor;
mod template;
mod token;
mod tokenizer;
mod views;

pub use attributes::{AttrValue, Attributes};
pub use context::Context;
pub use error::ProcessError;
pub use handler::{TagHandler, TagHandlers};
pub use hooks::{EcmlHooks, HookError, HookValue};
pub use processor::Processor;
pub use template::{TemplateHandler, escape_html};
pub use token::{Tag, Token};
pub use tokenizer::{is_valid_keyword, tokenize};
pub use views::{DEFAULT_VIEW, DEFAULT_VIEW_DESCRIPTION, ViewRegistry};
