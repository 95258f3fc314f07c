//! Processing errors.

use crate::hooks::HookError;

/// Error returned by [`Processor::process`](crate::Processor::process).
///
/// Either the whole output is produced or one of these is returned; there is
/// no partial output.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The token-list hook returned something other than a list.
    #[error("ecml:preprocess hook must return a list, got {found}")]
    InvalidTokenList {
        /// Kind of value that was returned.
        found: &'static str,
    },
    /// An item in the token list is neither a string nor a token.
    #[error("ecml:preprocess items must be strings or tokens, got {found} at index {index}")]
    InvalidToken {
        /// Position of the item in the list.
        index: usize,
        /// Kind of value that was found.
        found: &'static str,
    },
    /// A hook failed.
    #[error("hook failed: {0}")]
    Hook(#[from] HookError),
}
