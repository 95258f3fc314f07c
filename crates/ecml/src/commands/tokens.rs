//! `ecml tokens` command implementation.

use std::path::PathBuf;

use clap::Args;
use ecml_core::tokenize;

use crate::error::CliError;
use crate::input::read_document;
use crate::output::Output;

/// Arguments for the tokens command.
#[derive(Args)]
pub(crate) struct TokensArgs {
    /// Document to tokenize (default: stdin).
    file: Option<PathBuf>,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl TokensArgs {
    /// Execute the tokens command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let text = read_document(self.file.as_deref())?;

        let tokens = tokenize(&text);
        tracing::info!(tokens = tokens.len(), "Tokenized document");

        let mut json = if self.compact {
            serde_json::to_string(&tokens)?
        } else {
            serde_json::to_string_pretty(&tokens)?
        };
        json.push('\n');
        output.document(&json)?;

        Ok(())
    }
}
