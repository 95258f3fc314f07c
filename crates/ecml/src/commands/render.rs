//! `ecml render` command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use ecml_config::{CliSettings, Config};
use ecml_core::{DEFAULT_VIEW, Processor, TagHandlers, TemplateHandler, ViewRegistry};

use crate::error::CliError;
use crate::input::read_document;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render (default: stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover ecml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View the document belongs to.
    #[arg(long, default_value = DEFAULT_VIEW)]
    view: String,

    /// View parameter passed to tag handlers, as `name=value` (repeatable).
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// Process an additional view (repeatable, adds to config).
    #[arg(long = "allow-view", value_name = "VIEW")]
    allow_views: Vec<String>,

    /// Do not HTML-escape attribute values in templates (overrides config).
    #[arg(long)]
    no_escape: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            escape: self.no_escape.then_some(false),
            extra_views: self.allow_views,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let params = parse_params(&self.params)?;
        let processor = build_processor(&config);

        if !processor.views().contains(&self.view) {
            output.warning(&format!(
                "View '{}' is not configured for processing; output is unchanged",
                self.view
            ));
        }
        if processor.hooks().is_empty() {
            output.info("No tag templates configured; tags are left as-is");
        }

        let text = read_document(self.file.as_deref())?;
        let rendered = processor.process_view(&self.view, &text, params)?;
        output.document(&rendered)?;

        Ok(())
    }
}

/// Build a processor with one template handler per configured tag.
pub(crate) fn build_processor(config: &Config) -> Processor<TagHandlers> {
    let mut handlers = TagHandlers::new();
    for (keyword, tag) in &config.tags {
        handlers.push(Box::new(
            TemplateHandler::new(keyword.as_str(), tag.template.as_str()).with_escape(tag.escape),
        ));
    }

    let views: ViewRegistry = config.effective_views().into_iter().collect();
    Processor::new(handlers).with_views(views)
}

/// Parse `name=value` parameters.
pub(crate) fn parse_params(raw: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    raw.iter()
        .map(|param| {
            let (name, value) = param.split_once('=').ok_or_else(|| {
                CliError::Validation(format!("Invalid parameter '{param}': expected NAME=VALUE"))
            })?;
            if name.is_empty() {
                return Err(CliError::Validation(format!(
                    "Invalid parameter '{param}': name cannot be empty"
                )));
            }
            Ok((name.to_owned(), value.to_owned()))
        })
        .collect()
}
