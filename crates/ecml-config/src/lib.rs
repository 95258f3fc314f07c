//! Configuration management for ECML.
//!
//! Parses `ecml.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [views]
//! "output/longtext" = "Longtext Output"
//! "blog/body" = "Blog post body"
//!
//! [tags.kbd]
//! template = "<kbd>{key}</kbd>"
//!
//! [tags.raw]
//! template = "{html}"
//! escape = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ecml_core::is_valid_keyword;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ecml.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override HTML escaping for every tag template.
    pub escape: Option<bool>,
    /// Additional views to process.
    pub extra_views: Vec<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Views to process, mapped to a description.
    ///
    /// `None` keeps the built-in default view list.
    pub views: Option<BTreeMap<String, String>>,
    /// Tag templates keyed by tag keyword.
    pub tags: BTreeMap<String, TagConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Template configuration for one tag keyword.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagConfig {
    /// Output template with `{attribute}` placeholders.
    pub template: String,
    /// Whether substituted attribute values are HTML-escaped.
    #[serde(default = "default_escape")]
    pub escape: bool,
}

fn default_escape() -> bool {
    true
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ecml.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(escape) = settings.escape {
            for tag in self.tags.values_mut() {
                tag.escape = escape;
            }
        }
        if !settings.extra_views.is_empty() {
            let views = self.views.get_or_insert_with(default_views);
            for view in &settings.extra_views {
                views
                    .entry(view.clone())
                    .or_insert_with(|| "Added on the command line".to_owned());
            }
        }
    }

    /// Views to process, falling back to the built-in defaults.
    #[must_use]
    pub fn effective_views(&self) -> BTreeMap<String, String> {
        self.views.clone().unwrap_or_else(default_views)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(views) = &self.views {
            for (view, description) in views {
                require_non_empty(view, "views key")?;
                require_non_empty(description, &format!("views.\"{view}\""))?;
            }
        }

        for (keyword, tag) in &self.tags {
            if !is_valid_keyword(keyword) {
                return Err(ConfigError::Validation(format!(
                    "tags.{keyword}: keyword must contain only a-z, 0-9 and '.'"
                )));
            }
            require_non_empty(&tag.template, &format!("tags.{keyword}.template"))?;
        }

        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

/// Built-in view list.
fn default_views() -> BTreeMap<String, String> {
    let mut views = BTreeMap::new();
    views.insert(
        ecml_core::DEFAULT_VIEW.to_owned(),
        ecml_core::DEFAULT_VIEW_DESCRIPTION.to_owned(),
    );
    views
}
