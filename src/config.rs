//! Tool configuration module.
//!
//! Handles loading, validating, and merging `docs-kit.toml`. Stock defaults
//! are the base layer; a user file overrides only the keys it names.
//!
//! ## Config File Location
//!
//! `docs-kit.toml` is looked up in the current directory. A different file
//! can be passed with `--config`. A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [summary]
//! readme = "README.md"           # Index file that makes a directory a chapter
//! missing_readme = "placeholder" # "placeholder" or "skip"
//! max_depth = 32                 # Deepest directory nesting scanned
//!
//! [toctree]
//! max_depth = 16                 # Deepest nested index followed
//!
//! [fences]
//! default_language = "python"    # Tag for bare code fences
//! known_languages = ["py", "python", "sh", "bash", "js", "javascript"]
//!
//! [notebooks]
//! fallback_language = "python"   # Code fence tag when a notebook names none
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "docs-kit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `docs-kit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub summary: SummaryConfig,
    pub toctree: ToctreeConfig,
    pub fences: FencesConfig,
    pub notebooks: NotebooksConfig,
}

impl ToolsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summary.max_depth == 0 {
            return Err(ConfigError::Validation(
                "summary.max_depth must be at least 1".into(),
            ));
        }
        if self.toctree.max_depth == 0 {
            return Err(ConfigError::Validation(
                "toctree.max_depth must be at least 1".into(),
            ));
        }
        if !self.summary.readme.ends_with(".md") {
            return Err(ConfigError::Validation(
                "summary.readme must name a .md file".into(),
            ));
        }
        if self.summary.readme.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "summary.readme must be a file name, not a path".into(),
            ));
        }
        if self.fences.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fences.default_language must not be empty".into(),
            ));
        }
        if self.notebooks.fallback_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "notebooks.fallback_language must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// What the summarizer does with a directory lacking `README.md` front matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReadme {
    /// Emit an empty, title-less chapter (matches existing SUMMARY.md output).
    #[default]
    Placeholder,
    /// Leave the directory out of the tree.
    Skip,
}

/// `summary` subcommand settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// File name that roots a directory's page.
    pub readme: String,
    pub missing_readme: MissingReadme,
    /// Deepest directory nesting scanned before the run fails.
    pub max_depth: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            readme: "README.md".to_string(),
            missing_readme: MissingReadme::default(),
            max_depth: 32,
        }
    }
}

/// `toctree` subcommand settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToctreeConfig {
    /// Deepest chain of nested index files followed.
    pub max_depth: usize,
}

impl Default for ToctreeConfig {
    fn default() -> Self {
        Self { max_depth: 16 }
    }
}

/// `fences` subcommand settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FencesConfig {
    /// Language given to fences that have none.
    pub default_language: String,
    /// A file with any fence in one of these languages is left alone,
    /// apart from normalizing `py` to `python`.
    pub known_languages: Vec<String>,
}

impl Default for FencesConfig {
    fn default() -> Self {
        Self {
            default_language: "python".to_string(),
            known_languages: ["py", "python", "sh", "bash", "js", "javascript"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// `notebooks` subcommand settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotebooksConfig {
    pub fallback_language: String,
}

impl Default for NotebooksConfig {
    fn default() -> Self {
        Self {
            fallback_language: "python".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ToolsConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the config at `path` merged over stock defaults, then validate.
pub fn load_config(path: &Path) -> Result<ToolsConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(path)? {
        Some(overlay) => {
            tracing::debug!("Loaded config from {}", path.display());
            merge_toml(base, overlay)
        }
        None => base,
    };
    let config: ToolsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A documented `docs-kit.toml` holding every stock default.
pub fn stock_config_toml() -> &'static str {
    r#"# docs-kit configuration
# All options are optional. Values shown are the stock defaults.

[summary]
# Index file that turns a directory into a chapter.
readme = "README.md"
# Directories whose index has no front matter:
#   "placeholder" - emit an empty chapter heading
#   "skip"        - leave the directory out
missing_readme = "placeholder"
# Deepest directory nesting scanned before giving up.
max_depth = 32

[toctree]
# Deepest chain of nested index files followed.
max_depth = 16

[fences]
# Language tag added to bare code fences.
default_language = "python"
# Files already using any of these languages are only normalized (py -> python).
known_languages = ["py", "python", "sh", "bash", "js", "javascript"]

[notebooks]
# Code fence tag when a notebook does not declare its language.
fallback_language = "python"
"#
}
