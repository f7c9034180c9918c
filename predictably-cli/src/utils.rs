//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command, the
//! layered configuration loading they rely on, and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use predictably::config::{ConfigBuilder, ConfigMap, ConfigUpdate};
use serde::Serialize;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Directory holding the user configuration file.
    pub config_dir: Option<PathBuf>,

    /// Ignore configuration environment variables.
    pub no_env: bool,

    /// Per-key overrides given on the command line.
    pub overrides: ConfigUpdate,
}

/// Output format for commands that print configuration.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key: value` lines (human-readable)
    #[default]
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// A configuration builder for every layer the global options select.
///
/// Precedence, highest first: command-line overrides, environment
/// variables (unless `--no-env`), `--config`, the user file.
pub fn config_builder(global: &GlobalOptions) -> ConfigBuilder {
    let mut builder = ConfigBuilder::new().with_overrides(global.overrides.clone());
    if let Some(dir) = &global.config_dir {
        builder = builder.with_config_dir(dir);
    }
    if let Some(path) = &global.config {
        builder = builder.with_config_file(path);
    }
    if global.no_env {
        builder = builder.skip_env();
    }
    builder
}

/// Resolve the layered configuration over the registry defaults.
pub fn load_configuration(global: &GlobalOptions) -> Result<ConfigMap, CliError> {
    config_builder(global).resolve().map_err(CliError::from)
}

/// Render a serializable value as JSON or YAML.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::InvalidArguments(format!("Cannot render JSON: {e}"))),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| CliError::InvalidArguments(format!("Cannot render YAML: {e}"))),
        OutputFormat::Text => Err(CliError::InvalidArguments(
            "text output is not structured".to_string(),
        )),
    }
}

/// Render a configuration map in the requested format.
pub fn render_config(config: &ConfigMap, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(config
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        structured => render_structured(config, structured),
    }
}
