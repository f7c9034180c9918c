//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ParamsCommand, ShowCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use predictably::config::{DataframeBackend, DisplayMode, MathBackend};
use std::path::PathBuf;

/// Command-line tool for inspecting predictably's global configuration.
#[derive(Parser)]
#[command(name = "predictably")]
#[command(version, about = "Inspect and validate predictably configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Explicit configuration file, layered above the user file
    #[arg(long, value_name = "PATH", global = true, env = "PREDICTABLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the user config.yaml (default: ~/.predictably)
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        env = "PREDICTABLY_CONFIG_DIR"
    )]
    pub config_dir: Option<PathBuf>,

    /// Ignore PREDICTABLY_* configuration variables
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Override the dataframe backend
    #[arg(long, value_enum, global = true, ignore_case = true)]
    pub dataframe_backend: Option<DataframeBackend>,

    /// Override the math backend
    #[arg(long, value_enum, global = true, ignore_case = true)]
    pub math_backend: Option<MathBackend>,

    /// Override the representation style
    #[arg(long, value_enum, global = true, ignore_case = true)]
    pub display: Option<DisplayMode>,

    /// Override whether representations omit default-valued parameters
    #[arg(long, value_name = "BOOL", global = true)]
    pub print_changed_only: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the current configuration
    Show(ShowCommand),

    /// List the registered configuration parameters
    Params(ParamsCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
