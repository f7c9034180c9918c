//! Show command implementation.
//!
//! Prints the configuration that results from layering the user file, an
//! explicit file, the environment and command-line overrides over the
//! registry defaults.

use crate::error::CliError;
use crate::utils::{load_configuration, render_config, GlobalOptions, OutputFormat};
use clap::Args;
use predictably::config::get_default_config;

/// Show the current configuration.
#[derive(Args)]
pub struct ShowCommand {
    /// Show the registry defaults instead of the layered configuration
    #[arg(long)]
    pub defaults: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "PREDICTABLY_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = if self.defaults {
            get_default_config()
        } else {
            load_configuration(global)?
        };

        println!("{}", render_config(&config, self.format)?);
        Ok(())
    }
}
