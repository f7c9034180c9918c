//! Main entry point for the predictably CLI.
//!
//! This is the command-line interface for predictably's global
//! configuration. It provides commands for inspecting it:
//! - `show`: Show the layered (or default) configuration
//! - `params`: List the registered configuration parameters
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use predictably::config::ConfigUpdate;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = predictably::init_logger(cli.verbose, cli.quiet);

    // Collect per-key overrides
    let mut overrides = ConfigUpdate::new();
    if let Some(backend) = cli.dataframe_backend {
        overrides = overrides.dataframe_backend(backend);
    }
    if let Some(backend) = cli.math_backend {
        overrides = overrides.math_backend(backend);
    }
    if let Some(mode) = cli.display {
        overrides = overrides.display(mode);
    }
    if let Some(enabled) = cli.print_changed_only {
        overrides = overrides.print_changed_only(enabled);
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        config_dir: cli.config_dir,
        no_env: cli.no_env,
        overrides,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Params(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
