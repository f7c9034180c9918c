//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Show the layered (or default) configuration
//! - `params`: List the registered configuration parameters
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod params;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use params::ParamsCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
