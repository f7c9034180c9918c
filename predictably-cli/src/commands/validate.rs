//! Command to validate a predictably configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use predictably::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a predictably configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        // 2. Parse the file
        let contents = std::fs::read_to_string(&self.config_path)?;
        let update =
            match ConfigLoader::parse(&contents, &self.config_path.display().to_string()) {
                Ok(update) => update,
                Err(e) => {
                    eprintln!("Parse error: {e}");
                    return Err(CliError::SemanticFailure(
                        "Configuration file is invalid".to_string(),
                    ));
                }
            };

        // 3. Report every problem, not just the first
        let problems = ConfigValidator::problems(&update);
        if problems.is_empty() {
            println!("Configuration is valid");
            return Ok(());
        }

        for problem in &problems {
            eprintln!("Validation error: {problem}");
        }
        Err(CliError::SemanticFailure(
            "Configuration validation failed".to_string(),
        ))
    }
}
