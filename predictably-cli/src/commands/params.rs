//! Params command implementation.
//!
//! Lists every registered configuration parameter with its accepted types,
//! allowed values and default.

use crate::error::CliError;
use crate::utils::{render_structured, GlobalOptions, OutputFormat};
use clap::Args;
use predictably::config::{registry, ConfigParamSetting};
use predictably::format::format_seq;
use predictably::Value;
use serde::Serialize;

/// List the registered configuration parameters.
#[derive(Args)]
pub struct ParamsCommand {
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

/// One registry entry, as printed.
#[derive(Serialize)]
struct ParamRow<'a> {
    name: &'a str,
    expected_types: Vec<&'static str>,
    allowed_values: &'a [Value],
    default: &'a Value,
}

impl<'a> From<&'a ConfigParamSetting> for ParamRow<'a> {
    fn from(setting: &'a ConfigParamSetting) -> Self {
        Self {
            name: setting.name,
            expected_types: setting.expected_types.iter().map(|kind| kind.name()).collect(),
            allowed_values: setting.allowed_values(),
            default: &setting.default_value,
        }
    }
}

impl ParamsCommand {
    /// Execute the params command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let rows: Vec<ParamRow<'_>> = registry::settings().iter().map(ParamRow::from).collect();

        let rendered = match self.format {
            OutputFormat::Text => rows
                .iter()
                .map(format_row)
                .collect::<Vec<_>>()
                .join("\n"),
            structured => render_structured(&rows, structured)?,
        };

        println!("{rendered}");
        Ok(())
    }
}

fn format_row(row: &ParamRow<'_>) -> String {
    let allowed = if row.allowed_values.is_empty() {
        "any".to_string()
    } else {
        format_seq(row.allowed_values, ", ", None)
    };
    format!(
        "{}\t{}\t{allowed}\tdefault: {}",
        row.name,
        row.expected_types.join(" | "),
        row.default
    )
}
