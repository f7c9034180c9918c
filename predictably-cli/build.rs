//! Build script for predictably-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("predictably")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and validate predictably configuration")
        .long_about(
            "Command-line tool for inspecting, layering and validating the global \
             configuration of predictably",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Explicit configuration file, layered above the user file")
                .value_name("PATH")
                .global(true)
                .env("PREDICTABLY_CONFIG"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the user config.yaml (default: ~/.predictably)")
                .value_name("PATH")
                .global(true)
                .env("PREDICTABLY_CONFIG_DIR"),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Ignore PREDICTABLY_* configuration variables")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dataframe-backend")
                .long("dataframe-backend")
                .help("Override the dataframe backend")
                .value_parser(["polars", "pandas", "fugue", "input"])
                .global(true),
        )
        .arg(
            Arg::new("math-backend")
                .long("math-backend")
                .help("Override the math backend")
                .value_parser(["predictably", "numba", "numpy"])
                .global(true),
        )
        .arg(
            Arg::new("display")
                .long("display")
                .help("Override the representation style")
                .value_parser(["text", "diagram"])
                .global(true),
        )
        .arg(
            Arg::new("print-changed-only")
                .long("print-changed-only")
                .help("Override whether representations omit default-valued parameters")
                .value_name("BOOL")
                .global(true),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Show the current configuration")
                .long_about("Print the layered configuration, or the registry defaults"),
            Command::new("params")
                .about("List the registered configuration parameters")
                .long_about("Show each parameter's accepted types, allowed values and default"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a predictably configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("predictably.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
