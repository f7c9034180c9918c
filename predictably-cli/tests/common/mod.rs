//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers isolated from the caller's environment
//! - Configuration file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables read by the binary.
const PREDICTABLY_VARS: [&str; 8] = [
    "PREDICTABLY_CONFIG",
    "PREDICTABLY_CONFIG_DIR",
    "PREDICTABLY_DATAFRAME_BACKEND",
    "PREDICTABLY_MATH_BACKEND",
    "PREDICTABLY_PRINT_CHANGED_ONLY",
    "PREDICTABLY_DISPLAY",
    "PREDICTABLY_LOG_MODE",
    "PREDICTABLY_OUTPUT_FORMAT",
];

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory passed as `--config-dir`
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The config directory exists but holds no `config.yaml` yet.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("config");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Every `PREDICTABLY_*` variable is removed so the caller's shell
    /// cannot leak into the test.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("predictably").expect("Failed to find predictably binary");
        for var in PREDICTABLY_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with `--config-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write the user configuration file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let path = self.config_dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write user config");
        path
    }

    /// Write a configuration file under the temp directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    /// Run `show --format json` with extra arguments and parse the output.
    pub fn show_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(args)
            .arg("show")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run show command");

        assert!(
            output.status.success(),
            "Show failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
