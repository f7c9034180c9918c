//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::global::{self, get_default_config};
use crate::config::loader::{ConfigLoader, ConfigSource, EXPLICIT_PRECEDENCE};
use crate::config::merger::ConfigMerger;
use crate::config::schema::{ConfigMap, ConfigUpdate};
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a configuration from files, the environment and programmatic
/// overrides.
///
/// Layers, lowest to highest precedence: the user file, an explicit file,
/// environment variables, programmatic overrides.
///
/// # Examples
///
/// ```
/// use predictably::config::{ConfigBuilder, ConfigUpdate, DisplayMode};
/// use predictably::Value;
///
/// let update = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_overrides(ConfigUpdate::new().display(DisplayMode::Diagram))
///     .build()
///     .unwrap();
/// assert_eq!(update.get("display"), Some(&Value::from("diagram")));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<ConfigUpdate>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user file from `dir` instead of `~/.predictably`.
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Adds an explicit configuration file above the user file.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Adds programmatic overrides above every other layer.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigUpdate) -> Self {
        match &mut self.overrides {
            Some(existing) => ConfigMerger::merge_into(existing, &overrides),
            None => self.overrides = Some(overrides),
        }
        self
    }

    /// Skips the user file. An explicit file is still read.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merges and validates the layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable is
    /// malformed, or the merged result fails validation.
    pub fn build(&self) -> Result<ConfigUpdate> {
        let sources = if self.skip_files {
            match &self.config_file {
                Some(path) => vec![ConfigSource {
                    path: path.clone(),
                    precedence: EXPLICIT_PRECEDENCE,
                    update: ConfigLoader::load_file(path)?,
                }],
                None => Vec::new(),
            }
        } else {
            ConfigLoader::load_all(self.config_dir.as_deref(), self.config_file.as_deref())?
        };
        let mut merged = ConfigMerger::merge(sources);

        if !self.skip_env {
            ConfigMerger::merge_into(&mut merged, &EnvironmentConfig::overrides()?);
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut merged, overrides);
        }

        ConfigValidator::validate(&merged)?;
        debug!("Built configuration with {} setting(s)", merged.len());
        Ok(merged)
    }

    /// The registry defaults overlaid with the built layers.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn resolve(&self) -> Result<ConfigMap> {
        let mut resolved = ConfigUpdate::from(get_default_config());
        ConfigMerger::merge_into(&mut resolved, &self.build()?);
        Ok(resolved.into_map())
    }

    /// Builds and applies the result with `set_config`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build); nothing is applied on error.
    pub fn apply(&self, make_thread_local: bool) -> Result<ConfigUpdate> {
        let update = self.build()?;
        global::set_config(&update, make_thread_local)?;
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    use super::*;
    use crate::config::environment::ENV_DISPLAY;
    use crate::config::global::{get_config, reset_config};
    use crate::config::schema::{DataframeBackend, DisplayMode};
    use crate::error::Error;
    use crate::test_util::EnvGuard;
    use crate::value::Value;

    #[test]
    #[serial]
    fn test_layer_precedence() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "display: diagram\ndataframe_backend: pandas\nmath_backend: numba\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.yaml");
        fs::write(&explicit, "dataframe_backend: fugue\n").unwrap();
        let _env = EnvGuard::set(ENV_DISPLAY, "text");

        let update = ConfigBuilder::new()
            .with_config_dir(dir.path())
            .with_config_file(&explicit)
            .with_overrides(ConfigUpdate::new().dataframe_backend(DataframeBackend::Input))
            .build()
            .unwrap();

        assert_eq!(update.get("math_backend"), Some(&Value::from("numba")));
        assert_eq!(update.get("display"), Some(&Value::from("text")));
        assert_eq!(update.get("dataframe_backend"), Some(&Value::from("input")));
    }

    #[test]
    #[serial]
    fn test_invalid_file_value_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "display: hologram\n").unwrap();

        let err = ConfigBuilder::new()
            .with_config_dir(dir.path())
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "display"));
    }

    #[test]
    #[serial]
    fn test_resolve_fills_defaults() {
        let resolved = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_overrides(ConfigUpdate::new().print_changed_only(false))
            .resolve()
            .unwrap();
        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved["print_changed_only"], Value::from(false));
        assert_eq!(resolved["display"], Value::from("text"));
    }

    #[test]
    #[serial]
    fn test_apply_thread_local() {
        reset_config();
        ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_overrides(ConfigUpdate::new().display(DisplayMode::Diagram))
            .apply(true)
            .unwrap();
        assert_eq!(get_config()["display"], Value::from("diagram"));
    }
}
