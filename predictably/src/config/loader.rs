//! Configuration file discovery and loading.
//!
//! Files are YAML mappings from configuration key to value, for example:
//!
//! ```yaml
//! dataframe_backend: pandas
//! print_changed_only: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::schema::ConfigUpdate;
use crate::error::{Error, Result};
use crate::value::Value;

/// Name of the per-user configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Directory under the home directory holding the user configuration.
pub const USER_CONFIG_DIR: &str = ".predictably";

/// Precedence of the user configuration file.
pub const USER_PRECEDENCE: u8 = 1;

/// Precedence of an explicitly named configuration file.
pub const EXPLICIT_PRECEDENCE: u8 = 2;

/// A configuration file with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed update.
    pub update: ConfigUpdate,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use predictably::config::ConfigLoader;
///
/// let sources = ConfigLoader::load_all(None, None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the user configuration and an optional explicit file.
    ///
    /// The user file is `{config_dir}/config.yaml` when `config_dir` is given,
    /// else `~/.predictably/config.yaml`; it is skipped if absent. An explicit
    /// file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or the explicit
    /// file does not exist.
    pub fn load_all(config_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user) = Self::load_user_config(config_dir)? {
            sources.push(user);
        }

        if let Some(path) = explicit {
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: EXPLICIT_PRECEDENCE,
                update: Self::load_file(path)?,
            });
        }

        sources.sort_by_key(|source| source.precedence);
        Ok(sources)
    }

    /// Loads the user configuration file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if no home directory can be determined.
    pub fn load_user_config(config_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = match config_dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => Self::user_config_path()?,
        };

        if !path.exists() {
            debug!("No user configuration at {}", path.display());
            return Ok(None);
        }

        let update = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: USER_PRECEDENCE,
            update,
        }))
    }

    /// Loads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load_file(path: &Path) -> Result<ConfigUpdate> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        let update = Self::parse(&contents, &path.display().to_string())?;
        debug!("Loaded {} setting(s) from {}", update.len(), path.display());
        Ok(update)
    }

    /// Parses YAML text into an update. An empty document is an empty update.
    ///
    /// `origin` names the text in error messages.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid YAML and for documents that are
    /// not a mapping.
    pub fn parse(contents: &str, origin: &str) -> Result<ConfigUpdate> {
        let blank = contents.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(ConfigUpdate::new());
        }

        let document: serde_yaml::Value =
            serde_yaml::from_str(contents).map_err(|e| Error::Validation {
                field: origin.to_string(),
                message: format!("Invalid YAML: {e}"),
            })?;

        match Value::from_yaml(document, origin)? {
            Value::None => Ok(ConfigUpdate::new()),
            Value::Map(entries) => Ok(ConfigUpdate::from(entries)),
            other => Err(Error::Validation {
                field: origin.to_string(),
                message: format!("Expected a mapping of settings, found {}", other.kind()),
            }),
        }
    }

    /// Path of the default user configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "Could not determine home directory".into(),
        })?;
        Ok(home.join(USER_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }
}
