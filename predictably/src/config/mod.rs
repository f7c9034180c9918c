//! Global configuration for predictably.
//!
//! This module provides:
//! - the fixed registry of configuration parameters and their validation rules
//! - the process-wide configuration with per-thread working copies
//! - scoped overrides that restore the previous configuration on drop
//! - YAML configuration files and environment variable overrides
//!
//! # Configuration Precedence
//!
//! When configuration is assembled with [`ConfigBuilder`], sources are
//! merged with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_overrides`)
//! 2. Environment variables (`PREDICTABLY_*`)
//! 3. An explicit configuration file
//! 4. User config (`~/.predictably/config.yaml`)
//! 5. Registry defaults
//!
//! # Examples
//!
//! Scoped override:
//!
//! ```
//! use predictably::config::{config_context, get_config, ConfigUpdate, DisplayMode};
//! use predictably::Value;
//!
//! let guard = config_context(&ConfigUpdate::new().display(DisplayMode::Diagram), true).unwrap();
//! assert_eq!(get_config()["display"], Value::from("diagram"));
//! drop(guard);
//! assert_eq!(get_config()["display"], Value::from("text"));
//! ```
//!
//! Loading layered configuration:
//!
//! ```no_run
//! use predictably::config::ConfigBuilder;
//! use std::path::Path;
//!
//! ConfigBuilder::new()
//!     .with_config_file(Path::new("predictably.yaml"))
//!     .apply(false)
//!     .unwrap();
//! ```

pub mod builder;
pub mod environment;
pub mod global;
pub mod loader;
pub mod merger;
pub mod registry;
pub mod schema;
pub mod setting;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use global::{
    config_context, get_config, get_default_config, reset_config, set_config, with_config,
    ConfigGuard,
};
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{ConfigMap, ConfigUpdate, DataframeBackend, DisplayMode, MathBackend};
pub use setting::ConfigParamSetting;
pub use validator::ConfigValidator;
