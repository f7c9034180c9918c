//! Environment variable handling for configuration overrides.
//!
//! | variable | key |
//! |---|---|
//! | `PREDICTABLY_DATAFRAME_BACKEND` | `dataframe_backend` |
//! | `PREDICTABLY_MATH_BACKEND` | `math_backend` |
//! | `PREDICTABLY_PRINT_CHANGED_ONLY` | `print_changed_only` |
//! | `PREDICTABLY_DISPLAY` | `display` |

use std::env;

use crate::config::registry::{DATAFRAME_BACKEND, DISPLAY, MATH_BACKEND, PRINT_CHANGED_ONLY};
use crate::config::schema::ConfigUpdate;
use crate::error::{Error, Result};

/// Environment variable for `dataframe_backend`.
pub const ENV_DATAFRAME_BACKEND: &str = "PREDICTABLY_DATAFRAME_BACKEND";
/// Environment variable for `math_backend`.
pub const ENV_MATH_BACKEND: &str = "PREDICTABLY_MATH_BACKEND";
/// Environment variable for `print_changed_only`.
pub const ENV_PRINT_CHANGED_ONLY: &str = "PREDICTABLY_PRINT_CHANGED_ONLY";
/// Environment variable for `display`.
pub const ENV_DISPLAY: &str = "PREDICTABLY_DISPLAY";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use predictably::config::EnvironmentConfig;
///
/// let overrides = EnvironmentConfig::overrides().unwrap();
/// println!("{} setting(s) from the environment", overrides.len());
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Reads every `PREDICTABLY_*` configuration variable that is set.
    ///
    /// String settings are taken verbatim and checked later by the validator.
    ///
    /// # Errors
    ///
    /// Returns an error if `PREDICTABLY_PRINT_CHANGED_ONLY` is not a
    /// recognizable boolean.
    pub fn overrides() -> Result<ConfigUpdate> {
        let mut update = ConfigUpdate::new();

        if let Ok(backend) = env::var(ENV_DATAFRAME_BACKEND) {
            update.insert(DATAFRAME_BACKEND, backend);
        }

        if let Ok(backend) = env::var(ENV_MATH_BACKEND) {
            update.insert(MATH_BACKEND, backend);
        }

        if let Ok(val) = env::var(ENV_PRINT_CHANGED_ONLY) {
            update.insert(
                PRINT_CHANGED_ONLY,
                Self::parse_bool(ENV_PRINT_CHANGED_ONLY, &val)?,
            );
        }

        if let Ok(display) = env::var(ENV_DISPLAY) {
            update.insert(DISPLAY, display);
        }

        Ok(update)
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `field` for anything else.
    pub fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::test_util::EnvGuard;
    use crate::value::Value;

    fn clear_all() -> Vec<EnvGuard> {
        [
            ENV_DATAFRAME_BACKEND,
            ENV_MATH_BACKEND,
            ENV_PRINT_CHANGED_ONLY,
            ENV_DISPLAY,
        ]
        .iter()
        .map(|key| EnvGuard::remove(key))
        .collect()
    }

    #[test]
    #[serial]
    fn test_no_variables_no_overrides() {
        let _guards = clear_all();
        assert!(EnvironmentConfig::overrides().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_reads_each_variable() {
        let _guards = clear_all();
        let _frame = EnvGuard::set(ENV_DATAFRAME_BACKEND, "pandas");
        let _math = EnvGuard::set(ENV_MATH_BACKEND, "numba");
        let _print = EnvGuard::set(ENV_PRINT_CHANGED_ONLY, "off");
        let _display = EnvGuard::set(ENV_DISPLAY, "diagram");

        let update = EnvironmentConfig::overrides().unwrap();
        assert_eq!(update.get(DATAFRAME_BACKEND), Some(&Value::from("pandas")));
        assert_eq!(update.get(MATH_BACKEND), Some(&Value::from("numba")));
        assert_eq!(update.get(PRINT_CHANGED_ONLY), Some(&Value::from(false)));
        assert_eq!(update.get(DISPLAY), Some(&Value::from("diagram")));
    }

    #[test]
    #[serial]
    fn test_invalid_boolean_fails() {
        let _guards = clear_all();
        let _print = EnvGuard::set(ENV_PRINT_CHANGED_ONLY, "maybe");
        let err = EnvironmentConfig::overrides().unwrap_err();
        assert!(err.to_string().contains(ENV_PRINT_CHANGED_ONLY));
    }

    #[test]
    fn test_parse_bool_variants() {
        for truthy in ["true", "1", "YES", "On"] {
            assert!(EnvironmentConfig::parse_bool("f", truthy).unwrap());
        }
        for falsy in ["false", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("f", falsy).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("f", "").is_err());
    }
}
