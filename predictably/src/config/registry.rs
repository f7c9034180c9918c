//! The fixed registry of global configuration parameters.
//!
//! | key | type | allowed values | default |
//! |---|---|---|---|
//! | `dataframe_backend` | str | polars, pandas, fugue, input | polars |
//! | `math_backend` | str | predictably, numba, numpy | predictably |
//! | `print_changed_only` | bool | true, false | true |
//! | `display` | str | text, diagram | text |

use std::sync::OnceLock;

use crate::config::schema::ConfigMap;
use crate::config::setting::ConfigParamSetting;
use crate::error::Error;
use crate::format::format_seq;
use crate::value::{Value, ValueKind};

/// Key selecting the dataframe backend.
pub const DATAFRAME_BACKEND: &str = "dataframe_backend";
/// Key selecting the math backend.
pub const MATH_BACKEND: &str = "math_backend";
/// Key controlling whether representations omit default-valued parameters.
pub const PRINT_CHANGED_ONLY: &str = "print_changed_only";
/// Key selecting the representation style.
pub const DISPLAY: &str = "display";

/// Allowed `dataframe_backend` values.
pub const DATAFRAME_BACKENDS: [&str; 4] = ["polars", "pandas", "fugue", "input"];
/// Allowed `math_backend` values.
pub const MATH_BACKENDS: [&str; 3] = ["predictably", "numba", "numpy"];
/// Allowed `display` values.
pub const DISPLAY_MODES: [&str; 2] = ["text", "diagram"];

fn string_setting(name: &'static str, allowed: &[&str]) -> ConfigParamSetting {
    ConfigParamSetting::new(
        name,
        vec![ValueKind::Str],
        Some(allowed.iter().map(|value| Value::from(*value)).collect()),
        Value::from(allowed[0]),
    )
}

/// Every registered setting, ordered by key.
pub fn settings() -> &'static [ConfigParamSetting] {
    static REGISTRY: OnceLock<Vec<ConfigParamSetting>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        vec![
            string_setting(DATAFRAME_BACKEND, &DATAFRAME_BACKENDS),
            string_setting(DISPLAY, &DISPLAY_MODES),
            string_setting(MATH_BACKEND, &MATH_BACKENDS),
            ConfigParamSetting::new(
                PRINT_CHANGED_ONLY,
                vec![ValueKind::Bool],
                Some(vec![Value::from(true), Value::from(false)]),
                Value::from(true),
            ),
        ]
    })
}

/// The setting registered under `name`.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ConfigParamSetting> {
    settings().iter().find(|setting| setting.name == name)
}

/// Registered keys, ordered.
#[must_use]
pub fn names() -> Vec<&'static str> {
    settings().iter().map(|setting| setting.name).collect()
}

/// The default value of every registered key.
#[must_use]
pub fn defaults() -> ConfigMap {
    settings()
        .iter()
        .map(|setting| (setting.name.to_string(), setting.default_value.clone()))
        .collect()
}

/// The setting for `name`, or the error for an unrecognized key.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedParameter`] if `name` is not registered.
pub fn require(name: &str) -> Result<&'static ConfigParamSetting, Error> {
    lookup(name).ok_or_else(|| Error::UnrecognizedParameter {
        name: name.to_string(),
        expected: format_seq(&names(), ", ", Some("or")),
    })
}
