//! Configuration value types.
//!
//! Global configuration is a flat map from registered key to [`Value`].
//! A [`ConfigUpdate`] is a partial map used to change it; typed setters cover
//! the registered keys, and arbitrary entries can be added for keys and
//! values that are checked later.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::registry::{DATAFRAME_BACKEND, DISPLAY, MATH_BACKEND, PRINT_CHANGED_ONLY};
use crate::value::Value;

/// A complete or partial configuration, keyed by parameter name.
pub type ConfigMap = BTreeMap<String, Value>;

/// Dataframe backend choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataframeBackend {
    /// polars
    Polars,
    /// pandas
    Pandas,
    /// fugue
    Fugue,
    /// Keep the input's own backend.
    Input,
}

impl DataframeBackend {
    /// The configuration value for this choice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polars => "polars",
            Self::Pandas => "pandas",
            Self::Fugue => "fugue",
            Self::Input => "input",
        }
    }
}

/// Math backend choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MathBackend {
    /// Built-in implementations.
    Predictably,
    /// numba
    Numba,
    /// numpy
    Numpy,
}

impl MathBackend {
    /// The configuration value for this choice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Predictably => "predictably",
            Self::Numba => "numba",
            Self::Numpy => "numpy",
        }
    }
}

/// Representation styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Plain text only.
    Text,
    /// Offer an HTML diagram alongside the text.
    Diagram,
}

impl DisplayMode {
    /// The configuration value for this choice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Diagram => "diagram",
        }
    }
}

macro_rules! choice_conversions {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$ty> for Value {
                fn from(choice: $ty) -> Self {
                    Value::from(choice.as_str())
                }
            }
        )*
    };
}

choice_conversions!(DataframeBackend, MathBackend, DisplayMode);

/// A partial configuration update.
///
/// Entries set to [`Value::None`] are unset and leave the key untouched when
/// applied.
///
/// # Examples
///
/// ```
/// use predictably::config::{ConfigUpdate, DisplayMode};
/// use predictably::Value;
///
/// let update = ConfigUpdate::new()
///     .display(DisplayMode::Diagram)
///     .print_changed_only(false);
/// assert_eq!(update.get("display"), Some(&Value::from("diagram")));
/// assert_eq!(update.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigUpdate {
    entries: ConfigMap,
}

impl ConfigUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `dataframe_backend`.
    #[must_use]
    pub fn dataframe_backend(self, backend: DataframeBackend) -> Self {
        self.with(DATAFRAME_BACKEND, backend)
    }

    /// Sets `math_backend`.
    #[must_use]
    pub fn math_backend(self, backend: MathBackend) -> Self {
        self.with(MATH_BACKEND, backend)
    }

    /// Sets `print_changed_only`.
    #[must_use]
    pub fn print_changed_only(self, enabled: bool) -> Self {
        self.with(PRINT_CHANGED_ONLY, enabled)
    }

    /// Sets `display`.
    #[must_use]
    pub fn display(self, mode: DisplayMode) -> Self {
        self.with(DISPLAY, mode)
    }

    /// Sets an arbitrary entry. Neither key nor value is checked here.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets an arbitrary entry in place.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.entries.insert(name.to_string(), value.into());
    }

    /// The entry for `name`, unset entries included.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// All entries, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Entries that carry a value, ordered by key.
    pub fn set_entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter().filter(|(_, value)| !value.is_none())
    }

    /// Number of entries, unset entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries as a map.
    #[must_use]
    pub fn into_map(self) -> ConfigMap {
        self.entries
    }
}

impl From<ConfigMap> for ConfigUpdate {
    fn from(entries: ConfigMap) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConfigUpdate {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
