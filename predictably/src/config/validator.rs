//! Strict configuration validation.
//!
//! Used where configuration enters from outside the program (files and the
//! environment). Unlike `set_config`, which warns and keeps the current
//! value, invalid input here is an error.

use crate::config::registry;
use crate::config::schema::ConfigUpdate;
use crate::error::{Error, Result};

/// Validates configuration updates against the registry.
///
/// # Examples
///
/// ```
/// use predictably::config::{ConfigUpdate, ConfigValidator};
///
/// ConfigValidator::validate(&ConfigUpdate::new().print_changed_only(false)).unwrap();
/// assert!(ConfigValidator::validate(&ConfigUpdate::new().with("display", "html")).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every entry of `update`. Unset entries are accepted.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedParameter` for unknown keys and a validation
    /// error for values of the wrong type or outside the allowed values.
    pub fn validate(update: &ConfigUpdate) -> Result<()> {
        for (name, value) in update.iter() {
            let setting = registry::require(name)?;
            if value.is_none() || setting.is_valid(value) {
                continue;
            }
            return Err(Error::Validation {
                field: name.clone(),
                message: setting.invalid_value_message(value, ""),
            });
        }
        Ok(())
    }

    /// Collects every problem instead of stopping at the first.
    #[must_use]
    pub fn problems(update: &ConfigUpdate) -> Vec<Error> {
        update
            .iter()
            .filter_map(|(name, value)| {
                let single = ConfigUpdate::new().with(name, value.clone());
                Self::validate(&single).err()
            })
            .collect()
    }
}
