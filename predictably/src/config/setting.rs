//! Validation rules for a single global configuration parameter.

use crate::format::format_seq;
use crate::value::{Value, ValueKind};
use crate::warnings;

/// Name, accepted types, optional allowed values and default of one global
/// configuration parameter.
///
/// # Examples
///
/// ```
/// use predictably::config::ConfigParamSetting;
/// use predictably::{Value, ValueKind};
///
/// let setting = ConfigParamSetting::new(
///     "display",
///     vec![ValueKind::Str],
///     Some(vec![Value::from("text"), Value::from("diagram")]),
///     Value::from("text"),
/// );
/// assert!(setting.is_valid(&Value::from("diagram")));
/// assert!(!setting.is_valid(&Value::from("html")));
/// assert!(!setting.is_valid(&Value::from(true)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigParamSetting {
    /// Parameter name.
    pub name: &'static str,
    /// Accepted runtime types.
    pub expected_types: Vec<ValueKind>,
    /// Accepted values, or `None` to accept any value of an expected type.
    pub allowed_values: Option<Vec<Value>>,
    /// Value used when nothing valid is available.
    pub default_value: Value,
}

impl ConfigParamSetting {
    /// Creates a setting.
    #[must_use]
    pub fn new(
        name: &'static str,
        expected_types: Vec<ValueKind>,
        allowed_values: Option<Vec<Value>>,
        default_value: Value,
    ) -> Self {
        Self {
            name,
            expected_types,
            allowed_values,
            default_value,
        }
    }

    /// Allowed values; empty when any value of an expected type is accepted.
    #[must_use]
    pub fn allowed_values(&self) -> &[Value] {
        self.allowed_values.as_deref().unwrap_or_default()
    }

    /// Whether `value` has an expected type and, if values are restricted,
    /// is one of them.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.expected_types.contains(&value.kind())
            && self
                .allowed_values
                .as_ref()
                .map_or(true, |allowed| allowed.contains(value))
    }

    /// The warning text for an invalid `value`, starting with `prefix`.
    #[must_use]
    pub fn invalid_value_message(&self, value: &Value, prefix: &str) -> String {
        let mut message = format!(
            "{prefix}When setting global config values for `{}`, the values should be of \
             type {}.\n",
            self.name,
            format_seq(&self.expected_types, ", ", Some("or"))
        );
        if let Some(allowed) = &self.allowed_values {
            message.push_str(&format!(
                "Allowed values should be one of {}. ",
                format_seq(allowed, ", ", Some("or"))
            ));
        }
        message.push_str(&format!("But found {value}."));
        message
    }

    /// Returns `value` if valid; otherwise warns and returns `fallback`, or
    /// the setting's default when `fallback` is `Value::None`.
    ///
    /// Never fails.
    pub fn coerce_or_default(&self, value: Value, fallback: Value, prefix: &str) -> Value {
        if self.is_valid(&value) {
            return value;
        }
        warnings::emit(&self.invalid_value_message(&value, prefix));
        if fallback.is_none() {
            self.default_value.clone()
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::capture_warnings;

    fn print_changed_only() -> ConfigParamSetting {
        ConfigParamSetting::new(
            "print_changed_only",
            vec![ValueKind::Bool],
            Some(vec![Value::from(true), Value::from(false)]),
            Value::from(true),
        )
    }

    #[test]
    fn test_type_checked_before_membership() {
        let setting = print_changed_only();
        assert!(setting.is_valid(&Value::from(false)));
        assert!(!setting.is_valid(&Value::from("False")));
        assert!(!setting.is_valid(&Value::from(0)));
    }

    #[test]
    fn test_unrestricted_values() {
        let setting = ConfigParamSetting::new("n", vec![ValueKind::Int], None, Value::from(1));
        assert!(setting.is_valid(&Value::from(-7)));
        assert!(setting.allowed_values().is_empty());
    }

    #[test]
    fn test_coerce_valid_value_is_silent() {
        let (value, warnings) = capture_warnings(|| {
            print_changed_only().coerce_or_default(Value::from(false), Value::None, "")
        });
        assert_eq!(value, Value::from(false));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_coerce_invalid_value_warns_once() {
        let (value, warnings) = capture_warnings(|| {
            print_changed_only().coerce_or_default(Value::from("False"), Value::from(false), "")
        });
        assert_eq!(value, Value::from(false));
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            "When setting global config values for `print_changed_only`, the values should \
             be of type bool.\nAllowed values should be one of True or False. But found False."
        );
    }

    #[test]
    fn test_coerce_without_fallback_uses_default() {
        let (value, _) = capture_warnings(|| {
            print_changed_only().coerce_or_default(Value::from(3), Value::None, "prefix. ")
        });
        assert_eq!(value, Value::from(true));
    }

    #[test]
    fn test_message_lists_choices_as_disjunction() {
        let setting = ConfigParamSetting::new(
            "display",
            vec![ValueKind::Str],
            Some(vec![Value::from("text"), Value::from("diagram")]),
            Value::from("text"),
        );
        let message = setting.invalid_value_message(&Value::from("html"), "Note: ");
        assert!(message.starts_with("Note: When setting"));
        assert!(message.contains("one of text or diagram."));
        assert!(message.ends_with("But found html."));
    }
}
