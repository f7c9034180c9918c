//! Dynamically typed values for parameters, tags and configuration.
//!
//! Parameters of a declared object, its tags, and the global configuration
//! all carry [`Value`]s. Objects nest through [`Value::Object`], which holds
//! a shared [`ObjectRef`] handle so that a component keeps its identity when
//! its parameters are changed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::object::{Construct, ObjectRef};

/// Parameter name to value mapping, ordered by name.
pub type ParamMap = BTreeMap<String, Value>;

/// Tag or config flag name to value mapping, ordered by name.
pub type FlagMap = BTreeMap<String, Value>;

/// Runtime type of a [`Value`].
///
/// # Examples
///
/// ```
/// use predictably::{Value, ValueKind};
///
/// assert_eq!(Value::from("polars").kind(), ValueKind::Str);
/// assert_eq!(ValueKind::Bool.to_string(), "bool");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// The absent value.
    None,
    /// A boolean.
    Bool,
    /// A signed integer.
    Int,
    /// A floating point number.
    Float,
    /// A string.
    Str,
    /// A list of values.
    List,
    /// A string-keyed map of values.
    Map,
    /// A declared object.
    Object,
}

impl ValueKind {
    /// The name used for this kind in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Map => "dict",
            Self::Object => "BaseObject",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameter, tag, or configuration value.
///
/// `Value::None` doubles as the "unset" sentinel of configuration updates.
///
/// Equality is by value: `Int` and `Float` compare numerically, so `1` equals
/// `1.0`. `Bool` is a separate type and never equals a number.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A list of values.
    List(Vec<Value>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, Value>),
    /// A shared handle to a declared object.
    Object(ObjectRef),
}

impl Value {
    /// Wraps a declared object in a fresh shared handle.
    #[must_use]
    pub fn object<T: Construct + 'static>(object: T) -> Self {
        Self::Object(ObjectRef::new(object))
    }

    /// A copy that shares no declared object with `self`.
    ///
    /// [`Clone`] copies object handles, so both values see the same object;
    /// this copies the objects themselves, at any depth.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::List(items) => Self::List(items.iter().map(Self::deep_clone).collect()),
            Self::Map(map) => Self::Map(
                map.iter()
                    .map(|(key, item)| (key.clone(), item.deep_clone()))
                    .collect(),
            ),
            Self::Object(object) => Self::Object(object.deep_clone()),
            _ => self.clone(),
        }
    }

    /// Returns the runtime type of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::None => ValueKind::None,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns true for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Renders the value the way the representation layer shows it.
    ///
    /// Strings are quoted; everything else matches [`fmt::Display`].
    ///
    /// # Examples
    ///
    /// ```
    /// use predictably::Value;
    ///
    /// assert_eq!(Value::from("text").repr(), "'text'");
    /// assert_eq!(Value::from(true).repr(), "True");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => format!("'{s}'"),
            _ => self.to_string(),
        }
    }

    /// Converts a parsed YAML node into a value.
    ///
    /// `field` names the node in error messages.
    ///
    /// # Errors
    ///
    /// Returns a validation error for mapping keys that are not strings and
    /// for numbers outside the `i64`/`f64` range.
    pub fn from_yaml(node: serde_yaml::Value, field: &str) -> Result<Self> {
        use serde_yaml::Value as Yaml;

        match node {
            Yaml::Null => Ok(Self::None),
            Yaml::Bool(b) => Ok(Self::Bool(b)),
            Yaml::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .ok_or_else(|| Error::Validation {
                    field: field.into(),
                    message: format!("Unsupported number: {n}"),
                }),
            Yaml::String(s) => Ok(Self::Str(s)),
            Yaml::Sequence(items) => items
                .into_iter()
                .map(|item| Self::from_yaml(item, field))
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Yaml::Mapping(mapping) => {
                let mut map = BTreeMap::new();
                for (key, item) in mapping {
                    let Yaml::String(key) = key else {
                        return Err(Error::Validation {
                            field: field.into(),
                            message: "Mapping keys must be strings".into(),
                        });
                    };
                    let nested = format!("{field}.{key}");
                    let item = Self::from_yaml(item, &nested)?;
                    map.insert(key, item);
                }
                Ok(Self::Map(map))
            }
            Yaml::Tagged(tagged) => Self::from_yaml(tagged.value, field),
        }
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn int_equals_float(int: i64, float: f64) -> bool {
    // 2^63, the first float past the i64 range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                int_equals_float(*a, *b)
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Self::repr).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::Map(map) => {
                let entries: Vec<String> = map
                    .iter()
                    .map(|(key, item)| format!("'{key}': {}", item.repr()))
                    .collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
            Self::Object(object) => f.write_str(&object.repr()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Object(object) => serializer.serialize_str(&object.repr()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Self::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
