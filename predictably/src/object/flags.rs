//! Tag and config flags: class tables merged along the type lineage, with
//! per-instance dynamic overrides on top.
//!
//! The same mechanism serves two independent namespaces, selected by
//! [`FlagKind`]. An override written under one never affects the other.
//!
//! Flag maps are deep-copied on the way in and on the way out: an object
//! stored as a flag is never shared with the caller.

use crate::config::{self, registry};
use crate::error::{Error, Result};
use crate::object::base::BaseObject;
use crate::object::descriptor::TypeDescriptor;
use crate::value::{FlagMap, Value};

/// The flag namespace an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// Capability and behaviour tags.
    Tags,
    /// Local overrides of the global configuration.
    Config,
}

impl FlagKind {
    /// Attribute name of the class-level table.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::Tags => "_tags",
            Self::Config => "_config",
        }
    }

    /// Label used in lookup errors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tags => "Tag",
            Self::Config => "Config",
        }
    }

    fn declared_by(self, descriptor: &TypeDescriptor) -> FlagMap {
        match self {
            Self::Tags => (descriptor.tags)(),
            Self::Config => (descriptor.config)(),
        }
    }
}

fn deep_clone_flags(flags: &FlagMap) -> FlagMap {
    flags
        .iter()
        .map(|(name, value)| (name.clone(), value.deep_clone()))
        .collect()
}

fn lookup(
    flags: &FlagMap,
    kind: FlagKind,
    name: &str,
    default: Value,
    raise: bool,
) -> Result<Value> {
    match flags.get(name) {
        Some(value) => Ok(value.clone()),
        None if raise => Err(Error::FlagNotFound {
            label: kind.label(),
            name: name.to_string(),
        }),
        None => Ok(default),
    }
}

impl TypeDescriptor {
    /// Class-level flags of `kind`, merged from the root down so that the
    /// closest declaration wins.
    #[must_use]
    pub fn class_flags(&self, kind: FlagKind) -> FlagMap {
        let mut merged = FlagMap::new();
        for descriptor in self.lineage() {
            merged.extend(deep_clone_flags(&kind.declared_by(descriptor)));
        }
        merged
    }

    /// Looks up one class-level flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlagNotFound`] when the flag is absent and
    /// `raise_if_missing` is set.
    pub fn class_flag(
        &self,
        kind: FlagKind,
        name: &str,
        default: Value,
        raise_if_missing: bool,
    ) -> Result<Value> {
        lookup(&self.class_flags(kind), kind, name, default, raise_if_missing)
    }

    /// Class-level tags.
    #[must_use]
    pub fn class_tags(&self) -> FlagMap {
        self.class_flags(FlagKind::Tags)
    }

    /// Looks up one class-level tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlagNotFound`] when absent and `raise_if_missing` is set.
    pub fn class_tag(&self, name: &str, default: Value, raise_if_missing: bool) -> Result<Value> {
        self.class_flag(FlagKind::Tags, name, default, raise_if_missing)
    }
}

/// Class flags of the object's type with its dynamic overrides merged on top.
pub fn instance_flags<O: BaseObject + ?Sized>(object: &O, kind: FlagKind) -> FlagMap {
    let mut flags = object.descriptor().class_flags(kind);
    if let Some(dynamic) = object.state().dynamic_flags(kind) {
        flags.extend(deep_clone_flags(dynamic));
    }
    flags
}

/// Looks up one instance flag.
///
/// # Errors
///
/// Returns [`Error::FlagNotFound`] when absent and `raise_if_missing` is set.
pub fn get_flag<O: BaseObject + ?Sized>(
    object: &O,
    kind: FlagKind,
    name: &str,
    default: Value,
    raise_if_missing: bool,
) -> Result<Value> {
    lookup(&instance_flags(object, kind), kind, name, default, raise_if_missing)
}

/// Merges a copy of `updates` into the object's dynamic overrides of `kind`.
pub fn set_flags<O: BaseObject + ?Sized>(object: &mut O, kind: FlagKind, updates: FlagMap) {
    let updates = deep_clone_flags(&updates);
    object.state_mut().dynamic_flags_mut(kind).extend(updates);
}

/// Copies the effective flags of `other` into `object`'s dynamic overrides.
///
/// With `names`, only those names that `other` has are copied.
pub fn clone_flags<O, P>(object: &mut O, kind: FlagKind, other: &P, names: Option<&[&str]>)
where
    O: BaseObject + ?Sized,
    P: BaseObject + ?Sized,
{
    let mut source = instance_flags(other, kind);
    if let Some(names) = names {
        source.retain(|name, _| names.contains(&name.as_str()));
    }
    set_flags(object, kind, source);
}

/// The configuration that applies to `object`.
///
/// Starts from the calling thread's global configuration and overlays the
/// object's config flags. Values for registered keys are validated; an
/// invalid one falls back to the global value with a warning. Unregistered
/// keys pass through unchanged.
pub fn effective_config<O: BaseObject + ?Sized>(object: &O) -> FlagMap {
    let mut merged = config::get_config();
    for (name, value) in instance_flags(object, FlagKind::Config) {
        let value = match registry::lookup(&name) {
            Some(setting) => {
                let fallback = merged.get(&name).cloned().unwrap_or_default();
                let message = format!(
                    "Invalid value encountered for global configuration parameter {name}. \
                     Using global parameter configuration value.\n"
                );
                setting.coerce_or_default(value, fallback, &message)
            }
            None => value,
        };
        merged.insert(name, value);
    }
    merged
}
