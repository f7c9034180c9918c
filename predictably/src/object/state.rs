//! Per-instance state of a declared object.
//!
//! Instance attributes are partitioned explicitly instead of being
//! discovered by reflection:
//!
//! - parameter attributes, written by the constructor under the parameter's name;
//! - derived attributes (fitted state, components), wiped by `reset`;
//! - protected attributes, any name containing `__`, which survive `reset`;
//! - dynamic tag and config overrides, created on first write.

use std::collections::BTreeMap;

use crate::object::flags::FlagKind;
use crate::value::{FlagMap, ParamMap, Value};

/// Attribute names containing this marker are protected from `reset`.
pub const PROTECTED_MARKER: &str = "__";

/// Instance state embedded in every declared object.
#[derive(Debug, Clone, Default)]
pub struct ObjectState {
    params: ParamMap,
    derived: BTreeMap<String, Value>,
    protected: BTreeMap<String, Value>,
    tags_dynamic: Option<FlagMap>,
    config_dynamic: Option<FlagMap>,
}

impl ObjectState {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a constructor parameter under its own name.
    pub fn store_param(&mut self, name: &str, value: Value) {
        self.params.insert(name.to_string(), value);
    }

    /// Stores every entry of `params` as a parameter attribute.
    pub fn store_params(&mut self, params: &ParamMap) {
        self.params
            .extend(params.iter().map(|(name, value)| (name.clone(), value.clone())));
    }

    /// Returns the parameter attribute `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Sets an instance attribute.
    ///
    /// Names already stored as parameters are updated in place; names
    /// containing [`PROTECTED_MARKER`] go to protected state; anything else
    /// is derived state.
    pub fn set_attr(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.params.get_mut(name) {
            *slot = value;
        } else if name.contains(PROTECTED_MARKER) {
            self.protected.insert(name.to_string(), value);
        } else {
            self.derived.insert(name.to_string(), value);
        }
    }

    /// Parameter attributes, ordered by name.
    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// A copy whose nested objects are copies too, not shared handles.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self {
            params: deep_clone_map(&self.params),
            derived: deep_clone_map(&self.derived),
            protected: deep_clone_map(&self.protected),
            tags_dynamic: self.tags_dynamic.as_ref().map(deep_clone_map),
            config_dynamic: self.config_dynamic.as_ref().map(deep_clone_map),
        }
    }

    /// Looks up an instance attribute in any partition.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.params
            .get(name)
            .or_else(|| self.derived.get(name))
            .or_else(|| self.protected.get(name))
    }

    /// Whether the instance has attribute `name`.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Removes a derived or protected attribute, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.derived
            .remove(name)
            .or_else(|| self.protected.remove(name))
    }

    /// Derived attributes, ordered by name.
    pub fn derived(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.derived.iter()
    }

    /// Protected attributes, ordered by name.
    pub fn protected(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.protected.iter()
    }

    /// The dynamic override map for `kind`, if one has been created.
    #[must_use]
    pub fn dynamic_flags(&self, kind: FlagKind) -> Option<&FlagMap> {
        match kind {
            FlagKind::Tags => self.tags_dynamic.as_ref(),
            FlagKind::Config => self.config_dynamic.as_ref(),
        }
    }

    /// The dynamic override map for `kind`, created on first access.
    pub fn dynamic_flags_mut(&mut self, kind: FlagKind) -> &mut FlagMap {
        match kind {
            FlagKind::Tags => self.tags_dynamic.get_or_insert_with(FlagMap::new),
            FlagKind::Config => self.config_dynamic.get_or_insert_with(FlagMap::new),
        }
    }

    /// Drops everything `reset` discards: parameters, derived state and
    /// dynamic overrides. Protected attributes are kept.
    pub fn clear_for_reset(&mut self) {
        self.params.clear();
        self.derived.clear();
        self.tags_dynamic = None;
        self.config_dynamic = None;
    }
}

fn deep_clone_map(map: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    map.iter()
        .map(|(name, value)| (name.clone(), value.deep_clone()))
        .collect()
}
