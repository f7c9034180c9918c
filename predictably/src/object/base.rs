//! The declared object protocol.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::object::descriptor::TypeDescriptor;
use crate::object::equality;
use crate::object::flags::{self, FlagKind};
use crate::object::handle::{AsAny, ObjectRef};
use crate::object::params;
use crate::object::state::ObjectState;
use crate::repr;
use crate::value::{FlagMap, ParamMap, Value};

/// A declared object: a value with introspectable constructor parameters,
/// inheritable tags and local configuration.
///
/// Implementors supply [`descriptor`](Self::descriptor) and access to their
/// embedded [`ObjectState`]; every other method has a default that
/// implements the protocol on top of those. Override [`init`](Self::init) to
/// run a custom constructor body; it is re-run by [`reset`](Self::reset).
///
/// # Examples
///
/// ```
/// use predictably::object::{
///     BaseObject, Construct, ObjectState, ParamSpec, TypeDescriptor, BASE_OBJECT,
/// };
/// use predictably::{ParamMap, Value};
///
/// fn params() -> Vec<ParamSpec> {
///     vec![ParamSpec::with_default("alpha", 0.5)]
/// }
///
/// static SHRINKAGE: TypeDescriptor = TypeDescriptor {
///     name: "Shrinkage",
///     parent: Some(&BASE_OBJECT),
///     params: Some(params),
///     ..TypeDescriptor::DEFAULT
/// };
///
/// #[derive(Debug, Default)]
/// struct Shrinkage {
///     state: ObjectState,
/// }
///
/// impl BaseObject for Shrinkage {
///     fn descriptor(&self) -> &'static TypeDescriptor {
///         &SHRINKAGE
///     }
///     fn state(&self) -> &ObjectState {
///         &self.state
///     }
///     fn state_mut(&mut self) -> &mut ObjectState {
///         &mut self.state
///     }
/// }
///
/// impl Construct for Shrinkage {
///     fn blank() -> Self {
///         Self::default()
///     }
/// }
///
/// let mut shrinkage = Shrinkage::build(ParamMap::new()).unwrap();
/// assert_eq!(shrinkage.get_params(false).unwrap()["alpha"], Value::from(0.5));
///
/// shrinkage
///     .set_params(&ParamMap::from([("alpha".to_string(), Value::from(0.9))]))
///     .unwrap();
/// assert_eq!(shrinkage.repr(), "Shrinkage(alpha=0.9)");
/// ```
pub trait BaseObject: AsAny + Send + Sync + fmt::Debug {
    /// The static descriptor of the concrete type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// The embedded instance state.
    fn state(&self) -> &ObjectState;

    /// The embedded instance state, mutably.
    fn state_mut(&mut self) -> &mut ObjectState;

    /// Constructor body, run with the resolved parameters on construction and
    /// again on every [`reset`](Self::reset).
    ///
    /// The default stores each parameter under its own name.
    fn init(&mut self, params: &ParamMap) {
        self.state_mut().store_params(params);
    }

    /// Sorted names of the declared constructor parameters.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidSignature` when the signature is variadic.
    fn param_names(&self) -> Result<Vec<&'static str>> {
        params::declared_parameter_names(self.descriptor())
    }

    /// Declared parameters that have a default, mapped to it.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidSignature` when the signature is variadic.
    fn param_defaults(&self) -> Result<ParamMap> {
        params::param_defaults(self.descriptor())
    }

    /// Parameters of this object; with `deep`, nested parameters of object
    /// valued parameters are added as `component__param`.
    ///
    /// # Errors
    ///
    /// Fails with `MissingParameterAttribute` when a declared parameter is not
    /// stored on the instance.
    fn get_params(&self, deep: bool) -> Result<ParamMap> {
        params::get_params(self, deep)
    }

    /// Sets parameters, including nested `component__param` keys, then
    /// resets the object.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownParameter` for names that are not parameters, and
    /// leaves the object unchanged in that case.
    fn set_params(&mut self, updates: &ParamMap) -> Result<()> {
        params::set_params(self, updates)
    }

    /// Returns the object to its freshly constructed state with its current
    /// parameters. Protected attributes (names containing `__`) survive.
    ///
    /// # Errors
    ///
    /// Propagates parameter lookup errors.
    fn reset(&mut self) -> Result<()> {
        params::reset(self)
    }

    /// Whether any parameter holds a declared object.
    ///
    /// # Errors
    ///
    /// Propagates parameter lookup errors.
    fn is_composite(&self) -> Result<bool> {
        params::is_composite(self)
    }

    /// Derived attributes holding declared objects, optionally restricted to
    /// subtypes of `base`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidBaseType` when `base` is outside the hierarchy.
    fn components(
        &self,
        base: Option<&'static TypeDescriptor>,
    ) -> Result<BTreeMap<String, ObjectRef>> {
        params::components(self, base)
    }

    /// Class flags of `kind` merged with this instance's dynamic overrides.
    fn get_flags(&self, kind: FlagKind) -> FlagMap {
        flags::instance_flags(self, kind)
    }

    /// Looks up one flag of `kind`.
    ///
    /// # Errors
    ///
    /// Fails with `FlagNotFound` when the flag is absent and
    /// `raise_if_missing` is set.
    fn get_flag(
        &self,
        kind: FlagKind,
        name: &str,
        default: Value,
        raise_if_missing: bool,
    ) -> Result<Value> {
        flags::get_flag(self, kind, name, default, raise_if_missing)
    }

    /// Merges `updates` into the dynamic overrides of `kind`.
    fn set_flags(&mut self, kind: FlagKind, updates: FlagMap) {
        flags::set_flags(self, kind, updates);
    }

    /// Copies flags of `kind` from `other` into this instance's dynamic
    /// overrides; all of them, or only the listed names present on `other`.
    fn clone_flags(&mut self, kind: FlagKind, other: &dyn BaseObject, names: Option<&[&str]>) {
        flags::clone_flags(self, kind, other, names);
    }

    /// Effective tags of this instance.
    fn get_tags(&self) -> FlagMap {
        self.get_flags(FlagKind::Tags)
    }

    /// Looks up one tag, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Fails with `FlagNotFound` when absent and `raise_if_missing` is set.
    fn get_tag(&self, name: &str, default: Value, raise_if_missing: bool) -> Result<Value> {
        self.get_flag(FlagKind::Tags, name, default, raise_if_missing)
    }

    /// Sets dynamic tag overrides.
    fn set_tags(&mut self, updates: FlagMap) {
        self.set_flags(FlagKind::Tags, updates);
    }

    /// Copies tags from `other`.
    fn clone_tags(&mut self, other: &dyn BaseObject, names: Option<&[&str]>) {
        self.clone_flags(FlagKind::Tags, other, names);
    }

    /// Effective configuration: the current global configuration overlaid
    /// with this object's validated config flags.
    fn get_config(&self) -> FlagMap {
        flags::effective_config(self)
    }

    /// Effective configuration restricted to the named keys that exist.
    fn get_config_subset(&self, names: &[&str]) -> FlagMap {
        let mut config = self.get_config();
        config.retain(|key, _| names.contains(&key.as_str()));
        config
    }

    /// Sets dynamic config overrides on this instance.
    fn set_config(&mut self, updates: FlagMap) {
        self.set_flags(FlagKind::Config, updates);
    }

    /// Same concrete type and equal deep parameters.
    fn equals(&self, other: &dyn BaseObject) -> bool {
        equality::objects_equal(self, other)
    }

    /// Text representation, honouring `print_changed_only`.
    fn repr(&self) -> String {
        repr::object_repr(self)
    }
}

/// Construction of declared objects from parameter overrides.
pub trait Construct: BaseObject + Sized {
    /// An instance with empty state, before `init` has run.
    fn blank() -> Self;

    /// Builds an instance: resolves `overrides` against the declared
    /// parameters and their defaults, then runs `init`.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownParameter` for undeclared names,
    /// `MissingRequiredParameter` for required parameters without a value, and
    /// `InvalidSignature` for variadic signatures.
    fn build(overrides: ParamMap) -> Result<Self> {
        let mut object = Self::blank();
        let resolved = params::resolve_params(object.descriptor(), overrides)?;
        object.init(&resolved);
        Ok(object)
    }

    /// Builds an instance with all defaults.
    ///
    /// # Errors
    ///
    /// Fails when a required parameter exists.
    fn with_defaults() -> Result<Self> {
        Self::build(ParamMap::new())
    }
}

impl PartialEq for dyn BaseObject {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
