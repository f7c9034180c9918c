//! Parameter introspection, update and reset.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::object::base::BaseObject;
use crate::object::descriptor::{ParamKind, TypeDescriptor, BASE_OBJECT};
use crate::object::handle::ObjectRef;
use crate::object::state::PROTECTED_MARKER;
use crate::value::{ParamMap, Value};

/// Sorted names of the named, non-variadic constructor parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if the signature declares a variadic
/// positional parameter.
pub fn declared_parameter_names(descriptor: &TypeDescriptor) -> Result<Vec<&'static str>> {
    let specs = descriptor.param_specs();
    if let Some(spec) = specs
        .iter()
        .find(|spec| spec.kind == ParamKind::VariadicPositional)
    {
        return Err(Error::InvalidSignature {
            type_name: descriptor.name.to_string(),
            parameter: spec.name.to_string(),
        });
    }

    let mut names: Vec<&'static str> = specs
        .iter()
        .filter(|spec| spec.kind == ParamKind::Named)
        .map(|spec| spec.name)
        .collect();
    names.sort_unstable();
    Ok(names)
}

/// Declared parameters with a default value, mapped to that default.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] for variadic signatures.
pub fn param_defaults(descriptor: &TypeDescriptor) -> Result<ParamMap> {
    declared_parameter_names(descriptor)?;
    Ok(descriptor
        .param_specs()
        .into_iter()
        .filter(|spec| spec.kind == ParamKind::Named)
        .filter_map(|spec| spec.default.map(|default| (spec.name.to_string(), default)))
        .collect())
}

/// Resolves constructor arguments against the declared signature.
///
/// Each declared parameter takes its override, else its default. Overrides
/// that match no declared parameter are passed through only when the
/// signature accepts variadic keywords.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredParameter`] for a required parameter
/// without an override, and [`Error::UnknownParameter`] for undeclared names.
pub fn resolve_params(descriptor: &TypeDescriptor, mut overrides: ParamMap) -> Result<ParamMap> {
    declared_parameter_names(descriptor)?;
    let specs = descriptor.param_specs();
    let accepts_extra = specs
        .iter()
        .any(|spec| spec.kind == ParamKind::VariadicKeyword);

    let mut resolved = ParamMap::new();
    for spec in specs.iter().filter(|spec| spec.kind == ParamKind::Named) {
        let value = match (overrides.remove(spec.name), &spec.default) {
            (Some(value), _) => value,
            (None, Some(default)) => default.clone(),
            (None, None) => {
                return Err(Error::MissingRequiredParameter {
                    type_name: descriptor.name.to_string(),
                    name: spec.name.to_string(),
                })
            }
        };
        resolved.insert(spec.name.to_string(), value);
    }

    if !accepts_extra {
        if let Some(name) = overrides.keys().next() {
            return Err(Error::UnknownParameter {
                name: name.clone(),
                object: format!("{}()", descriptor.name),
            });
        }
    }
    resolved.extend(overrides);
    Ok(resolved)
}

/// Reads every declared parameter from the instance.
///
/// With `deep`, each object-valued parameter also contributes its own deep
/// parameters under `name__nested`; the unflattened entry is kept.
///
/// # Errors
///
/// Returns [`Error::MissingParameterAttribute`] listing every declared
/// parameter that the instance does not carry.
pub fn get_params<O: BaseObject + ?Sized>(object: &O, deep: bool) -> Result<ParamMap> {
    let names = declared_parameter_names(object.descriptor())?;
    let state = object.state();

    let missing: Vec<String> = names
        .iter()
        .filter(|name| !state.has_attr(name))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingParameterAttribute {
            type_name: object.descriptor().name.to_string(),
            parameters: missing,
        });
    }

    let mut params = ParamMap::new();
    for name in names {
        let value = state.attr(name).cloned().unwrap_or_default();
        if deep {
            if let Value::Object(component) = &value {
                let nested = component.read().get_params(true)?;
                params.extend(
                    nested
                        .into_iter()
                        .map(|(key, item)| (format!("{name}{PROTECTED_MARKER}{key}"), item)),
                );
            }
        }
        params.insert(name.to_string(), value);
    }
    Ok(params)
}

fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(PROTECTED_MARKER) {
        Some((top, rest)) => (top, Some(rest)),
        None => (key, None),
    }
}

fn not_a_component<O: BaseObject + ?Sized>(object: &O, name: &str) -> Error {
    Error::NotAComponent {
        name: name.to_string(),
        type_name: object.descriptor().name.to_string(),
    }
}

/// Checks a whole update against `object` and its components without
/// mutating anything.
fn check_updates<O: BaseObject + ?Sized>(object: &O, updates: &ParamMap) -> Result<()> {
    let valid = object.get_params(false)?;

    let mut nested: BTreeMap<&str, ParamMap> = BTreeMap::new();
    for (key, value) in updates {
        let (top, rest) = split_key(key);
        if !valid.contains_key(top) {
            return Err(Error::UnknownParameter {
                name: top.to_string(),
                object: object.repr(),
            });
        }
        if let Some(rest) = rest {
            nested
                .entry(top)
                .or_default()
                .insert(rest.to_string(), value.clone());
        }
    }

    for (top, group) in nested {
        // A component replaced in the same update is the one that receives
        // the nested keys.
        match updates.get(top).or_else(|| valid.get(top)) {
            Some(Value::Object(component)) => check_updates(&*component.read(), &group)?,
            _ => return Err(not_a_component(object, top)),
        }
    }
    Ok(())
}

/// Applies `updates` to `object`.
///
/// Plain keys set the parameter directly. Keys of the form
/// `component__param` are grouped per component and applied to the
/// component in place after `object` has been reset, so the component keeps
/// its identity. The whole update is checked first; a rejected update leaves
/// `object` and its components untouched.
///
/// # Errors
///
/// Returns [`Error::UnknownParameter`] for names that are not parameters and
/// [`Error::NotAComponent`] for nested keys on a non-object parameter.
pub fn set_params<O: BaseObject + ?Sized>(object: &mut O, updates: &ParamMap) -> Result<()> {
    if updates.is_empty() {
        return Ok(());
    }
    check_updates(&*object, updates)?;

    let mut nested: BTreeMap<String, ParamMap> = BTreeMap::new();
    for (key, value) in updates {
        match split_key(key) {
            (top, None) => object.state_mut().set_attr(top, value.clone()),
            (top, Some(rest)) => {
                nested
                    .entry(top.to_string())
                    .or_default()
                    .insert(rest.to_string(), value.clone());
            }
        }
    }

    object.reset()?;

    for (top, group) in nested {
        let component = match object.state().attr(&top) {
            Some(Value::Object(component)) => component.clone(),
            _ => return Err(not_a_component(&*object, &top)),
        };
        debug!(
            "Setting {} nested parameter(s) on component '{top}' of {}",
            group.len(),
            object.descriptor().name
        );
        component.write().set_params(&group)?;
    }
    Ok(())
}

/// Re-runs the constructor body with the current parameters.
///
/// Parameters, derived attributes and dynamic flag overrides are dropped
/// first; protected attributes are kept.
///
/// # Errors
///
/// Propagates [`get_params`] errors; the instance is untouched in that case.
pub fn reset<O: BaseObject + ?Sized>(object: &mut O) -> Result<()> {
    let params = object.get_params(false)?;
    object.state_mut().clear_for_reset();
    object.init(&params);
    Ok(())
}

/// Whether any parameter value is a declared object.
///
/// # Errors
///
/// Propagates [`get_params`] errors.
pub fn is_composite<O: BaseObject + ?Sized>(object: &O) -> Result<bool> {
    Ok(object
        .get_params(false)?
        .values()
        .any(|value| matches!(value, Value::Object(_))))
}

/// Derived attributes that hold declared objects of type `base` (default:
/// any declared object). Parameters and protected attributes are excluded.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseType`] when `base` is not part of the declared
/// object hierarchy.
pub fn components<O: BaseObject + ?Sized>(
    object: &O,
    base: Option<&'static TypeDescriptor>,
) -> Result<BTreeMap<String, ObjectRef>> {
    let base = base.unwrap_or(&BASE_OBJECT);
    if !base.is_declared_object() {
        return Err(Error::InvalidBaseType {
            type_name: base.name.to_string(),
        });
    }

    let names = object.param_names()?;
    Ok(object
        .state()
        .derived()
        .filter(|(name, _)| !names.contains(&name.as_str()))
        .filter_map(|(name, value)| match value {
            Value::Object(component) if component.descriptor().is_subtype_of(base) => {
                Some((name.clone(), component.clone()))
            }
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::fixtures::{composite, Inner, Outer, Splat, INNER, OUTER};
    use crate::object::Construct;

    #[test]
    fn test_declared_parameter_names_sorted() {
        let names = declared_parameter_names(&OUTER).unwrap();
        assert_eq!(names, vec!["inner", "label"]);
    }

    #[test]
    fn test_variadic_signature_rejected() {
        let err = Splat::build(ParamMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature { .. }));
    }

    #[test]
    fn test_param_defaults_skip_required() {
        let defaults = param_defaults(&OUTER).unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults["label"], Value::from("outer"));
    }

    #[test]
    fn test_resolve_params_requires_value() {
        let err = resolve_params(&OUTER, ParamMap::new()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredParameter { .. }));
    }

    #[test]
    fn test_resolve_params_rejects_unknown() {
        let overrides = ParamMap::from([("bogus".to_string(), Value::from(1))]);
        let err = resolve_params(&INNER, overrides).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter { ref name, .. } if name == "bogus"));
    }

    #[test]
    fn test_get_params_deep_flattens() {
        let outer = composite(5);
        let params = outer.get_params(true).unwrap();
        assert_eq!(params["inner__x"], Value::from(5));
        assert!(matches!(params["inner"], Value::Object(_)));

        let shallow = outer.get_params(false).unwrap();
        assert!(!shallow.contains_key("inner__x"));
    }

    #[test]
    fn test_set_params_nested_keeps_identity() {
        let mut outer = composite(5);
        let before = outer.state().attr("inner").cloned();

        outer
            .set_params(&ParamMap::from([("inner__x".to_string(), Value::from(9))]))
            .unwrap();

        let after = outer.state().attr("inner").cloned();
        let (Some(Value::Object(before)), Some(Value::Object(after))) = (before, after) else {
            panic!("inner should stay an object");
        };
        assert!(before.ptr_eq(&after));
        assert_eq!(outer.get_params(true).unwrap()["inner__x"], Value::from(9));
    }

    #[test]
    fn test_set_params_nested_on_plain_value() {
        let mut outer = composite(1);
        let err = outer
            .set_params(&ParamMap::from([("label__x".to_string(), Value::from(1))]))
            .unwrap_err();
        assert!(matches!(err, Error::NotAComponent { ref name, .. } if name == "label"));
    }

    #[test]
    fn test_set_params_rejects_before_mutating() {
        let mut outer = composite(1);
        let updates = ParamMap::from([
            ("label".to_string(), Value::from("changed")),
            ("inner__nope".to_string(), Value::from(1)),
        ]);
        let err = outer.set_params(&updates).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter { ref name, .. } if name == "nope"));
        assert_eq!(outer.get_params(false).unwrap()["label"], Value::from("outer"));
    }

    #[test]
    fn test_set_params_empty_is_noop() {
        let mut inner = Inner::build(ParamMap::new()).unwrap();
        inner.state_mut().set_attr("fitted_", Value::from(true));
        inner.set_params(&ParamMap::new()).unwrap();
        assert!(inner.state().has_attr("fitted_"));
    }

    #[test]
    fn test_components_exclude_params() {
        let mut outer = composite(3);
        let helper = Value::object(Inner::build(ParamMap::new()).unwrap());
        outer.state_mut().set_attr("helper_", helper);

        let components = outer.components(None).unwrap();
        assert_eq!(components.keys().collect::<Vec<_>>(), vec!["helper_"]);

        let filtered = outer.components(Some(&OUTER)).unwrap();
        assert!(filtered.is_empty());
        assert!(outer.is_composite().unwrap());
    }

    #[test]
    fn test_reset_restores_construction_state() {
        let mut outer = Outer::build(ParamMap::from([(
            "inner".to_string(),
            Value::object(Inner::build(ParamMap::new()).unwrap()),
        )]))
        .unwrap();
        outer.state_mut().set_attr("fitted_", Value::from(true));
        outer.state_mut().set_attr("cache__hits", Value::from(2));

        outer.reset().unwrap();

        assert!(!outer.state().has_attr("fitted_"));
        assert_eq!(outer.state().attr("cache__hits"), Some(&Value::from(2)));
    }
}
