//! Estimators: declared objects with a fitted state.

use crate::error::{Error, Result};
use crate::object::base::BaseObject;
use crate::object::descriptor::{TypeDescriptor, BASE_OBJECT};
use crate::value::Value;

/// Derived attribute holding the fitted flag. Cleared by `reset`.
pub const FITTED_ATTR: &str = "_is_fitted";

/// Descriptor of the estimator base type; estimator types use it as parent.
pub static BASE_ESTIMATOR: TypeDescriptor = TypeDescriptor {
    name: "BaseEstimator",
    parent: Some(&BASE_OBJECT),
    ..TypeDescriptor::DEFAULT
};

/// Fitted-state tracking for estimators.
///
/// # Examples
///
/// ```
/// use predictably::object::{
///     BaseEstimator, BaseObject, Construct, ObjectState, TypeDescriptor, BASE_ESTIMATOR,
/// };
///
/// static MEAN: TypeDescriptor = TypeDescriptor {
///     name: "Mean",
///     parent: Some(&BASE_ESTIMATOR),
///     ..TypeDescriptor::DEFAULT
/// };
///
/// #[derive(Debug, Default)]
/// struct Mean {
///     state: ObjectState,
/// }
///
/// impl BaseObject for Mean {
///     fn descriptor(&self) -> &'static TypeDescriptor {
///         &MEAN
///     }
///     fn state(&self) -> &ObjectState {
///         &self.state
///     }
///     fn state_mut(&mut self) -> &mut ObjectState {
///         &mut self.state
///     }
/// }
///
/// impl Construct for Mean {
///     fn blank() -> Self {
///         Self::default()
///     }
/// }
///
/// impl BaseEstimator for Mean {}
///
/// let mut mean = Mean::with_defaults().unwrap();
/// assert!(mean.check_is_fitted().is_err());
/// mean.mark_fitted();
/// assert!(mean.check_is_fitted().is_ok());
/// mean.reset().unwrap();
/// assert!(!mean.is_fitted());
/// ```
pub trait BaseEstimator: BaseObject {
    /// Whether `fit` has completed since construction or the last reset.
    fn is_fitted(&self) -> bool {
        self.state()
            .attr(FITTED_ATTR)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Records that fitting completed.
    fn mark_fitted(&mut self) {
        self.state_mut().set_attr(FITTED_ATTR, Value::Bool(true));
    }

    /// Guard for fit-dependent operations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] if the estimator has not been fitted.
    fn check_is_fitted(&self) -> Result<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(Error::NotFitted {
                type_name: self.descriptor().name.to_string(),
            })
        }
    }
}
