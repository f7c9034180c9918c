//! Error types for the predictably library.
//!
//! This module provides the error hierarchy for the parameter, tag and
//! configuration protocol, using `thiserror` for ergonomic error handling.
//!
//! Invalid configuration *values* are never errors: they are replaced by a
//! fallback and reported through [`crate::warnings`].

use std::path::PathBuf;

use thiserror::Error;

use crate::format::format_seq;

/// Result type alias for operations that may fail with a predictably error.
///
/// # Examples
///
/// ```
/// use predictably::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the predictably library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration key that is not in the global registry.
    #[error("unrecognized configuration parameter '{name}'; expected one of {expected}")]
    UnrecognizedParameter {
        /// The unknown key.
        name: String,
        /// The registered keys, formatted for display.
        expected: String,
    },

    /// `set_params` was given a name that is not a parameter of the object.
    #[error(
        "Invalid parameter {name} for object {object}. Check the list of available \
         parameters with `get_params().keys()`."
    )]
    UnknownParameter {
        /// The offending parameter name.
        name: String,
        /// Representation of the target object.
        object: String,
    },

    /// A declared parameter is not mirrored as an attribute of the same name.
    #[error(
        "objects should assign all init parameters to an attribute with the same name. \
         `{type_name}` {} did not follow this convention.",
        parameter_phrase(.parameters)
    )]
    MissingParameterAttribute {
        /// Name of the non-conforming type.
        type_name: String,
        /// Every declared parameter without a matching attribute.
        parameters: Vec<String>,
    },

    /// A strict tag or config lookup did not find the flag.
    #[error("{label} with name {name} could not be found.")]
    FlagNotFound {
        /// "Tag" or "Config".
        label: &'static str,
        /// The flag that was requested.
        name: String,
    },

    /// A constructor signature declares variadic positional parameters.
    #[error(
        "objects should always specify their parameters in the signature of their \
         constructor (no varargs). {type_name} declares variadic parameter '{parameter}'."
    )]
    InvalidSignature {
        /// Name of the offending type.
        type_name: String,
        /// The variadic parameter.
        parameter: String,
    },

    /// `components` was asked to filter by a type outside the object hierarchy.
    #[error("base type must be BaseObject or one of its subtypes, but found {type_name}")]
    InvalidBaseType {
        /// Name of the rejected filter type.
        type_name: String,
    },

    /// A fit-dependent operation ran before the estimator was fitted.
    #[error("This instance of {type_name} has not been fitted yet. Please call `fit` first.")]
    NotFitted {
        /// Name of the estimator type.
        type_name: String,
    },

    /// A required constructor parameter (no default) was not supplied.
    #[error("missing required parameter '{name}' for {type_name}")]
    MissingRequiredParameter {
        /// Name of the type being constructed.
        type_name: String,
        /// The parameter without a value.
        name: String,
    },

    /// A nested `component__param` key addressed a parameter that is not an object.
    #[error("parameter '{name}' of {type_name} is not a component; cannot set nested parameters on it")]
    NotAComponent {
        /// The parameter named by the key prefix.
        name: String,
        /// Name of the owning type.
        type_name: String,
    },

    /// A validation error occurred while loading configuration.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn parameter_phrase(parameters: &[String]) -> String {
    let noun = if parameters.len() == 1 {
        "parameter"
    } else {
        "parameters"
    };
    format!("{noun} {}", format_seq(parameters, ", ", Some("and")))
}

impl Error {
    /// Whether callers expecting a "value error" should handle this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use predictably::Error;
    ///
    /// let err = Error::NotFitted { type_name: "Forecaster".to_string() };
    /// assert!(err.is_value_error());
    /// assert!(err.is_attribute_error());
    /// ```
    #[must_use]
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownParameter { .. }
                | Self::FlagNotFound { .. }
                | Self::NotFitted { .. }
                | Self::Validation { .. }
        )
    }

    /// Whether callers expecting an "attribute error" should handle this error.
    #[must_use]
    pub fn is_attribute_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameterAttribute { .. }
                | Self::NotFitted { .. }
                | Self::NotAComponent { .. }
        )
    }

    /// Whether this error signals a caller/API contract violation on types.
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedParameter { .. }
                | Self::InvalidBaseType { .. }
                | Self::MissingRequiredParameter { .. }
        )
    }

    /// Whether this error is a structural defect of a type declaration.
    #[must_use]
    pub fn is_runtime_error(&self) -> bool {
        matches!(self, Self::InvalidSignature { .. })
    }
}
