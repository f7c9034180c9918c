#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # predictably
//!
//! Base object protocol for estimator libraries.
//!
//! This library provides the parameter, tag and configuration machinery that
//! estimator types build on: introspectable constructor parameters with
//! nested `component__param` addressing, inheritable tags, a validated
//! global configuration with thread-local and scoped overrides, and
//! parameter-based equality.
//!
//! ## Core Types
//!
//! - [`BaseObject`] and [`Construct`]: the declared object protocol
//! - [`TypeDescriptor`] and [`ParamSpec`]: static type declarations
//! - [`Value`] and [`ParamMap`]: dynamically typed parameter values
//! - [`config`]: the global configuration registry and its loaders
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use predictably::config::{get_config, with_config, ConfigUpdate};
//! use predictably::Value;
//!
//! let inside = with_config(&ConfigUpdate::new().print_changed_only(false), true, || {
//!     get_config()["print_changed_only"].clone()
//! })
//! .unwrap();
//! assert_eq!(inside, Value::from(false));
//! assert_eq!(get_config()["print_changed_only"], Value::from(true));
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod object;
pub mod repr;
pub mod value;
pub mod warnings;

#[cfg(test)]
mod test_util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use object::{
    objects_equal, BaseEstimator, BaseObject, Construct, FlagKind, ObjectRef, ObjectState,
    ParamKind, ParamSpec, TypeDescriptor, BASE_ESTIMATOR, BASE_OBJECT,
};
pub use value::{FlagMap, ParamMap, Value, ValueKind};
