//! Declared objects and their parameter, tag and config protocol.
//!
//! A declared object is a Rust type that embeds an [`ObjectState`], owns a
//! static [`TypeDescriptor`], and implements [`BaseObject`]. The descriptor
//! replaces runtime signature and inheritance introspection; the state
//! partition replaces attribute reflection.
//!
//! # Module Organization
//!
//! - [`descriptor`]: static type descriptors and constructor signatures
//! - [`state`]: per-instance parameter, derived and protected attributes
//! - [`base`]: the [`BaseObject`] and [`Construct`] traits
//! - [`params`]: `get_params`, `set_params`, `reset`, components
//! - [`flags`]: tag and config flag merging, effective config
//! - [`equality`]: parameter-based equality
//! - [`estimator`]: fitted-state tracking
//! - [`handle`]: shared object handles

pub mod base;
pub mod descriptor;
pub mod equality;
pub mod estimator;
pub mod flags;
pub mod handle;
pub mod params;
pub mod state;

#[cfg(test)]
pub(crate) mod fixtures;

pub use base::{BaseObject, Construct};
pub use descriptor::{ParamKind, ParamSpec, TypeDescriptor, BASE_OBJECT};
pub use equality::objects_equal;
pub use estimator::{BaseEstimator, BASE_ESTIMATOR, FITTED_ATTR};
pub use flags::FlagKind;
pub use handle::{AsAny, ObjectRef};
pub use state::{ObjectState, PROTECTED_MARKER};
