//! Common test utilities for integration tests.
//!
//! This module provides declared object fixtures and helpers for testing
//! the predictably library.

#![allow(dead_code)]

use predictably::object::{
    BaseEstimator, BaseObject, Construct, ObjectState, ParamSpec, TypeDescriptor, BASE_ESTIMATOR,
    BASE_OBJECT,
};
use predictably::{FlagMap, ParamMap, Value};

/// Builds a parameter map from literal pairs.
pub fn params(entries: &[(&str, Value)]) -> ParamMap {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Builds a flag map from literal pairs.
pub fn flags(entries: &[(&str, Value)]) -> FlagMap {
    params(entries)
}

macro_rules! declared {
    ($ty:ident, $descriptor:ident) => {
        #[derive(Debug, Default)]
        pub struct $ty {
            state: ObjectState,
        }

        impl BaseObject for $ty {
            fn descriptor(&self) -> &'static TypeDescriptor {
                &$descriptor
            }

            fn state(&self) -> &ObjectState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut ObjectState {
                &mut self.state
            }
        }

        impl Construct for $ty {
            fn blank() -> Self {
                Self::default()
            }
        }
    };
}

// ============================================================================
// Tag hierarchy
// ============================================================================

fn x_param() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("x", 1)]
}

fn parent_tags() -> FlagMap {
    flags(&[("A", Value::from(1)), ("B", Value::from(2))])
}

fn child_tags() -> FlagMap {
    flags(&[("A", Value::from(42))])
}

/// Declares tags `A=1`, `B=2`.
pub static PARENT: TypeDescriptor = TypeDescriptor {
    name: "Parent",
    parent: Some(&BASE_OBJECT),
    params: Some(x_param),
    tags: parent_tags,
    ..TypeDescriptor::DEFAULT
};

/// Overrides tag `A` with 42 and keeps the parent's constructor.
pub static CHILD: TypeDescriptor = TypeDescriptor {
    name: "Child",
    parent: Some(&PARENT),
    tags: child_tags,
    ..TypeDescriptor::DEFAULT
};

declared!(Parent, PARENT);
declared!(Child, CHILD);

// ============================================================================
// Composites
// ============================================================================

/// `Inner(x=1)`.
pub static INNER: TypeDescriptor = TypeDescriptor {
    name: "Inner",
    parent: Some(&BASE_OBJECT),
    params: Some(x_param),
    ..TypeDescriptor::DEFAULT
};

fn outer_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::with_default("label", "outer"),
        ParamSpec::required("inner"),
    ]
}

/// `Outer(inner, label="outer")`.
pub static OUTER: TypeDescriptor = TypeDescriptor {
    name: "Outer",
    parent: Some(&BASE_OBJECT),
    params: Some(outer_params),
    ..TypeDescriptor::DEFAULT
};

declared!(Inner, INNER);
declared!(Outer, OUTER);

/// `Outer(inner=Inner(x=x))`.
pub fn composite(x: i64) -> Outer {
    let inner = Inner::build(params(&[("x", Value::from(x))])).unwrap();
    Outer::build(params(&[("inner", Value::object(inner))])).unwrap()
}

// ============================================================================
// Estimators
// ============================================================================

fn forecaster_params() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("foo", 1)]
}

/// An estimator with a typed field alongside its protocol state.
pub static FORECASTER: TypeDescriptor = TypeDescriptor {
    name: "Forecaster",
    parent: Some(&BASE_ESTIMATOR),
    params: Some(forecaster_params),
    ..TypeDescriptor::DEFAULT
};

#[derive(Debug, Default)]
pub struct Forecaster {
    state: ObjectState,
    pub fit_calls: usize,
}

impl Forecaster {
    /// Records a fitted coefficient and marks the estimator fitted.
    pub fn fit(&mut self, coefficient: f64) -> &mut Self {
        self.fit_calls += 1;
        self.state.set_attr("coef_", Value::from(coefficient));
        self.mark_fitted();
        self
    }
}

impl BaseObject for Forecaster {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &FORECASTER
    }

    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    fn init(&mut self, params: &ParamMap) {
        self.state.store_params(params);
        self.fit_calls = 0;
    }
}

impl Construct for Forecaster {
    fn blank() -> Self {
        Self::default()
    }
}

impl BaseEstimator for Forecaster {}

// ============================================================================
// Protocol edge cases
// ============================================================================

fn bad_params() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("a", 1), ParamSpec::with_default("b", 2)]
}

/// Declares `a` and `b` but only stores `a`.
pub static BAD_OBJECT: TypeDescriptor = TypeDescriptor {
    name: "BadObject",
    parent: Some(&BASE_OBJECT),
    params: Some(bad_params),
    ..TypeDescriptor::DEFAULT
};

#[derive(Debug, Default)]
pub struct BadObject {
    state: ObjectState,
}

impl BaseObject for BadObject {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &BAD_OBJECT
    }

    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    fn init(&mut self, params: &ParamMap) {
        if let Some(a) = params.get("a") {
            self.state.store_param("a", a.clone());
        }
    }
}

impl Construct for BadObject {
    fn blank() -> Self {
        Self::default()
    }
}

fn reset_params() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("a", 42)]
}

/// Sets a derived attribute `c` in its constructor body.
pub static RESET_TESTER: TypeDescriptor = TypeDescriptor {
    name: "ResetTester",
    parent: Some(&BASE_OBJECT),
    params: Some(reset_params),
    ..TypeDescriptor::DEFAULT
};

#[derive(Debug, Default)]
pub struct ResetTester {
    state: ObjectState,
}

impl BaseObject for ResetTester {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &RESET_TESTER
    }

    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    fn init(&mut self, params: &ParamMap) {
        self.state.store_params(params);
        self.state.set_attr("c", Value::from(84));
    }
}

impl Construct for ResetTester {
    fn blank() -> Self {
        Self::default()
    }
}
