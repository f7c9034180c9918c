//! Small declared object types shared by unit tests.

use crate::object::{
    BaseObject, Construct, ObjectState, ParamSpec, TypeDescriptor, BASE_OBJECT,
};
use crate::value::{FlagMap, ParamMap, Value};

macro_rules! fixture {
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

fn inner_params() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("x", 1)]
}

pub static INNER: TypeDescriptor = TypeDescriptor {
    name: "Inner",
    parent: Some(&BASE_OBJECT),
    params: Some(inner_params),
    ..TypeDescriptor::DEFAULT
};

fn outer_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::with_default("label", "outer"),
        ParamSpec::required("inner"),
    ]
}

pub static OUTER: TypeDescriptor = TypeDescriptor {
    name: "Outer",
    parent: Some(&BASE_OBJECT),
    params: Some(outer_params),
    ..TypeDescriptor::DEFAULT
};

fn splat_params() -> Vec<ParamSpec> {
    vec![ParamSpec::with_default("a", 1), ParamSpec::variadic("args")]
}

pub static SPLAT: TypeDescriptor = TypeDescriptor {
    name: "Splat",
    parent: Some(&BASE_OBJECT),
    params: Some(splat_params),
    ..TypeDescriptor::DEFAULT
};

fn parent_tags() -> FlagMap {
    FlagMap::from([
        ("A".to_string(), Value::from(1)),
        ("B".to_string(), Value::from(2)),
    ])
}

fn parent_config() -> FlagMap {
    FlagMap::from([("print_changed_only".to_string(), Value::from(false))])
}

pub static PARENT: TypeDescriptor = TypeDescriptor {
    name: "Parent",
    parent: Some(&BASE_OBJECT),
    params: Some(inner_params),
    tags: parent_tags,
    config: parent_config,
};

fn child_tags() -> FlagMap {
    FlagMap::from([("A".to_string(), Value::from(42))])
}

pub static CHILD: TypeDescriptor = TypeDescriptor {
    name: "Child",
    parent: Some(&PARENT),
    tags: child_tags,
    ..TypeDescriptor::DEFAULT
};

fixture!(Inner, INNER);
fixture!(Outer, OUTER);
fixture!(Splat, SPLAT);
fixture!(Parent, PARENT);
fixture!(Child, CHILD);

/// `Outer(inner=Inner(x=x))`.
pub fn composite(x: i64) -> Outer {
    let inner = Inner::build(ParamMap::from([("x".to_string(), Value::from(x))])).unwrap();
    Outer::build(ParamMap::from([("inner".to_string(), Value::object(inner))])).unwrap()
}
