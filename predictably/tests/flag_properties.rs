//! Property-based tests for tag layering.
//!
//! Enabled with the `property-tests` feature.

#![cfg(feature = "property-tests")]

mod common;

use common::{Child, CHILD};
use predictably::object::{BaseObject, Construct};
use predictably::{FlagMap, Value};
use proptest::prelude::*;

fn tag_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn tag_updates() -> impl Strategy<Value = FlagMap> {
    prop::collection::btree_map("[A-D]", tag_value(), 0..4)
}

proptest! {
    // Dynamic tags win over class tags; class tags are never modified
    #[test]
    fn dynamic_tags_overlay_class_tags(batches in prop::collection::vec(tag_updates(), 0..4)) {
        let mut child = Child::with_defaults().unwrap();
        let mut expected = CHILD.class_tags();
        for batch in &batches {
            child.set_tags(batch.clone());
            expected.extend(batch.clone());
        }

        prop_assert_eq!(child.get_tags(), expected);
        prop_assert_eq!(CHILD.class_tags()["A"].clone(), Value::from(42));
    }

    // reset discards every dynamic tag
    #[test]
    fn reset_restores_class_tags(updates in tag_updates()) {
        let mut child = Child::with_defaults().unwrap();
        child.set_tags(updates);
        child.reset().unwrap();
        prop_assert_eq!(child.get_tags(), CHILD.class_tags());
    }

    // clone_tags copies the effective view exactly
    #[test]
    fn clone_tags_copies_effective_tags(updates in tag_updates()) {
        let mut source = Child::with_defaults().unwrap();
        source.set_tags(updates);

        let mut target = Child::with_defaults().unwrap();
        target.clone_tags(&source, None);
        prop_assert_eq!(target.get_tags(), source.get_tags());
    }
}
