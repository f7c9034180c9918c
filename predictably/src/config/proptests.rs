//! Property-based tests for the configuration system.

use super::merger::ConfigMerger;
use super::registry::{self, DATAFRAME_BACKENDS, DISPLAY_MODES, MATH_BACKENDS};
use super::schema::ConfigUpdate;
use super::validator::ConfigValidator;
use crate::value::Value;
use proptest::prelude::*;

fn choice(values: &'static [&'static str]) -> impl Strategy<Value = Value> {
    prop::sample::select(values).prop_map(Value::from)
}

// A registered value, or unset.
fn entry_strategy(name: &'static str) -> BoxedStrategy<Option<Value>> {
    let values = match name {
        "dataframe_backend" => choice(&DATAFRAME_BACKENDS).boxed(),
        "math_backend" => choice(&MATH_BACKENDS).boxed(),
        "display" => choice(&DISPLAY_MODES).boxed(),
        _ => any::<bool>().prop_map(Value::from).boxed(),
    };
    prop::option::of(values).boxed()
}

fn update_strategy() -> impl Strategy<Value = ConfigUpdate> {
    (
        entry_strategy("dataframe_backend"),
        entry_strategy("math_backend"),
        entry_strategy("print_changed_only"),
        entry_strategy("display"),
    )
        .prop_map(|(frame, math, print, display)| {
            let mut update = ConfigUpdate::new();
            for (name, value) in [
                ("dataframe_backend", frame),
                ("math_backend", math),
                ("print_changed_only", print),
                ("display", display),
            ] {
                if let Some(value) = value {
                    update.insert(name, value);
                }
            }
            update
        })
}

// Arbitrary values of the wrong shape for any registered key.
fn junk_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[A-Z]{1,8}".prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins for every key it sets
    #[test]
    fn merge_higher_precedence_wins(low in update_strategy(), high in update_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        for name in registry::names() {
            let expected = high.get(name).or_else(|| low.get(name));
            prop_assert_eq!(merged.get(name), expected);
        }
    }

    // Merging with itself changes nothing
    #[test]
    fn merge_is_idempotent(update in update_strategy()) {
        let mut merged = update.clone();
        ConfigMerger::merge_into(&mut merged, &update);
        prop_assert_eq!(merged, update);
    }

    // Merging an empty update is the identity
    #[test]
    fn merge_empty_is_identity(update in update_strategy()) {
        let mut merged = update.clone();
        ConfigMerger::merge_into(&mut merged, &ConfigUpdate::new());
        prop_assert_eq!(merged, update);
    }

    // Updates built from registered values always validate
    #[test]
    fn registered_values_validate(update in update_strategy()) {
        prop_assert!(ConfigValidator::validate(&update).is_ok());
    }

    // No registered key accepts ints, floats or uppercase strings
    #[test]
    fn junk_values_rejected(index in 0usize..4, junk in junk_strategy()) {
        let name = registry::names()[index];
        let update = ConfigUpdate::new().with(name, junk);
        prop_assert!(ConfigValidator::validate(&update).is_err());
    }
}
