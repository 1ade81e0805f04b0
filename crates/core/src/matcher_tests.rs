// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|pairs| Value::from_pairs(pairs)),
        ]
    })
}

proptest! {
    #[test]
    fn reflexivity(value in arb_value()) {
        prop_assert!(matches(&value, &value));
    }

    #[test]
    fn superset_map_matches_subset_pattern(
        extra_key in "[a-z]{1,6}",
        extra_value in arb_value(),
        base in arb_value(),
    ) {
        let Value::Map(mut base_map) = base else { return Ok(()); };
        if base_map.contains_key(&extra_key) {
            return Ok(());
        }
        let pattern = Value::Map(base_map.clone());
        base_map.insert(extra_key, extra_value);
        let superset = Value::Map(base_map);
        prop_assert!(matches(&superset, &pattern));
    }
}

#[test]
fn null_pattern_matches_everything() {
    assert!(matches(&Value::from("anything"), &Value::Null));
    assert!(matches(&Value::map(), &Value::Null));
}

#[test]
fn missing_required_key_fails() {
    let value = Value::from_pairs([("a", Value::from(1i64))]);
    let pattern = Value::from_pairs([("b", Value::from(1i64))]);
    assert!(!matches(&value, &pattern));
}

#[test]
fn nested_map_pattern_matches_recursively() {
    let value = Value::from_pairs([(
        "params",
        Value::from_pairs([
            ("order_id", Value::from("12345")),
            ("shop_id", Value::from("123")),
        ]),
    )]);
    let pattern = Value::from_pairs([(
        "params",
        Value::from_pairs([("shop_id", Value::from("123"))]),
    )]);
    assert!(matches(&value, &pattern));
}

#[test]
fn list_pattern_matches_existentially() {
    let value = Value::List(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]);
    let pattern = Value::List(vec![Value::from(2i64)]);
    assert!(matches(&value, &pattern));

    let missing = Value::List(vec![Value::from(9i64)]);
    assert!(!matches(&value, &missing));
}

#[test]
fn list_pattern_against_non_list_value_fails() {
    assert!(!matches(&Value::from("x"), &Value::List(vec![Value::from("x")])));
}

#[test]
fn extra_keys_in_value_are_ignored() {
    let value = Value::from_pairs([
        ("a", Value::from(1i64)),
        ("b", Value::from(2i64)),
    ]);
    let pattern = Value::from_pairs([("a", Value::from(1i64))]);
    assert!(matches(&value, &pattern));
}

#[test]
fn empty_pattern_matches_any_event() {
    let pattern = Value::map();
    assert!(matches(&Value::from_pairs([("x", Value::from(1i64))]), &pattern));
}
