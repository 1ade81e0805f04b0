// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    null = { Value::Null },
    bool_true = { Value::Bool(true) },
    number = { Value::from(42i64) },
    string = { Value::from("hello") },
    list = { Value::List(vec![Value::from(1i64), Value::Null]) },
)]
fn round_trips_through_serde_json(value: Value) {
    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn preserves_key_order_through_round_trip() {
    let value = Value::from_pairs([
        ("z", Value::from(1i64)),
        ("a", Value::from(2i64)),
        ("m", Value::from(3i64)),
    ]);
    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    let keys: Vec<&str> = back.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn get_returns_none_for_missing_key() {
    let value = Value::from_pairs([("a", Value::from(1i64))]);
    assert!(value.get("missing").is_none());
    assert_eq!(value.get("a"), Some(&Value::from(1i64)));
}

#[test]
fn top_level_or_empty_on_non_map_is_empty() {
    assert!(Value::Null.top_level_or_empty().is_empty());
    assert!(Value::from("x").top_level_or_empty().is_empty());
}
