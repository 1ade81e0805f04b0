// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The data matcher: a single total, pure function deciding whether a
//! `pattern` structurally matches a `value`.
//!
//! Rules (spec §4.1):
//! - a map pattern matches a map value when every pattern key is present in
//!   the value and its nested value matches; extra keys in `value` are
//!   ignored, a missing key fails.
//! - a list pattern matches a list value when every pattern element has at
//!   least one matching element in `value` (existential, order-free).
//! - anything else falls back to equality.
//! - `Value::Null` as a pattern matches everything.

use crate::value::Value;

/// Returns whether `value` satisfies the structural subset described by
/// `pattern`. Pure, no I/O, recursion depth bounded by the depth of
/// `pattern` (realistic events are assumed to nest no deeper than 32
/// levels; the recursion has no other base case that could loop).
pub fn matches(value: &Value, pattern: &Value) -> bool {
    match pattern {
        Value::Null => true,
        Value::Map(pattern_map) => match value {
            Value::Map(value_map) => pattern_map.iter().all(|(key, sub_pattern)| {
                match value_map.get(key) {
                    Some(sub_value) => matches(sub_value, sub_pattern),
                    None => false,
                }
            }),
            _ => false,
        },
        Value::List(pattern_items) => match value {
            Value::List(value_items) => pattern_items
                .iter()
                .all(|p| value_items.iter().any(|v| matches(v, p))),
            _ => false,
        },
        other => value == other,
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
