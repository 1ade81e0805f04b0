// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `transform.map_fields` built-in action.

use async_trait::async_trait;
use inn_core::{Action, ActionResult, Value};

/// Rekeys the merged step input according to a static `mapping: {new_key:
/// old_key}` field (spec §8 scenario S4): for every `(new_key, old_key)`
/// pair, reads `old_key` from the merged input and writes it under
/// `new_key` in the output.
pub struct MapFields;

#[async_trait]
impl Action for MapFields {
    async fn call(&self, input: Value) -> ActionResult {
        let mapping = input
            .get("mapping")
            .and_then(Value::as_map)
            .ok_or_else(|| "Missing required field: mapping".to_string())?;

        let mut output = indexmap::IndexMap::new();
        for (new_key, old_key_value) in mapping {
            let old_key = old_key_value
                .as_str()
                .ok_or_else(|| format!("mapping value for {new_key} must be a string"))?;
            let value = input.get(old_key).cloned().unwrap_or(Value::Null);
            output.insert(new_key.clone(), value);
        }
        Ok(Value::Map(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rekeys_merged_input_per_mapping() {
        let input = Value::from_pairs([
            (
                "mapping",
                Value::from_pairs([
                    ("id", Value::from("user_id")),
                    ("name", Value::from("user_name")),
                ]),
            ),
            ("user_id", Value::from(123i64)),
            ("user_name", Value::from("John Doe")),
        ]);
        let output = MapFields.call(input).await.unwrap();
        assert_eq!(output.get("id"), Some(&Value::from(123i64)));
        assert_eq!(output.get("name"), Some(&Value::from("John Doe")));
    }

    #[tokio::test]
    async fn missing_source_key_maps_to_null() {
        let input = Value::from_pairs([(
            "mapping",
            Value::from_pairs([("id", Value::from("missing_field"))]),
        )]);
        let output = MapFields.call(input).await.unwrap();
        assert_eq!(output.get("id"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn missing_mapping_field_errors() {
        let err = MapFields.call(Value::map()).await.unwrap_err();
        assert!(err.contains("mapping"));
    }
}
