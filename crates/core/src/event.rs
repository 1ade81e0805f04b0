// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The inbound event produced by the ingress (spec §3).

use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub source: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub headers: Value,
}

impl Event {
    pub fn new(source: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: path.into(),
            method: None,
            params: Value::map(),
            headers: Value::map(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    pub fn with_headers(mut self, headers: Value) -> Self {
        self.headers = headers;
        self
    }

    /// The matcher is always called against the event as a whole map so
    /// that patterns like `{"source": "webhook", "params": {...}}` work
    /// uniformly; this assembles that view.
    ///
    /// `params`'s own top-level keys are additionally flattened onto the
    /// root (alongside the nested `params` map itself), mirroring the
    /// step input assembly's own overlay rule (spec §4.3 step 2c). This is
    /// what lets a pipeline's first step — whose `pipeline_data` is this
    /// value — reach body fields like `user_id` directly, the way
    /// `transform.map_fields` mappings are authored (spec §8 S4).
    pub fn as_value(&self) -> Value {
        let mut fields = indexmap::IndexMap::new();
        fields.insert("source".to_string(), Value::from(self.source.as_str()));
        fields.insert("path".to_string(), Value::from(self.path.as_str()));
        fields.insert(
            "method".to_string(),
            self.method
                .as_deref()
                .map(Value::from)
                .unwrap_or(Value::Null),
        );
        fields.insert("params".to_string(), self.params.clone());
        fields.insert("headers".to_string(), self.headers.clone());
        if let Some(params_map) = self.params.as_map() {
            for (key, value) in params_map {
                fields.insert(key.clone(), value.clone());
            }
        }
        Value::Map(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_value_exposes_all_fields_for_matching() {
        let event = Event::new("webhook", "/api/webhook/shopee")
            .with_method("POST")
            .with_params(Value::from_pairs([("order_id", Value::from("1"))]));
        let value = event.as_value();
        assert_eq!(value.get("source"), Some(&Value::from("webhook")));
        assert_eq!(
            value.get("params").and_then(|p| p.get("order_id")),
            Some(&Value::from("1"))
        );
    }

    #[test]
    fn as_value_flattens_params_onto_the_root_alongside_the_nested_copy() {
        let event = Event::new("webhook", "/api/webhook/shopee").with_params(Value::from_pairs([
            ("user_id", Value::from(123i64)),
            ("user_name", Value::from("John Doe")),
        ]));
        let value = event.as_value();
        assert_eq!(value.get("user_id"), Some(&Value::from(123i64)));
        assert_eq!(value.get("user_name"), Some(&Value::from("John Doe")));
        assert_eq!(
            value.get("params").and_then(|p| p.get("user_id")),
            Some(&Value::from(123i64))
        );
    }

    #[test]
    fn round_trips_through_json() {
        let event = Event::new("webhook", "/api/webhook/lazada");
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
