// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared record types for the integration registry (spec §3/§4.2) and the
//! action contract every action implementation must honor (spec §4.3,
//! §9 "dynamic dispatch via names").
//!
//! The registry stores a closure-like trait object per action rather than
//! dispatching on a type; new actions register an `Action` impl at startup
//! and are looked up purely by `(integration, action)` string pair. No
//! reflection is required.

use crate::value::Value;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// What an action callable returns: the output map on success, or a
/// human-readable reason on failure (spec §4.3 permitted return shapes).
pub type ActionResult = Result<Value, String>;

/// The single function shape every action conforms to (spec §4.3).
#[async_trait]
pub trait Action: Send + Sync {
    async fn call(&self, input: Value) -> ActionResult;
}

/// A callable reference: enough to invoke an action by name/id at runtime
/// with one argument, an input map (spec §3 `ActionDefinition.executor`).
pub type ActionHandle = Arc<dyn Action>;

/// Immutable record held in the registry for one `(integration, action)`
/// pair (spec §3).
#[derive(Clone)]
pub struct ActionDefinition {
    pub name: String,
    pub description: String,
    pub executor: ActionHandle,
    pub input_schema: Value,
    pub output_schema: Value,
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A namespace of related actions (spec §3).
#[derive(Debug, Clone)]
pub struct Integration {
    pub name: String,
    pub description: String,
    pub actions: IndexMap<String, ActionDefinition>,
}

impl Integration {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            actions: IndexMap::new(),
        }
    }

    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.actions.insert(action.name.clone(), action);
        self
    }
}

/// Validates presence of required fields declared in `input_schema`
/// (spec §4.3: a separate operation, not automatically invoked by the
/// Step Executor). A schema without a `required` array is a no-op.
pub fn validate_input(input_schema: &Value, input: &Value) -> Result<(), Vec<String>> {
    let Some(required) = input_schema.get("required").and_then(Value::as_list) else {
        return Ok(());
    };
    let missing: Vec<String> = required
        .iter()
        .filter_map(Value::as_str)
        .filter(|field| input.get(field).is_none())
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_input_is_noop_without_required_field() {
        assert!(validate_input(&Value::map(), &Value::map()).is_ok());
    }

    #[test]
    fn validate_input_reports_missing_required_fields() {
        let schema = Value::from_pairs([(
            "required",
            Value::List(vec![Value::from("url"), Value::from("method")]),
        )]);
        let input = Value::from_pairs([("url", Value::from("http://x"))]);
        let result = validate_input(&schema, &input);
        assert_eq!(result, Err(vec!["method".to_string()]));
    }

    #[test]
    fn validate_input_passes_when_all_required_fields_present() {
        let schema = Value::from_pairs([("required", Value::List(vec![Value::from("url")]))]);
        let input = Value::from_pairs([("url", Value::from("http://x"))]);
        assert!(validate_input(&schema, &input).is_ok());
    }
}
