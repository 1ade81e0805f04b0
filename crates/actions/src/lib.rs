// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// test_support deliberately panics on request to exercise crash containment
#![cfg_attr(
    any(test, feature = "test-support"),
    allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

//! inn-actions: built-in action implementations and the registration
//! helper that seeds the `pocsync.builtin` integration used throughout the
//! spec's examples (spec §4.3, §9).

pub mod http_request;
pub mod log_write;
pub mod map_fields;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use inn_core::{ActionDefinition, Integration, Value};
use inn_registry::IntegrationRegistry;
use std::sync::Arc;

/// Name of the integration every built-in action is registered under.
pub const BUILTIN_INTEGRATION: &str = "pocsync.builtin";

/// Registers the `pocsync.builtin` integration (`http.request`, `log.write`,
/// `transform.map_fields`) into `registry`. Intended to be called once at
/// daemon/gateway startup.
pub fn register_builtins(registry: &IntegrationRegistry) {
    let integration = Integration::new(BUILTIN_INTEGRATION, "Built-in HTTP, logging and field transform actions")
        .with_action(ActionDefinition {
            name: "trigger.passthrough".to_string(),
            description: "Echoes its merged input back unchanged; used as a pipeline's entry step".to_string(),
            executor: Arc::new(trigger::Passthrough),
            input_schema: Value::map(),
            output_schema: Value::map(),
        })
        .with_action(ActionDefinition {
            name: "http.request".to_string(),
            description: "Issues an outbound HTTP request".to_string(),
            executor: Arc::new(http_request::HttpRequest::default()),
            input_schema: Value::from_pairs([(
                "required",
                Value::List(vec![Value::from("url")]),
            )]),
            output_schema: Value::map(),
        })
        .with_action(ActionDefinition {
            name: "log.write".to_string(),
            description: "Writes a structured log line and echoes its input".to_string(),
            executor: Arc::new(log_write::LogWrite),
            input_schema: Value::map(),
            output_schema: Value::map(),
        })
        .with_action(ActionDefinition {
            name: "transform.map_fields".to_string(),
            description: "Rekeys the merged step input according to a mapping".to_string(),
            executor: Arc::new(map_fields::MapFields),
            input_schema: Value::from_pairs([(
                "required",
                Value::List(vec![Value::from("mapping")]),
            )]),
            output_schema: Value::map(),
        });
    registry.register(integration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_builtins_registers_all_three_actions() {
        let registry = IntegrationRegistry::new();
        register_builtins(&registry);
        let actions = registry.list_actions(BUILTIN_INTEGRATION);
        let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"trigger.passthrough"));
        assert!(names.contains(&"http.request"));
        assert!(names.contains(&"log.write"));
        assert!(names.contains(&"transform.map_fields"));
    }
}
