// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step Executor (spec §4.3): resolves an action, assembles its input,
//! invokes it, and wraps the outcome as a [`StepResult`].

use crate::error::StepError;
use inn_core::{Clock, Step, StepKind, StepResult, Value};
use inn_registry::IntegrationRegistry;
use std::time::Instant;

const SENSITIVE_SUBSTRINGS: &[&str] = &["password", "token", "secret", "key", "auth"];

/// Merges `step.input_map` with `pipeline_data`/`context`, later keys
/// winning (spec §4.3 step 2):
/// a. start from `step.input_map`,
/// b. overlay `{pipeline_data, context}` under those names,
/// c. if `pipeline_data` is a non-empty map, overlay its top-level keys
///    onto the root.
pub fn assemble_input(step: &Step, pipeline_data: &Value, context: &Value) -> Value {
    let mut assembled = step.input_map.top_level_or_empty();
    assembled.insert("pipeline_data".to_string(), pipeline_data.clone());
    assembled.insert("context".to_string(), context.clone());
    if let Some(pipeline_data_map) = pipeline_data.as_map() {
        if !pipeline_data_map.is_empty() {
            for (key, value) in pipeline_data_map {
                assembled.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Map(assembled)
}

/// Replaces the value of every top-level key whose lowercased name
/// contains a sensitive substring (`password`, `token`, `secret`, `key`,
/// `auth`) with the literal `"[REDACTED]"` (spec §4.3 step 6).
pub fn redact_sensitive(input: &Value) -> Value {
    let Some(map) = input.as_map() else {
        return input.clone();
    };
    let redacted = map
        .iter()
        .map(|(key, value)| {
            let lower = key.to_lowercase();
            if SENSITIVE_SUBSTRINGS.iter().any(|needle| lower.contains(needle)) {
                (key.clone(), Value::from("[REDACTED]"))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect();
    Value::Map(redacted)
}

pub struct StepExecutor<C: Clock> {
    registry: IntegrationRegistry,
    clock: C,
}

impl<C: Clock> StepExecutor<C> {
    pub fn new(registry: IntegrationRegistry, clock: C) -> Self {
        Self { registry, clock }
    }

    /// Executes one step. Returns `Ok`/`Err` of the same [`StepResult`]
    /// type per spec §4.3 — the caller (Pipeline Executor) branches on
    /// the `Result` to decide whether to continue or short-circuit.
    pub async fn execute(
        &self,
        step: &Step,
        pipeline_data: &Value,
        context: &Value,
    ) -> Result<StepResult, StepResult> {
        let common = CommonFields {
            step_id: step.id.clone(),
            step_name: step.name.clone(),
            step_kind: step.kind,
            integration: step.integration_name.clone(),
            action: step.action_name.clone(),
        };

        let Some(definition) = self.registry.get_action(&step.integration_name, &step.action_name) else {
            let err = StepError::ActionNotFound {
                integration: step.integration_name.clone(),
                action: step.action_name.clone(),
            };
            return Err(self.failure(common, err.to_string(), None, 0));
        };

        let input = assemble_input(step, pipeline_data, context);
        let executor = definition.executor.clone();
        let call_input = input.clone();

        let start = Instant::now();
        let outcome = tokio::spawn(async move { executor.call(call_input).await }).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(output)) => Ok(self.success(common, output, duration_ms)),
            Ok(Err(reason)) => {
                let err = StepError::ActionReturnedError(reason);
                Err(self.failure(common, err.to_string(), Some(&input), duration_ms))
            }
            Err(join_error) => {
                let err = StepError::Crashed(describe_join_error(join_error));
                Err(self.failure(common, err.to_string(), Some(&input), duration_ms))
            }
        }
    }

    fn success(&self, common: CommonFields, output: Value, duration_ms: u64) -> StepResult {
        StepResult::Success {
            step_id: common.step_id,
            step_name: common.step_name,
            step_kind: common.step_kind,
            integration: common.integration,
            action: common.action,
            output,
            status: inn_core::execution::SuccessTag,
            duration_ms,
            executed_at: self.clock.now(),
        }
    }

    fn failure(
        &self,
        common: CommonFields,
        error: String,
        input: Option<&Value>,
        duration_ms: u64,
    ) -> StepResult {
        StepResult::Failure {
            step_id: common.step_id,
            step_name: common.step_name,
            step_kind: common.step_kind,
            integration: common.integration,
            action: common.action,
            error,
            duration_ms,
            failed_at: self.clock.now(),
            input_data: input.map(redact_sensitive),
        }
    }
}

struct CommonFields {
    step_id: inn_core::StepId,
    step_name: String,
    step_kind: StepKind,
    integration: String,
    action: String,
}

fn describe_join_error(join_error: tokio::task::JoinError) -> String {
    if let Ok(reason) = join_error.try_into_panic() {
        if let Some(message) = reason.downcast_ref::<&str>() {
            return (*message).to_string();
        }
        if let Some(message) = reason.downcast_ref::<String>() {
            return message.clone();
        }
        "action panicked with a non-string payload".to_string()
    } else {
        "action task was cancelled".to_string()
    }
}

#[cfg(test)]
#[path = "step_executor_tests.rs"]
mod tests;
