// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline Executor (spec §4.4): drives a pipeline's steps in order,
//! threads outputs forward, accumulates per-step results and produces a
//! terminal [`ExecutionRecord`].
//!
//! ```text
//! pending ──► running ──► success
//!     │           │
//!     │           └──► failed
//!     └──► failed (validation)      running ──► cancelled (external)
//! ```

use inn_core::{Clock, ExecutionId, ExecutionRecord, ExecutionStatus, IdGen, Pipeline, Step, StepResult, Value};
use inn_registry::IntegrationRegistry;
use tokio_util::sync::CancellationToken;

use crate::step_executor::StepExecutor;

/// Drives a [`Pipeline`] to completion against a shared [`IntegrationRegistry`].
pub struct PipelineExecutor<C: Clock, G: IdGen> {
    step_executor: StepExecutor<C>,
    clock: C,
    id_gen: G,
}

impl<C: Clock, G: IdGen> PipelineExecutor<C, G> {
    pub fn new(registry: IntegrationRegistry, clock: C, id_gen: G) -> Self {
        Self {
            step_executor: StepExecutor::new(registry, clock.clone()),
            clock,
            id_gen,
        }
    }

    /// Runs `pipeline` to completion with no cooperative cancellation point.
    /// Equivalent to [`Self::execute_cancellable`] with no token.
    pub async fn execute(&self, pipeline: &Pipeline, initial_context: Value) -> ExecutionRecord {
        self.execute_cancellable(pipeline, initial_context, None).await
    }

    /// Runs `pipeline` to completion, checking `cancel` for a cooperative
    /// cancellation request between each step (spec §4.4/§5: cancellation
    /// is observable only at step boundaries, never mid-invocation).
    pub async fn execute_cancellable(
        &self,
        pipeline: &Pipeline,
        initial_context: Value,
        cancel: Option<&CancellationToken>,
    ) -> ExecutionRecord {
        let execution_id = ExecutionId::new(self.id_gen.next(16));
        let started_at = self.clock.now();
        let mut record = ExecutionRecord {
            execution_id,
            pipeline_id: pipeline.id.clone(),
            status: ExecutionStatus::Running,
            started_at,
            completed_at: None,
            context: initial_context.clone(),
            results: Vec::new(),
            error: None,
        };

        if !pipeline.validate() {
            record.status = ExecutionStatus::Failed;
            record.error = Some("Pipeline validation failed".to_string());
            record.completed_at = Some(self.clock.now());
            return record;
        }

        let mut accumulated_context = initial_context.clone();

        for step in pipeline.ordered_steps() {
            if matches!(cancel, Some(token) if token.is_cancelled()) {
                record.status = ExecutionStatus::Cancelled;
                record.error = Some("Execution cancelled by user".to_string());
                record.completed_at = Some(self.clock.now());
                return record;
            }

            let pipeline_data = self.step_input(step, &initial_context, &record.results);

            match self
                .step_executor
                .execute(step, &pipeline_data, &accumulated_context)
                .await
            {
                Ok(success) => {
                    merge_returned_context(&success, &mut accumulated_context);
                    record.results.push(success);
                }
                Err(failure) => {
                    record.error = failure.error().map(str::to_string);
                    record.results.push(failure);
                    record.status = ExecutionStatus::Failed;
                    record.completed_at = Some(self.clock.now());
                    return record;
                }
            }
        }

        record.status = ExecutionStatus::Success;
        record.completed_at = Some(self.clock.now());
        record
    }

    /// Input assembly for one step (spec §4.4): the initial context for
    /// `position == 0`, otherwise the prior step's success `output`. If
    /// the prior result isn't a success (shouldn't happen — a failure
    /// short-circuits before the next step runs) an empty map is used and
    /// a warning logged.
    fn step_input(&self, step: &Step, initial_context: &Value, results: &[StepResult]) -> Value {
        if step.position == 0 {
            return initial_context.clone();
        }
        match results.last() {
            Some(StepResult::Success { output, .. }) => output.clone(),
            _ => {
                tracing::warn!(step_id = %step.id, "no prior step output available, using empty input");
                Value::map()
            }
        }
    }
}

/// Merges a step's returned `context` (or top-level `context` key) into
/// the accumulated context threaded through the rest of the pipeline
/// (spec §4.4: "merge any output.context ... into the accumulated
/// context").
fn merge_returned_context(result: &StepResult, accumulated_context: &mut Value) {
    let Some(output) = result.output() else {
        return;
    };
    let Some(returned_context) = output.get("context").and_then(Value::as_map) else {
        return;
    };
    let base = accumulated_context
        .as_map()
        .cloned()
        .unwrap_or_default();
    let mut merged = base;
    for (key, value) in returned_context {
        merged.insert(key.clone(), value.clone());
    }
    *accumulated_context = Value::Map(merged);
}

/// Transitions a `running` execution record to `cancelled`; a no-op on any
/// other status (spec §4.4 `cancel(record)`).
pub fn cancel(record: &mut ExecutionRecord, now: chrono::DateTime<chrono::Utc>) {
    if record.status != ExecutionStatus::Running {
        return;
    }
    record.status = ExecutionStatus::Cancelled;
    record.error = Some("Execution cancelled by user".to_string());
    record.completed_at = Some(now);
}

#[cfg(test)]
#[path = "pipeline_executor_tests.rs"]
mod tests;
