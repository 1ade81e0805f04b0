// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result of driving a pipeline to completion (spec §3/§4.4).

use crate::pipeline::{PipelineId, StepId, StepKind};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Identifier for one pipeline run.
    pub struct ExecutionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

/// Per-step outcome. Both variants share `step_id, step_name, step_kind,
/// integration, action` so downstream consumers can discriminate on the
/// presence of `error`/`output` (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepResult {
    Success {
        step_id: StepId,
        step_name: String,
        #[serde(rename = "step_type")]
        step_kind: StepKind,
        integration: String,
        action: String,
        output: Value,
        status: SuccessTag,
        duration_ms: u64,
        executed_at: DateTime<Utc>,
    },
    Failure {
        step_id: StepId,
        step_name: String,
        #[serde(rename = "step_type")]
        step_kind: StepKind,
        integration: String,
        action: String,
        error: String,
        duration_ms: u64,
        failed_at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input_data: Option<Value>,
    },
}

/// Marker type that always serializes to the literal string `"success"`,
/// matching the status tag spec §3 requires on the success variant while
/// still letting serde discriminate the untagged enum on the presence of
/// `output` vs. `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuccessTag;

impl Serialize for SuccessTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("success")
    }
}

impl<'de> Deserialize<'de> for SuccessTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "success" {
            Ok(SuccessTag)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected status \"success\", got {s:?}"
            )))
        }
    }
}

impl StepResult {
    pub fn step_id(&self) -> &StepId {
        match self {
            StepResult::Success { step_id, .. } => step_id,
            StepResult::Failure { step_id, .. } => step_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepResult::Success { .. })
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            StepResult::Success { duration_ms, .. } => *duration_ms,
            StepResult::Failure { duration_ms, .. } => *duration_ms,
        }
    }

    pub fn output(&self) -> Option<&Value> {
        match self {
            StepResult::Success { output, .. } => Some(output),
            StepResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StepResult::Failure { error, .. } => Some(error),
            StepResult::Success { .. } => None,
        }
    }
}

/// The in-memory result of one pipeline run (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub execution_id: ExecutionId,
    pub pipeline_id: PipelineId,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub context: Value,
    pub results: Vec<StepResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionRecord {
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == ExecutionStatus::Failed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ExecutionStatus::Cancelled
    }

    /// Wall-clock duration of the run, or `0` while still running/pending.
    pub fn duration_ms(&self) -> u64 {
        match self.completed_at {
            Some(end) => (end - self.started_at).num_milliseconds().max(0) as u64,
            None => 0,
        }
    }

    /// The `output` of the last successful step, or `None` if no step
    /// succeeded yet.
    pub fn final_output(&self) -> Option<&Value> {
        self.results.iter().rev().find_map(|r| r.output())
    }

    pub fn all_outputs(&self) -> Vec<&Value> {
        self.results.iter().filter_map(|r| r.output()).collect()
    }

    pub fn failed_steps(&self) -> Vec<&StepResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    /// A small stats map suitable for logging (spec §4.4 derived queries).
    pub fn summary(&self) -> Value {
        Value::from_pairs([
            ("execution_id", Value::from(self.execution_id.as_str())),
            ("pipeline_id", Value::from(self.pipeline_id.as_str())),
            ("status", Value::from(status_label(self.status))),
            ("step_count", Value::from(self.results.len() as i64)),
            ("duration_ms", Value::from(self.duration_ms() as i64)),
        ])
    }
}

fn status_label(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Pending => "pending",
        ExecutionStatus::Running => "running",
        ExecutionStatus::Success => "success",
        ExecutionStatus::Failed => "failed",
        ExecutionStatus::Cancelled => "cancelled",
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
