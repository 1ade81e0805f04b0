// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline and Step value types (spec §3).
//!
//! Both are immutable once constructed: "updating" a step or pipeline
//! returns a new value rather than mutating in place, which keeps
//! serialization and concurrent reads of a pipeline trivially safe (spec
//! §9 design notes).

use crate::id::{IdGen, UuidIdGen};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// 16-character identifier for a [`Step`].
    pub struct StepId;
}

crate::define_id! {
    /// Identifier for a [`Pipeline`].
    pub struct PipelineId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Trigger,
    Action,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Draft,
    Active,
    Inactive,
}

/// A single position within a pipeline, binding a static input to an
/// action reference (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub integration_name: String,
    pub action_name: String,
    #[serde(default)]
    pub input_map: Value,
    pub position: u32,
}

impl Step {
    /// Builds a new step with a freshly generated 16-character id.
    pub fn new(
        name: impl Into<String>,
        kind: StepKind,
        integration_name: impl Into<String>,
        action_name: impl Into<String>,
        input_map: Value,
        position: u32,
    ) -> Self {
        Self::with_id_gen(
            &UuidIdGen,
            name,
            kind,
            integration_name,
            action_name,
            input_map,
            position,
        )
    }

    pub fn with_id_gen(
        id_gen: &impl IdGen,
        name: impl Into<String>,
        kind: StepKind,
        integration_name: impl Into<String>,
        action_name: impl Into<String>,
        input_map: Value,
        position: u32,
    ) -> Self {
        Self {
            id: StepId::new(id_gen.next(16)),
            name: name.into(),
            kind,
            integration_name: integration_name.into(),
            action_name: action_name.into(),
            input_map,
            position,
        }
    }

    /// Returns a copy of this step with a different `input_map` — "updating"
    /// a step produces a new value rather than mutating in place.
    pub fn with_input_map(&self, input_map: Value) -> Self {
        Self {
            input_map,
            ..self.clone()
        }
    }
}

/// An ordered sequence of named actions triggered by a matching event
/// (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: PipelineId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pattern: Value,
    pub steps: Vec<Step>,
    pub status: PipelineStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pipeline {
    /// Constructs a pipeline, normalizing step `position` to match the
    /// order the steps were supplied in (spec §3 invariant: `steps[i]
    /// .position == i`).
    pub fn new(
        name: impl Into<String>,
        pattern: Value,
        mut steps: Vec<Step>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::normalize_positions(&mut steps);
        Self {
            id: PipelineId::new(UuidIdGen.next(16)),
            name: name.into(),
            description: None,
            pattern,
            steps,
            status: PipelineStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    fn normalize_positions(steps: &mut [Step]) {
        for (i, step) in steps.iter_mut().enumerate() {
            step.position = i as u32;
        }
    }

    /// Returns a copy of this pipeline with a different `status` and
    /// `updated_at` — pipelines are immutable, updates return new values.
    pub fn with_status(&self, status: PipelineStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Returns the steps sorted by `position` ascending. Stable on ties,
    /// though ties indicate an invalid pipeline (see [`Self::validate`]).
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.position);
        steps
    }

    /// Checks the position invariant: after sorting by `position`, index
    /// `i` must have `position == i` for every step. An empty pipeline is
    /// valid (it simply never matches any step to execute).
    pub fn validate(&self) -> bool {
        let ordered = self.ordered_steps();
        ordered
            .iter()
            .enumerate()
            .all(|(i, step)| step.position as usize == i)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
