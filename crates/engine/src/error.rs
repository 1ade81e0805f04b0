// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Internal error types used to build [`inn_core::StepResult::Failure`]
//! values. Not propagated as Rust errors to callers of
//! [`crate::pipeline_executor::PipelineExecutor::execute`] — per spec §7,
//! failures inside a pipeline materialize as a terminal `ExecutionRecord`,
//! never as an exception.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    #[error("Action not found: {integration}.{action}")]
    ActionNotFound { integration: String, action: String },
    #[error("{0}")]
    ActionReturnedError(String),
    #[error("Action executor crashed: {0}")]
    Crashed(String),
}
