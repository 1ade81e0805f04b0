// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `log.write` built-in action.

use async_trait::async_trait;
use inn_core::{Action, ActionResult, Value};

/// Writes a structured log line via `tracing::info!` and always succeeds,
/// echoing its input back under `{"logged": true}`.
pub struct LogWrite;

#[async_trait]
impl Action for LogWrite {
    async fn call(&self, input: Value) -> ActionResult {
        tracing::info!(input = %input, "log.write");
        Ok(Value::from_pairs([
            ("logged", Value::Bool(true)),
            ("input", input),
        ]))
    }
}
