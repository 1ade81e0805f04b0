// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `trigger.passthrough` built-in action.
//!
//! A pipeline's first step is conventionally a trigger (spec §3 `StepKind::
//! Trigger`) that represents the inbound event itself rather than doing
//! any work. The Step Executor invokes every step uniformly regardless of
//! kind (spec §4.3), so a trigger still needs a real, registered action:
//! this one simply echoes its merged input back as its output, carrying
//! the flattened initial context forward as `pipeline_data` for step 1.

use async_trait::async_trait;
use inn_core::{Action, ActionResult, Value};

pub struct Passthrough;

#[async_trait]
impl Action for Passthrough {
    async fn call(&self, input: Value) -> ActionResult {
        Ok(input)
    }
}
