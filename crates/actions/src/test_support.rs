// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes shared by `inn-engine` and `inn-gateway` tests: a configurable
//! action that returns a fixed result, echoes its input, or panics (to
//! exercise crash containment, spec §8 S6) without needing real I/O.

use async_trait::async_trait;
use inn_core::{Action, ActionResult, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// What [`FakeAction`] does when invoked.
pub enum FakeBehavior {
    Succeed(Value),
    Fail(String),
    /// Panics with the given message, exercising the Step Executor's
    /// crash-containment path.
    Crash(String),
    /// Echoes the input map back as the output.
    Echo,
}

pub struct FakeAction {
    behavior: FakeBehavior,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl FakeAction {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding(output: Value) -> Self {
        Self::new(FakeBehavior::Succeed(output))
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self::new(FakeBehavior::Fail(error.into()))
    }

    pub fn crashing(message: impl Into<String>) -> Self {
        Self::new(FakeBehavior::Crash(message.into()))
    }

    pub fn echo() -> Self {
        Self::new(FakeBehavior::Echo)
    }

    /// Inputs this action was invoked with, in call order.
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Action for FakeAction {
    async fn call(&self, input: Value) -> ActionResult {
        self.calls.lock().push(input.clone());
        match &self.behavior {
            FakeBehavior::Succeed(output) => Ok(output.clone()),
            FakeBehavior::Fail(error) => Err(error.clone()),
            FakeBehavior::Crash(message) => panic!("{message}"),
            FakeBehavior::Echo => Ok(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_returns_its_input() {
        let action = FakeAction::echo();
        let input = Value::from_pairs([("a", Value::from(1i64))]);
        let output = action.call(input.clone()).await.unwrap();
        assert_eq!(output, input);
        assert_eq!(action.calls(), vec![input]);
    }

    #[tokio::test]
    async fn failing_returns_configured_error() {
        let action = FakeAction::failing("nope");
        assert_eq!(action.call(Value::map()).await.unwrap_err(), "nope");
    }
}
