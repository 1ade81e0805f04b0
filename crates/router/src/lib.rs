// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! inn-router: the Event Router (spec §4.5) — a static, ordered list of
//! `{queue, pattern}` rules consulted in order; the first rule whose
//! pattern matches the event wins.

use inn_core::{matches, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single routing rule: if `pattern` matches an event, route it to
/// `queue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub queue: String,
    #[serde(default)]
    pub pattern: Value,
}

impl Rule {
    pub fn new(queue: impl Into<String>, pattern: Value) -> Self {
        Self {
            queue: queue.into(),
            pattern,
        }
    }

    /// A default/catch-all rule: matches any event (empty pattern).
    pub fn default_route(queue: impl Into<String>) -> Self {
        Self::new(queue, Value::map())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("No matching rule found")]
    NoMatch,
}

/// First-match rule engine `event → queue_name` (spec §4.5, testable
/// property 9: router first-match).
#[derive(Debug, Clone, Default)]
pub struct EventRouter {
    rules: Vec<Rule>,
}

impl EventRouter {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the queue name of the first rule whose pattern matches
    /// `event`, or [`RouterError::NoMatch`] if none do.
    pub fn route(&self, event: &Value) -> Result<&str, RouterError> {
        self.rules
            .iter()
            .find(|rule| matches(event, &rule.pattern))
            .map(|rule| rule.queue.as_str())
            .ok_or(RouterError::NoMatch)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
